use actix_web::web;

pub mod admin;
pub mod backend_health;
pub mod tournament;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Public tournament pages
    cfg.service(tournament::home)
        .service(tournament::fixtures)
        .service(tournament::results)
        .service(tournament::standings)
        .service(tournament::top_scorers)
        .service(tournament::match_detail);

    // Admin management routes
    cfg.service(
        web::scope("/admin")
            .service(admin::dashboard)
            .service(admin::list_teams)
            .service(admin::create_team)
            .service(admin::get_team)
            .service(admin::delete_team)
            .service(admin::list_players)
            .service(admin::create_player)
            .service(admin::delete_player)
            .service(admin::list_matches)
            .service(admin::create_match)
            .service(admin::update_match)
            .service(admin::delete_match)
            .service(admin::get_match_result_form)
            .service(admin::record_match_result)
            .service(admin::recompute_standings)
    );
}
