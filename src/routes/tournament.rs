// src/routes/tournament.rs
use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::tournament::{match_handler, player_handler, standings_handler};
use crate::models::matches::MatchQuery;
use crate::tournament::standings::StandingsConfig;

/// Upcoming fixtures and latest results
#[get("/")]
async fn home(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    match_handler::get_home(pool, standings_config).await
}

/// All matches, filterable by group and stage
#[get("/fixtures")]
async fn fixtures(
    query: web::Query<MatchQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    match_handler::get_fixtures(query, pool, standings_config).await
}

/// Finished matches, filterable by group and stage
#[get("/results")]
async fn results(
    query: web::Query<MatchQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    match_handler::get_results(query, pool, standings_config).await
}

#[get("/standings")]
async fn standings(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    standings_handler::get_standings(pool, standings_config).await
}

#[get("/top-scorers")]
async fn top_scorers(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    player_handler::get_top_scorers(pool, standings_config).await
}

#[get("/matches/{match_id}")]
async fn match_detail(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::get_match_detail(match_id, pool, standings_config).await
}
