// src/routes/admin.rs
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::tournament::{match_handler, player_handler, standings_handler, team_handler};
use crate::models::matches::{CreateMatchRequest, MatchQuery, MatchResultRequest, UpdateMatchRequest};
use crate::models::player::{CreatePlayerRequest, PlayerQuery};
use crate::models::team::{CreateTeamRequest, TeamQuery};
use crate::tournament::standings::StandingsConfig;

/// Record counts for the admin dashboard
#[get("/dashboard")]
async fn dashboard(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    standings_handler::get_dashboard(pool, standings_config).await
}

#[get("/teams")]
async fn list_teams(
    query: web::Query<TeamQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    team_handler::list_teams(query, pool, standings_config).await
}

#[post("/teams")]
async fn create_team(
    team_request: web::Json<CreateTeamRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    team_handler::create_team(team_request, pool, standings_config).await
}

#[get("/teams/{team_id}")]
async fn get_team(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::get_team(team_id, pool, standings_config).await
}

#[delete("/teams/{team_id}")]
async fn delete_team(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::delete_team(team_id, pool, standings_config).await
}

#[get("/players")]
async fn list_players(
    query: web::Query<PlayerQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    player_handler::list_players(query, pool, standings_config).await
}

#[post("/players")]
async fn create_player(
    player_request: web::Json<CreatePlayerRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    player_handler::create_player(player_request, pool, standings_config).await
}

#[delete("/players/{player_id}")]
async fn delete_player(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let player_id = path.into_inner();
    player_handler::delete_player(player_id, pool, standings_config).await
}

#[get("/matches")]
async fn list_matches(
    query: web::Query<MatchQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    match_handler::list_matches(query, pool, standings_config).await
}

#[post("/matches")]
async fn create_match(
    match_request: web::Json<CreateMatchRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    match_handler::create_match(match_request, pool, standings_config).await
}

/// Edit fixture details or revert a match to scheduled
#[patch("/matches/{match_id}")]
async fn update_match(
    path: web::Path<Uuid>,
    update_request: web::Json<UpdateMatchRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::update_match(match_id, update_request, pool, standings_config).await
}

#[delete("/matches/{match_id}")]
async fn delete_match(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::delete_match(match_id, pool, standings_config).await
}

/// Match plus both squads, for picking the scorers
#[get("/matches/{match_id}/result")]
async fn get_match_result_form(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::get_match_result_context(match_id, pool, standings_config).await
}

/// Enter the final score and scorers
#[put("/matches/{match_id}/result")]
async fn record_match_result(
    path: web::Path<Uuid>,
    result_request: web::Json<MatchResultRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::record_match_result(match_id, result_request, pool, standings_config).await
}

#[post("/standings/recompute")]
async fn recompute_standings(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    standings_handler::recompute_standings(pool, standings_config).await
}
