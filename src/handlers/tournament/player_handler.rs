use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::tournament::tournament_service;
use crate::models::common::ApiResponse;
use crate::models::player::{CreatePlayerRequest, PlayerQuery};
use crate::tournament::standings::StandingsConfig;

/// Add a player to a team
#[tracing::instrument(
    name = "Create player",
    skip(player_request, pool, standings_config),
    fields(player_name = %player_request.name, team_id = %player_request.team_id)
)]
pub async fn create_player(
    player_request: web::Json<CreatePlayerRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let service = tournament_service(&pool, &standings_config);

    match service.create_player(player_request.into_inner()).await {
        Ok(player) => {
            let message = format!("Player \"{}\" added successfully!", player.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(message, player)))
        }
        Err(e) => {
            tracing::warn!("Failed to create player: {}", e);
            Err(e.into())
        }
    }
}

#[tracing::instrument(name = "List players", skip(query, pool, standings_config))]
pub async fn list_players(
    query: web::Query<PlayerQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let players = tournament_service(&pool, &standings_config)
        .list_players(&query)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} players", players.len()), players)))
}

#[tracing::instrument(name = "Delete player", skip(pool, standings_config), fields(player_id = %player_id))]
pub async fn delete_player(
    player_id: Uuid,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    tournament_service(&pool, &standings_config)
        .delete_player(player_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Player deleted")))
}

/// Players ranked by goals scored
#[tracing::instrument(name = "Top scorers", skip(pool, standings_config))]
pub async fn get_top_scorers(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let scorers = tournament_service(&pool, &standings_config)
        .top_scorers()
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Top scorers", scorers)))
}
