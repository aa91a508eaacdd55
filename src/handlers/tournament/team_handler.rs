use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::tournament::tournament_service;
use crate::models::common::ApiResponse;
use crate::models::team::{CreateTeamRequest, TeamQuery, TeamResponse};
use crate::tournament::standings::StandingsConfig;

/// Create a team
#[tracing::instrument(
    name = "Create team",
    skip(team_request, pool, standings_config),
    fields(team_name = %team_request.name)
)]
pub async fn create_team(
    team_request: web::Json<CreateTeamRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let service = tournament_service(&pool, &standings_config);

    match service.create_team(team_request.into_inner()).await {
        Ok(team) => {
            let message = format!("Team \"{}\" added successfully!", team.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(message, TeamResponse::from(team))))
        }
        Err(e) => {
            tracing::warn!("Failed to create team: {}", e);
            Err(e.into())
        }
    }
}

/// List teams in table order
#[tracing::instrument(name = "List teams", skip(query, pool, standings_config))]
pub async fn list_teams(
    query: web::Query<TeamQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let teams = tournament_service(&pool, &standings_config)
        .list_teams(&query)
        .await?;

    let data: Vec<TeamResponse> = teams.into_iter().map(TeamResponse::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} teams", data.len()), data)))
}

#[tracing::instrument(name = "Get team", skip(pool, standings_config), fields(team_id = %team_id))]
pub async fn get_team(
    team_id: Uuid,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let team = tournament_service(&pool, &standings_config)
        .get_team(team_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Team retrieved", TeamResponse::from(team))))
}

/// Delete a team together with its players and matches
#[tracing::instrument(name = "Delete team", skip(pool, standings_config), fields(team_id = %team_id))]
pub async fn delete_team(
    team_id: Uuid,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let summary = tournament_service(&pool, &standings_config)
        .delete_team(team_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Team deleted and standings updated", summary)))
}
