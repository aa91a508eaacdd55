use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::tournament::tournament_service;
use crate::models::common::ApiResponse;
use crate::models::matches::*;
use crate::tournament::standings::StandingsConfig;

/// Schedule a new match
#[tracing::instrument(
    name = "Create match",
    skip(match_request, pool, standings_config),
    fields(
        home_team_id = %match_request.home_team_id,
        away_team_id = %match_request.away_team_id
    )
)]
pub async fn create_match(
    match_request: web::Json<CreateMatchRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let service = tournament_service(&pool, &standings_config);

    match service.create_match(match_request.into_inner()).await {
        Ok(fixture) => {
            tracing::info!("Successfully created match {}", fixture.id);
            Ok(HttpResponse::Created().json(ApiResponse::success("Match created successfully!", fixture)))
        }
        Err(e) => {
            tracing::warn!("Failed to create match: {}", e);
            Err(e.into())
        }
    }
}

#[tracing::instrument(name = "List matches", skip(query, pool, standings_config))]
pub async fn list_matches(
    query: web::Query<MatchQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let matches = tournament_service(&pool, &standings_config)
        .list_matches(&query)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} matches", matches.len()), matches)))
}

/// Match with its goals
#[tracing::instrument(name = "Get match detail", skip(pool, standings_config), fields(match_id = %match_id))]
pub async fn get_match_detail(
    match_id: Uuid,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let detail = tournament_service(&pool, &standings_config)
        .get_match_detail(match_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Match retrieved", detail)))
}

#[tracing::instrument(name = "Get match result form", skip(pool, standings_config), fields(match_id = %match_id))]
pub async fn get_match_result_context(
    match_id: Uuid,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let context = tournament_service(&pool, &standings_config)
        .match_result_context(match_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Match result context", context)))
}

/// Record a match result and its scorers
#[tracing::instrument(
    name = "Record match result",
    skip(result_request, pool, standings_config),
    fields(
        match_id = %match_id,
        home_score = %result_request.home_score,
        away_score = %result_request.away_score
    )
)]
pub async fn record_match_result(
    match_id: Uuid,
    result_request: web::Json<MatchResultRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let service = tournament_service(&pool, &standings_config);

    match service.record_result(match_id, result_request.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Match result saved and standings updated!",
            detail,
        ))),
        Err(e) => {
            tracing::error!("Failed to record result for match {}: {}", match_id, e);
            Err(e.into())
        }
    }
}

#[tracing::instrument(name = "Update match", skip(update_request, pool, standings_config), fields(match_id = %match_id))]
pub async fn update_match(
    match_id: Uuid,
    update_request: web::Json<UpdateMatchRequest>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let fixture = tournament_service(&pool, &standings_config)
        .update_match(match_id, update_request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Match updated", fixture)))
}

#[tracing::instrument(name = "Delete match", skip(pool, standings_config), fields(match_id = %match_id))]
pub async fn delete_match(
    match_id: Uuid,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    tournament_service(&pool, &standings_config)
        .delete_match(match_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Match deleted")))
}

/// Fixtures page: every match, optionally filtered by group and stage
#[tracing::instrument(name = "Get fixtures", skip(query, pool, standings_config))]
pub async fn get_fixtures(
    query: web::Query<MatchQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let listing = tournament_service(&pool, &standings_config)
        .match_listing(&query, false)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Fixtures", listing)))
}

/// Results page: finished matches only
#[tracing::instrument(name = "Get results", skip(query, pool, standings_config))]
pub async fn get_results(
    query: web::Query<MatchQuery>,
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let listing = tournament_service(&pool, &standings_config)
        .match_listing(&query, true)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Results", listing)))
}

#[tracing::instrument(name = "Get home", skip(pool, standings_config))]
pub async fn get_home(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let home = tournament_service(&pool, &standings_config).home().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Home", home)))
}
