use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::tournament::tournament_service;
use crate::models::common::ApiResponse;
use crate::tournament::standings::StandingsConfig;

/// Group tables
#[tracing::instrument(name = "Get standings", skip(pool, standings_config))]
pub async fn get_standings(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let standings = tournament_service(&pool, &standings_config)
        .standings()
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Standings", standings)))
}

/// Rebuild every team's record from the finished matches
#[tracing::instrument(name = "Recompute standings", skip(pool, standings_config))]
pub async fn recompute_standings(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let service = tournament_service(&pool, &standings_config);

    match service.recompute_standings().await {
        Ok(summary) => {
            tracing::info!(
                "Standings recomputed: {} teams from {} matches",
                summary.teams_updated, summary.matches_counted
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success("Standings recomputed", summary)))
        }
        Err(e) => {
            tracing::error!("Failed to recompute standings: {}", e);
            Err(e.into())
        }
    }
}

#[tracing::instrument(name = "Get dashboard", skip(pool, standings_config))]
pub async fn get_dashboard(
    pool: web::Data<PgPool>,
    standings_config: web::Data<StandingsConfig>,
) -> Result<HttpResponse> {
    let counts = tournament_service(&pool, &standings_config)
        .dashboard()
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Dashboard", counts)))
}
