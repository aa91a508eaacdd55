use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

/// Liveness plus a round trip to Postgres. A missing database degrades to 503.
pub async fn backend_health_check(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "UP",
            "database": "UP"
        })),
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "DEGRADED",
                "database": "DOWN"
            }))
        }
    }
}
