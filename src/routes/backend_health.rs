use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::backend_health_handler::backend_health_check;

#[get("/backend_health")]
async fn backend_health(pool: web::Data<PgPool>) -> HttpResponse {
    backend_health_check(pool).await
}
