use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    security(()),
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResp> {
    let db_ok = match ctx.pool() {
        Some(pool) => crate::infrastructure::db::ping(&pool).await,
        None => true,
    };
    let status = if db_ok { "ok" } else { "degraded" };
    Json(HealthResp {
        status: status.into(),
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/health", get(health)).with_state(ctx)
}
