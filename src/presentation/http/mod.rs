pub mod auth;
pub mod error;
pub mod health;
pub mod notes;
pub mod openapi;
pub mod users;

use axum::extract::MatchedPath;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use http::{HeaderName, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

/// Any origin, credentials allowed. Preflight requests are answered by the
/// layer itself and never reach a handler.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::POST,
            Method::OPTIONS,
            Method::GET,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("route not found".into())
}

// Method routers answer 405 with an empty body; give it the usual error shape.
async fn json_method_not_allowed(resp: Response) -> Response {
    if resp.status() != http::StatusCode::METHOD_NOT_ALLOWED {
        return resp;
    }
    let allow = resp.headers().get(header::ALLOW).cloned();
    let mut out = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        out.headers_mut().insert(header::ALLOW, allow);
    }
    out
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", health::routes(ctx.clone()))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", users::routes(ctx.clone()))
        .nest("/api", notes::routes(ctx))
        .route(
            "/api/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .fallback(route_not_found)
        .layer(map_response(json_method_not_allowed))
        .layer(cors())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
