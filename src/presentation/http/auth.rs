use crate::application::access::{self, AuthenticatedUser};
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account::Account;
use crate::presentation::http::error::ApiError;
use axum::{
    Json, Router,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<Account> for UserResponse {
    fn from(a: Account) -> Self {
        UserResponse {
            id: a.id,
            username: a.username,
            email: a.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = AuthResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    let hasher = ctx.password_hasher();
    let tokens = ctx.token_service();
    let uc = RegisterUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
        tokens: tokens.as_ref(),
    };
    let registered = uc
        .execute(RegisterDto {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "user registered successfully".into(),
            user: registered.account.into(),
            token: registered.token,
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = AuthResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(req) = payload?;
    let repo = ctx.user_repo();
    let hasher = ctx.password_hasher();
    let tokens = ctx.token_service();
    let uc = LoginUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
        tokens: tokens.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let logged_in = uc.execute(&dto).await?;
    tracing::debug!(user_id = logged_in.account.id, "user_logged_in");
    Ok(Json(AuthResponse {
        message: "logged in successfully".into(),
        user: logged_in.account.into(),
        token: logged_in.token,
    }))
}

// --- Access guard extractor ---

/// Authenticated caller. Taking this as a handler argument makes the route
/// protected: extraction fails with 401 before the handler body runs.
pub struct CurrentUser(pub AuthenticatedUser);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(axum::http::header::AUTHORIZATION) {
            Some(v) => Some(
                v.to_str()
                    .map_err(|_| access::AccessError::MalformedHeader)?,
            ),
            None => None,
        };
        let tokens = ctx.token_service();
        let users = ctx.user_repo();
        let user = access::authenticate(tokens.as_ref(), users.as_ref(), header).await?;
        parts.extensions.insert(user.clone());
        Ok(CurrentUser(user))
    }
}
