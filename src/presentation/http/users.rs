use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account::Account;
use crate::presentation::http::auth::CurrentUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for ProfileUser {
    fn from(a: Account) -> Self {
        ProfileUser {
            id: a.id,
            username: a.username,
            email: a.email,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

#[utoipa::path(get, path = "/api/user/profile", tag = "User", responses(
    (status = 200, body = ProfileResponse),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<ProfileResponse> {
    // The guard already loaded the account; no second lookup.
    Json(ProfileResponse {
        user: user.account.into(),
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/user/profile", get(profile))
        .with_state(ctx)
}
