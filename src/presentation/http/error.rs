use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::access::AccessError;
use crate::application::use_cases::auth::login::LoginError;
use crate::application::use_cases::auth::register::RegisterError;
use crate::application::use_cases::notes::NoteError;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Invalid(_) | RegisterError::EmailTaken | RegisterError::UsernameTaken => {
                Self::BadRequest(err.to_string())
            }
            RegisterError::Hash(e) | RegisterError::Store(e) => {
                tracing::error!(error = ?e, "register_failed");
                Self::Internal("failed to create user")
            }
            RegisterError::Token(e) => {
                tracing::error!(error = ?e, "token_issue_failed");
                Self::Internal("failed to issue token")
            }
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::Invalid(e) => Self::BadRequest(e.to_string()),
            LoginError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            LoginError::Store(e) => {
                tracing::error!(error = ?e, "login_lookup_failed");
                Self::Internal("failed to log in")
            }
            LoginError::Token(e) => {
                tracing::error!(error = ?e, "token_issue_failed");
                Self::Internal("failed to issue token")
            }
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::Invalid(e) => Self::BadRequest(e.to_string()),
            NoteError::NotFound => Self::NotFound(err.to_string()),
            NoteError::Store(e) => {
                tracing::error!(error = ?e, "note_store_failed");
                Self::Internal("note storage failure")
            }
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Store(e) => {
                tracing::error!(error = ?e, "auth_user_lookup_failed");
                Self::Internal("failed to load user")
            }
            other => {
                tracing::debug!(reason = %other, "request_unauthenticated");
                Self::Unauthorized(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::validation::ValidationError;

    #[test]
    fn status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (NoteError::NotFound.into(), StatusCode::NOT_FOUND),
            (
                NoteError::Invalid(ValidationError::Required("title")).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                NoteError::Store(anyhow::anyhow!("db down")).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (RegisterError::EmailTaken.into(), StatusCode::BAD_REQUEST),
            (LoginError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (AccessError::MissingCredentials.into(), StatusCode::UNAUTHORIZED),
            (
                AccessError::Store(anyhow::anyhow!("db down")).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err: ApiError = NoteError::Store(anyhow::anyhow!("connection refused at 10.0.0.5")).into();
        assert!(!err.to_string().contains("10.0.0.5"));
    }
}
