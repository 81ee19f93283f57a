use serde::{Deserialize, Serialize};

use crate::domain::accounts::account::Account;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    /// Username of the account the token was issued to
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("unexpected signing algorithm")]
    UnexpectedAlgorithm,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token")]
    Encoding(#[source] anyhow::Error),
}

pub trait TokenService: Send + Sync {
    fn issue(&self, account: &Account) -> Result<String, TokenError>;
    fn validate(&self, token: &str) -> Result<Claims, TokenError>;

    /// Fails when no account could be issued a token right now.
    fn ensure_can_issue(&self) -> Result<(), TokenError> {
        Ok(())
    }
}
