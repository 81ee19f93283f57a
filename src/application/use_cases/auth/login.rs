use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::token_service::{TokenError, TokenService};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::validation::{self, ValidationError};
use crate::domain::accounts::account::Account;

pub struct Login<'a, R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    pub repo: &'a R,
    pub hasher: &'a H,
    pub tokens: &'a T,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoggedIn {
    pub account: Account,
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    // Unknown email and wrong password share this variant.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("failed to load user")]
    Store(#[source] anyhow::Error),
    #[error("failed to issue token")]
    Token(#[source] TokenError),
}

impl<'a, R, H, T> Login<'a, R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    pub async fn execute(&self, req: &LoginRequest) -> Result<LoggedIn, LoginError> {
        validation::require_email(&req.email)?;
        if req.password.is_empty() {
            return Err(ValidationError::Required("password").into());
        }

        let creds = match self
            .repo
            .find_by_email(&req.email)
            .await
            .map_err(LoginError::Store)?
        {
            Some(c) => c,
            None => return Err(LoginError::InvalidCredentials),
        };

        let matches = match self.hasher.verify(&req.password, &creds.password_hash) {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(user_id = creds.account.id, error = ?e, "stored_password_hash_unusable");
                false
            }
        };
        if !matches {
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&creds.account)
            .map_err(LoginError::Token)?;
        Ok(LoggedIn {
            account: creds.account,
            token,
        })
    }
}
