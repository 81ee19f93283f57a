use async_trait::async_trait;

use crate::domain::accounts::account::{Account, AccountCredentials};

#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("email already in use")]
    EmailTaken,
    #[error("username already in use")]
    UsernameTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    // Must enforce username/email uniqueness itself; callers treat the
    // returned EmailTaken/UsernameTaken as authoritative.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, CreateUserError>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<AccountCredentials>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Account>>;
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    async fn username_exists(&self, username: &str) -> anyhow::Result<bool>;
}
