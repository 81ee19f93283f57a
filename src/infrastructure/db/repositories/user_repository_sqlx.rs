use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::user_repository::{CreateUserError, UserRepository};
use crate::domain::accounts::account::{Account, AccountCredentials};
use crate::infrastructure::db::PgPool;

const EMAIL_CONSTRAINT: &str = "users_email_key";
const USERNAME_CONSTRAINT: &str = "users_username_key";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(r: &PgRow) -> Account {
    Account {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn map_insert_error(err: sqlx::Error) -> CreateUserError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            match db.constraint() {
                Some(EMAIL_CONSTRAINT) => return CreateUserError::EmailTaken,
                Some(USERNAME_CONSTRAINT) => return CreateUserError::UsernameTaken,
                _ => {}
            }
        }
    }
    CreateUserError::Other(err.into())
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, CreateUserError> {
        let row = sqlx::query(
            r#"INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)
               RETURNING id, username, email, created_at, updated_at"#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;
        Ok(account_from_row(&row))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<AccountCredentials>> {
        let row = sqlx::query(
            r#"SELECT id, username, email, password_hash, created_at, updated_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| AccountCredentials {
            account: account_from_row(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Account>> {
        let row = sqlx::query(
            r#"SELECT id, username, email, created_at, updated_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(account_from_row))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
