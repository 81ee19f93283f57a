use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::token_service::{TokenError, TokenService};
use crate::application::ports::user_repository::{CreateUserError, UserRepository};
use crate::application::services::validation::{self, ValidationError};
use crate::domain::accounts::account::Account;

pub struct Register<'a, R, H, T>
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
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct Registered {
    pub account: Account,
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("user with this email already exists")]
    EmailTaken,
    #[error("user with this username already exists")]
    UsernameTaken,
    #[error("failed to hash password")]
    Hash(#[source] anyhow::Error),
    #[error("failed to create user")]
    Store(#[source] anyhow::Error),
    #[error("failed to issue token")]
    Token(#[source] TokenError),
}

impl<'a, R, H, T> Register<'a, R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    pub async fn execute(&self, req: RegisterRequest) -> Result<Registered, RegisterError> {
        validation::require_text("username", &req.username, validation::MAX_NAME_LEN)?;
        validation::require_email(&req.email)?;
        validation::require_password(&req.password)?;

        if self
            .repo
            .email_exists(&req.email)
            .await
            .map_err(RegisterError::Store)?
        {
            return Err(RegisterError::EmailTaken);
        }
        if self
            .repo
            .username_exists(&req.username)
            .await
            .map_err(RegisterError::Store)?
        {
            return Err(RegisterError::UsernameTaken);
        }

        // Nothing is stored unless the caller can be handed a token afterwards.
        self.tokens
            .ensure_can_issue()
            .map_err(RegisterError::Token)?;

        // The plaintext is consumed here; only the hash goes to the store.
        let password_hash = self
            .hasher
            .hash(&req.password)
            .map_err(RegisterError::Hash)?;
        drop(req.password);

        // The existence checks above are advisory; the store's unique constraints decide
        // concurrent registrations.
        let account = self
            .repo
            .create_user(&req.username, &req.email, &password_hash)
            .await
            .map_err(|e| match e {
                CreateUserError::EmailTaken => RegisterError::EmailTaken,
                CreateUserError::UsernameTaken => RegisterError::UsernameTaken,
                CreateUserError::Other(e) => RegisterError::Store(e),
            })?;

        let token = self.tokens.issue(&account).map_err(RegisterError::Token)?;
        tracing::info!(user_id = account.id, username = %account.username, "user_registered");
        Ok(Registered { account, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::accounts::account::AccountCredentials;
    use crate::infrastructure::crypto::jwt::{JwtSettings, JwtTokenService};
    use crate::infrastructure::memory::InMemoryUserRepository;
    use async_trait::async_trait;
    use jsonwebtoken::Algorithm;

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
            Ok(format!("plain:{plaintext}"))
        }

        fn verify(&self, plaintext: &str, hash: &str) -> anyhow::Result<bool> {
            Ok(hash == format!("plain:{plaintext}"))
        }
    }

    // Existence checks report a free email and username; the insert still loses.
    struct LosesInsert(fn() -> CreateUserError);

    #[async_trait]
    impl UserRepository for LosesInsert {
        async fn create_user(&self, _: &str, _: &str, _: &str) -> Result<Account, CreateUserError> {
            Err((self.0)())
        }
        async fn find_by_email(&self, _: &str) -> anyhow::Result<Option<AccountCredentials>> {
            Ok(None)
        }
        async fn find_by_id(&self, _: i64) -> anyhow::Result<Option<Account>> {
            Ok(None)
        }
        async fn email_exists(&self, _: &str) -> anyhow::Result<bool> {
            Ok(false)
        }
        async fn username_exists(&self, _: &str) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    fn tokens(secret: Option<&str>) -> JwtTokenService {
        JwtTokenService::new(JwtSettings {
            secret: secret.map(str::to_string),
            algorithm: Algorithm::HS256,
            ttl_secs: 3600,
        })
        .unwrap()
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "password123".into(),
        }
    }

    #[tokio::test]
    async fn registers_and_issues_token() {
        let repo = InMemoryUserRepository::default();
        let tokens = tokens(Some("secret"));
        let uc = Register {
            repo: &repo,
            hasher: &PlainHasher,
            tokens: &tokens,
        };
        let done = uc.execute(alice()).await.unwrap();
        assert_eq!(done.account.username, "alice");
        assert_eq!(tokens.validate(&done.token).unwrap().user_id, done.account.id);
        let stored = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "plain:password123");
    }

    #[tokio::test]
    async fn insert_conflicts_after_clean_checks_map_to_taken() {
        let tokens = tokens(Some("secret"));

        let repo = LosesInsert(|| CreateUserError::EmailTaken);
        let uc = Register {
            repo: &repo,
            hasher: &PlainHasher,
            tokens: &tokens,
        };
        let err = uc.execute(alice()).await.unwrap_err();
        assert!(matches!(err, RegisterError::EmailTaken));
        assert_eq!(err.to_string(), "user with this email already exists");

        let repo = LosesInsert(|| CreateUserError::UsernameTaken);
        let uc = Register {
            repo: &repo,
            hasher: &PlainHasher,
            tokens: &tokens,
        };
        let err = uc.execute(alice()).await.unwrap_err();
        assert!(matches!(err, RegisterError::UsernameTaken));
        assert_eq!(err.to_string(), "user with this username already exists");

        let repo = LosesInsert(|| CreateUserError::Other(anyhow::anyhow!("db down")));
        let uc = Register {
            repo: &repo,
            hasher: &PlainHasher,
            tokens: &tokens,
        };
        assert!(matches!(
            uc.execute(alice()).await.unwrap_err(),
            RegisterError::Store(_)
        ));
    }

    #[tokio::test]
    async fn unsignable_tokens_leave_the_store_untouched() {
        let repo = InMemoryUserRepository::default();
        let tokens = tokens(None);
        let uc = Register {
            repo: &repo,
            hasher: &PlainHasher,
            tokens: &tokens,
        };

        for _ in 0..2 {
            let err = uc.execute(alice()).await.unwrap_err();
            assert!(matches!(err, RegisterError::Token(TokenError::MissingSecret)));
        }
        assert!(!repo.email_exists("alice@example.com").await.unwrap());
        assert!(!repo.username_exists("alice").await.unwrap());
    }
}
