use std::sync::Arc;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::token_service::TokenService;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::{Config, StoreBackend};
use crate::infrastructure::crypto::Argon2PasswordHasher;
use crate::infrastructure::crypto::jwt::JwtTokenService;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::note_repository_sqlx::SqlxNoteRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::memory::{InMemoryNoteRepository, InMemoryUserRepository};

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    note_repo: Arc<dyn NoteRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
    // None when running on the in-memory store
    pool: Option<PgPool>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        note_repo: Arc<dyn NoteRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<dyn TokenService>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            user_repo,
            note_repo,
            password_hasher,
            token_service,
            pool,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn note_repo(&self) -> Arc<dyn NoteRepository> {
        self.services.note_repo.clone()
    }

    pub fn password_hasher(&self) -> Arc<dyn PasswordHasher> {
        self.services.password_hasher.clone()
    }

    pub fn token_service(&self) -> Arc<dyn TokenService> {
        self.services.token_service.clone()
    }

    pub fn pool(&self) -> Option<PgPool> {
        self.services.pool.clone()
    }
}

/// Wires the configured store and the crypto services. Connects and migrates
/// the database for the Postgres backend.
pub async fn build(cfg: Config) -> anyhow::Result<AppContext> {
    let token_service = Arc::new(JwtTokenService::new(cfg.jwt_settings())?);
    let password_hasher = Arc::new(Argon2PasswordHasher::new(cfg.hash_cost)?);

    let services = match cfg.store_backend {
        StoreBackend::Postgres => {
            let pool = crate::infrastructure::db::connect_pool(
                cfg.database.clone(),
                cfg.db_max_connections,
            )
            .await?;
            crate::infrastructure::db::migrate(&pool).await?;
            AppServices::new(
                Arc::new(SqlxUserRepository::new(pool.clone())),
                Arc::new(SqlxNoteRepository::new(pool.clone())),
                password_hasher,
                token_service,
                Some(pool),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            AppServices::new(
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryNoteRepository::default()),
                password_hasher,
                token_service,
                None,
            )
        }
    };

    Ok(AppContext::new(cfg, services))
}
