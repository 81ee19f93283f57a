use std::env;
use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::infrastructure::crypto::HashCost;
use crate::infrastructure::crypto::jwt::{HMAC_ALGORITHMS, JwtSettings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Clone)]
pub struct Config {
    pub api_port: u16,
    pub database: PgConnectOptions,
    pub db_max_connections: u32,
    pub store_backend: StoreBackend,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub jwt_expires_secs: i64,
    pub hash_cost: HashCost,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_port = match var("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {p:?}"))?,
            None => 8080,
        };

        // Parts are passed to the driver as-is, so credentials need no escaping.
        let database = match var("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url)
                .map_err(|e| anyhow::anyhow!("DATABASE_URL is not a valid Postgres URL: {e}"))?,
            None => {
                let port = match var("DB_PORT") {
                    Some(p) => p
                        .parse()
                        .map_err(|_| anyhow::anyhow!("DB_PORT must be a port number, got {p:?}"))?,
                    None => 5432,
                };
                let sslmode = var("DB_SSLMODE").unwrap_or_else(|| "disable".into());
                let ssl_mode = PgSslMode::from_str(&sslmode)
                    .map_err(|_| anyhow::anyhow!("unknown DB_SSLMODE {sslmode:?}"))?;
                PgConnectOptions::new()
                    .host(&var("DB_HOST").unwrap_or_else(|| "localhost".into()))
                    .port(port)
                    .username(&var("DB_USER").unwrap_or_else(|| "postgres".into()))
                    .password(&var("DB_PASSWORD").unwrap_or_else(|| "postgres".into()))
                    .database(&var("DB_NAME").unwrap_or_else(|| "notes".into()))
                    .ssl_mode(ssl_mode)
            }
        };
        let db_max_connections = var("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let store_backend = match var("STORE_BACKEND").as_deref() {
            None | Some("postgres") | Some("pg") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => anyhow::bail!("STORE_BACKEND must be `postgres` or `memory`, got {other:?}"),
        };

        let jwt_secret = var("JWT_SECRET")
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let jwt_algorithm = match var("JWT_ALGORITHM") {
            Some(name) => {
                let alg = Algorithm::from_str(&name)
                    .map_err(|_| anyhow::anyhow!("unknown JWT_ALGORITHM {name:?}"))?;
                anyhow::ensure!(
                    HMAC_ALGORITHMS.contains(&alg),
                    "JWT_ALGORITHM must be one of HS256, HS384, HS512"
                );
                alg
            }
            None => Algorithm::HS256,
        };
        let jwt_expires_secs = var("JWT_EXPIRES_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|s: &i64| *s > 0)
            .unwrap_or(24 * 60 * 60);

        let hash_cost = HashCost {
            memory_kib: var("ARGON2_MEMORY_KIB").and_then(|s| s.parse().ok()),
            iterations: var("ARGON2_ITERATIONS").and_then(|s| s.parse().ok()),
            parallelism: var("ARGON2_PARALLELISM").and_then(|s| s.parse().ok()),
        };

        let is_production = matches!(
            var("RUST_ENV").as_deref(),
            Some("production") | Some("prod")
        );

        // Production hardening
        if is_production {
            anyhow::ensure!(
                jwt_secret.len() >= 16,
                "JWT_SECRET must be at least 16 characters in production"
            );
            anyhow::ensure!(
                store_backend == StoreBackend::Postgres,
                "STORE_BACKEND=memory is not allowed in production"
            );
        }

        Ok(Self {
            api_port,
            database,
            db_max_connections,
            store_backend,
            jwt_secret,
            jwt_algorithm,
            jwt_expires_secs,
            hash_cost,
            is_production,
        })
    }

    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings {
            secret: Some(self.jwt_secret.clone()),
            algorithm: self.jwt_algorithm,
            ttl_secs: self.jwt_expires_secs,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_port", &self.api_port)
            .field("store_backend", &self.store_backend)
            .field("db_host", &self.database.get_host())
            .field("db_name", &self.database.get_database())
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("jwt_expires_secs", &self.jwt_expires_secs)
            .field("hash_cost", &self.hash_cost)
            .field("is_production", &self.is_production)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: (&str, &str) = ("JWT_SECRET", "test-secret");

    fn load_exact(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let mut all = vec![SECRET];
        all.extend_from_slice(pairs);
        load_exact(&all)
    }

    #[test]
    fn defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.api_port, 8080);
        assert_eq!(cfg.store_backend, StoreBackend::Postgres);
        assert_eq!(cfg.jwt_algorithm, Algorithm::HS256);
        assert_eq!(cfg.jwt_expires_secs, 86_400);
        assert_eq!(cfg.database.get_host(), "localhost");
        assert_eq!(cfg.database.get_port(), 5432);
        assert_eq!(cfg.database.get_username(), "postgres");
        assert_eq!(cfg.database.get_database(), Some("notes"));
    }

    #[test]
    fn missing_secret_is_fatal_in_every_mode() {
        let err = load_exact(&[("STORE_BACKEND", "memory")]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
        assert!(load_exact(&[("JWT_SECRET", "   ")]).is_err());
        assert!(load_exact(&[("RUST_ENV", "production")]).is_err());
    }

    #[test]
    fn database_parts_are_taken_verbatim() {
        let cfg = load(&[
            ("DB_HOST", "dbhost"),
            ("DB_PORT", "6543"),
            ("DB_USER", "notes"),
            ("DB_PASSWORD", "p@ss/w#rd"),
            ("DB_NAME", "notes_app"),
            ("DB_SSLMODE", "require"),
        ])
        .unwrap();
        assert_eq!(cfg.database.get_host(), "dbhost");
        assert_eq!(cfg.database.get_port(), 6543);
        assert_eq!(cfg.database.get_username(), "notes");
        assert_eq!(cfg.database.get_database(), Some("notes_app"));
        assert!(matches!(cfg.database.get_ssl_mode(), PgSslMode::Require));

        assert!(load(&[("DB_PORT", "x")]).is_err());
        assert!(load(&[("DB_SSLMODE", "sometimes")]).is_err());
    }

    #[test]
    fn database_url_wins_over_parts() {
        let cfg = load(&[
            ("DATABASE_URL", "postgres://u:pw@x:5433/y"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(cfg.database.get_host(), "x");
        assert_eq!(cfg.database.get_port(), 5433);
        assert_eq!(cfg.database.get_database(), Some("y"));

        assert!(load(&[("DATABASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn only_hmac_algorithms_are_accepted() {
        let cfg = load(&[("JWT_ALGORITHM", "HS512")]).unwrap();
        assert_eq!(cfg.jwt_algorithm, Algorithm::HS512);
        assert!(load(&[("JWT_ALGORITHM", "RS256")]).is_err());
        assert!(load(&[("JWT_ALGORITHM", "none")]).is_err());
    }

    #[test]
    fn production_requires_a_strong_secret() {
        assert!(load_exact(&[("RUST_ENV", "production"), ("JWT_SECRET", "short")]).is_err());
        let cfg = load_exact(&[
            ("RUST_ENV", "prod"),
            ("JWT_SECRET", "a-long-enough-production-secret"),
        ])
        .unwrap();
        assert!(cfg.is_production);
    }

    #[test]
    fn rejects_bad_port_and_backend() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("STORE_BACKEND", "redis")]).is_err());
        let cfg = load(&[("PORT", "9000"), ("STORE_BACKEND", "memory")]).unwrap();
        assert_eq!(cfg.api_port, 9000);
        assert_eq!(cfg.store_backend, StoreBackend::Memory);
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let cfg = load_exact(&[
            ("JWT_SECRET", "super-secret-value"),
            ("DB_PASSWORD", "db-password-value"),
        ])
        .unwrap();
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(!printed.contains("db-password-value"));
    }
}
