//! HMAC-signed JWTs carrying the account id and username.
//!
//! The accepted algorithm is a single configured value. A token whose header
//! names anything else is rejected before its signature is looked at.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::application::ports::token_service::{Claims, TokenError, TokenService};
use crate::domain::accounts::account::Account;

pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Clone, Debug)]
pub struct JwtSettings {
    pub secret: Option<String>,
    pub algorithm: Algorithm,
    pub ttl_secs: i64,
}

#[derive(Clone)]
pub struct JwtTokenService {
    secret: Option<Vec<u8>>,
    algorithm: Algorithm,
    ttl_secs: i64,
}

impl JwtTokenService {
    pub fn new(settings: JwtSettings) -> anyhow::Result<Self> {
        anyhow::ensure!(
            HMAC_ALGORITHMS.contains(&settings.algorithm),
            "JWT algorithm {:?} is not a symmetric HMAC algorithm",
            settings.algorithm
        );
        anyhow::ensure!(settings.ttl_secs > 0, "JWT lifetime must be positive");
        let secret = settings
            .secret
            .filter(|s| !s.is_empty())
            .map(String::into_bytes);
        Ok(Self {
            secret,
            algorithm: settings.algorithm,
            ttl_secs: settings.ttl_secs,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn secret(&self) -> Result<&[u8], TokenError> {
        self.secret.as_deref().ok_or(TokenError::MissingSecret)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let secret = self.secret()?;
        jsonwebtoken::encode(
            &Header::new(self.algorithm),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| TokenError::Encoding(e.into()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, account: &Account) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            user_id: account.id,
            sub: account.username.clone(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        self.encode_claims(&claims)
    }

    fn ensure_can_issue(&self) -> Result<(), TokenError> {
        self.secret().map(|_| ())
    }

    fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let secret = self.secret()?;
        let header = jsonwebtoken::decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != self.algorithm {
            return Err(TokenError::UnexpectedAlgorithm);
        }

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
            ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
            _ => TokenError::Malformed,
        })?;
        Ok(data.claims)
    }
}
