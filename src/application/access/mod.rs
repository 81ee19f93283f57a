use crate::application::ports::token_service::{TokenError, TokenService};
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::me::GetMe;
use crate::domain::accounts::account::Account;

/// Caller identity resolved from a bearer token, valid for one request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub account: Account,
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("authorization required")]
    MissingCredentials,
    #[error("invalid token format")]
    MalformedHeader,
    #[error("invalid token: {0}")]
    InvalidToken(#[source] TokenError),
    #[error("user not found")]
    UnknownUser,
    #[error("failed to load user")]
    Store(#[source] anyhow::Error),
}

// Presentation layer reads the header; this module only sees its value.

/// Accepts exactly `Bearer <token>`: two space-separated parts, scheme
/// spelled as-is.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AccessError> {
    let header = match header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AccessError::MissingCredentials),
    };
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AccessError::MalformedHeader),
    }
}

pub async fn authenticate<T, R>(
    tokens: &T,
    users: &R,
    header: Option<&str>,
) -> Result<AuthenticatedUser, AccessError>
where
    T: TokenService + ?Sized,
    R: UserRepository + ?Sized,
{
    let token = parse_bearer(header)?;
    let claims = tokens.validate(token).map_err(AccessError::InvalidToken)?;
    let account = GetMe { repo: users }
        .execute(claims.user_id)
        .await
        .map_err(AccessError::Store)?
        .ok_or(AccessError::UnknownUser)?;
    Ok(AuthenticatedUser {
        id: account.id,
        account,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::token_service::Claims;
    use crate::infrastructure::memory::InMemoryUserRepository;

    struct FixedTokens;

    impl TokenService for FixedTokens {
        fn issue(&self, account: &Account) -> Result<String, TokenError> {
            Ok(format!("token-{}", account.id))
        }

        fn validate(&self, token: &str) -> Result<Claims, TokenError> {
            let id = token
                .strip_prefix("token-")
                .and_then(|s| s.parse().ok())
                .ok_or(TokenError::Malformed)?;
            Ok(Claims {
                user_id: id,
                sub: String::new(),
                iat: 0,
                exp: 0,
            })
        }
    }

    #[test]
    fn bearer_header_shapes() {
        assert!(matches!(
            parse_bearer(None),
            Err(AccessError::MissingCredentials)
        ));
        assert!(matches!(
            parse_bearer(Some("")),
            Err(AccessError::MissingCredentials)
        ));
        assert_eq!(parse_bearer(Some("Bearer abc")).unwrap(), "abc");
        for bad in ["abc", "bearer abc", "Bearer", "Bearer ", "Bearer a b", "Basic abc"] {
            assert!(
                matches!(parse_bearer(Some(bad)), Err(AccessError::MalformedHeader)),
                "{bad}"
            );
        }
    }

    #[tokio::test]
    async fn resolves_existing_account() {
        let users = InMemoryUserRepository::default();
        let account = users
            .create_user("alice", "alice@example.com", "hash")
            .await
            .unwrap();

        let who = authenticate(&FixedTokens, &users, Some(&format!("Bearer token-{}", account.id)))
            .await
            .unwrap();
        assert_eq!(who.id, account.id);
        assert_eq!(who.account.username, "alice");
    }

    #[tokio::test]
    async fn rejects_token_for_missing_account() {
        let users = InMemoryUserRepository::default();
        let err = authenticate(&FixedTokens, &users, Some("Bearer token-42"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::UnknownUser));
    }

    #[tokio::test]
    async fn rejects_invalid_token() {
        let users = InMemoryUserRepository::default();
        let err = authenticate(&FixedTokens, &users, Some("Bearer garbage"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::InvalidToken(TokenError::Malformed)));
        assert_eq!(err.to_string(), "invalid token: malformed token");
    }
}
