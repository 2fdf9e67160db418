use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::Claims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The request carried no token at all.
    #[error("no token in request")]
    Missing,

    /// Signature, shape, or expiry check failed.
    #[error("invalid token")]
    Invalid,
}

/// Verify an HS256-signed token against `secret` and return its claims.
///
/// The secret is an explicit parameter so tests can inject fixtures; the
/// binary wires it from configuration. Every decode failure collapses to
/// [`TokenError::Invalid`] so callers never leak which check failed.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    let validation = Validation::new(Algorithm::HS256);
    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn mint(secret: &[u8], exp_offset: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            uid: "u-1".to_string(),
            name: "Test User".to_string(),
            role: "admin".to_string(),
            iat: now.timestamp(),
            exp: (now + exp_offset).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .expect("failed to encode token")
    }

    #[test]
    fn valid_token_yields_claims() {
        let token = mint(b"fixture-secret", Duration::minutes(10));
        let claims = verify_token(&token, b"fixture-secret").unwrap();
        assert_eq!(claims.uid, "u-1");
        assert_eq!(claims.name, "Test User");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = mint(b"fixture-secret", Duration::minutes(10));
        assert_eq!(verify_token(&token, b"other-secret"), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_token_is_invalid() {
        let token = mint(b"fixture-secret", Duration::minutes(-10));
        assert_eq!(verify_token(&token, b"fixture-secret"), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(verify_token("not-a-token", b"fixture-secret"), Err(TokenError::Invalid));
    }
}
