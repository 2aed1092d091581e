pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

pub use password::{hash_password, verify_password, PasswordError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            username: username.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("JWT token has no username")]
    MissingUsername,
}

/// Signs and verifies HS256 bearer tokens with a single shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: u64,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Issue a token binding `username` for the configured validity window
    pub fn issue(&self, username: &str) -> Result<String, JwtError> {
        self.sign(&Claims::new(username, self.expiry_hours))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry, returning the username claim
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        let username = token_data.claims.username;
        if username.is_empty() {
            return Err(JwtError::MissingUsername);
        }
        Ok(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 24).unwrap()
    }

    #[test]
    fn issued_token_recovers_username() {
        let issuer = issuer();
        let token = issuer.issue("user1").unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), "user1");
    }

    #[test]
    fn token_expires_after_validity_window() {
        let claims = Claims::new("user1", 24);
        let now = Utc::now().timestamp();
        assert!(claims.exp > now + 23 * 3600);
        assert!(claims.exp <= now + 24 * 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer();
        let claims = Claims {
            username: "user1".to_string(),
            exp: Utc::now().timestamp() - 60,
            iat: Utc::now().timestamp() - 3600,
        };
        let token = issuer.sign(&claims).unwrap();
        assert!(matches!(issuer.verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenIssuer::new("another-secret", 24).unwrap();
        let token = other.issue("user1").unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(issuer().verify("not.a.jwt").is_err());
        assert!(issuer().verify("").is_err());
    }

    #[test]
    fn empty_username_claim_is_rejected() {
        let issuer = issuer();
        let token = issuer.sign(&Claims::new("", 1)).unwrap();
        assert!(matches!(issuer.verify(&token), Err(JwtError::MissingUsername)));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(TokenIssuer::new("", 24), Err(JwtError::InvalidSecret)));
    }
}
