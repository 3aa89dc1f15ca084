//! JWT session token utilities.
//!
//! Tokens are signed with HS256 using a secret from configuration. The
//! subject is the numeric user id; the `jti` claim gives every issued token a
//! unique identity for log correlation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (numeric user id, as a string)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
}

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token expiration in seconds.
    pub token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance.
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a config from a shared secret.
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        Self::with_leeway(secret, token_expiry_secs, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a config from a shared secret with custom clock-skew leeway.
    pub fn with_leeway(secret: &str, token_expiry_secs: i64, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_secs,
            leeway_secs,
        }
    }

    /// Generates a session token for the given user id.
    ///
    /// Returns the encoded token together with its `jti`.
    pub fn generate_token(&self, user_id: i64) -> Result<(String, String), JwtError> {
        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(self.token_expiry_secs)).timestamp(),
            iat: now.timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Extracts the numeric user id from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<i64, JwtError> {
    claims.sub.parse().map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration as StdDuration;

    fn test_config() -> JwtConfig {
        JwtConfig::with_leeway("segredo_de_teste_para_jwt_1234567890", 900, 0)
    }

    #[test]
    fn test_generate_token() {
        let (token, jti) = test_config().generate_token(1).unwrap();
        assert!(!token.is_empty());
        assert!(!jti.is_empty());
        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    fn test_validate_token_roundtrip() {
        let config = test_config();
        let (token, jti) = config.generate_token(42).unwrap();
        let claims = config.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.jti, jti);
        assert_eq!(extract_user_id(&claims).unwrap(), 42);
    }

    #[test]
    fn test_expired_token() {
        let mut config = test_config();
        config.token_expiry_secs = 1;
        let (token, _) = config.generate_token(1).unwrap();

        sleep(StdDuration::from_secs(2));

        let result = config.validate_token(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = test_config().generate_token(1).unwrap();
        let other = JwtConfig::with_leeway("outro_segredo_completamente_diferente", 900, 0);
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_token() {
        assert!(test_config().validate_token("nao_e_um_jwt").is_err());
        assert!(test_config().validate_token("a.b.c").is_err());
    }

    #[test]
    fn test_unique_jti_per_token() {
        let config = test_config();
        let (_, jti1) = config.generate_token(1).unwrap();
        let (_, jti2) = config.generate_token(1).unwrap();
        assert_ne!(jti1, jti2);
    }

    #[test]
    fn test_claims_timestamps() {
        let config = test_config();
        let before = Utc::now().timestamp();
        let (token, _) = config.generate_token(7).unwrap();
        let after = Utc::now().timestamp();

        let claims = config.validate_token(&token).unwrap();
        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp - claims.iat, config.token_expiry_secs);
    }

    #[test]
    fn test_extract_user_id_rejects_non_numeric() {
        let claims = Claims {
            sub: "abc".to_string(),
            exp: 0,
            iat: 0,
            jti: String::new(),
        };
        assert!(matches!(
            extract_user_id(&claims),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let out = format!("{:?}", test_config());
        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains("segredo_de_teste"));
    }
}
