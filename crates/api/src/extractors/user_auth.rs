//! Session token authentication extractor.
//!
//! Validates the Bearer token on routes that need the caller's identity
//! (the favorites family).

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use shared::jwt::{extract_user_id, JwtConfig};

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user information from the session token.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User id from the subject claim.
    pub user_id: i64,
    /// Token id (jti) for log correlation.
    pub jti: String,
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized("Token de acesso ausente".to_string()))?;

        let jwt = JwtConfig::new(
            &state.config.security.jwt_secret,
            state.config.security.token_expiry_secs,
        );

        let claims = jwt
            .validate_token(bearer.token())
            .map_err(|_| ApiError::Unauthorized("Token inválido ou expirado".to_string()))?;

        let user_id = extract_user_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Token inválido ou expirado".to_string()))?;

        Ok(UserAuth {
            user_id,
            jti: claims.jti,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_auth_struct() {
        let auth = UserAuth {
            user_id: 7,
            jti: "test_jti".to_string(),
        };
        assert_eq!(auth.user_id, 7);
        assert!(!auth.jti.is_empty());
    }

    #[test]
    fn test_user_auth_clone() {
        let auth = UserAuth {
            user_id: 1,
            jti: "test_jti".to_string(),
        };
        let cloned = auth.clone();
        assert_eq!(auth.user_id, cloned.user_id);
        assert_eq!(auth.jti, cloned.jti);
    }
}
