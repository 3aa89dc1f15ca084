//! Login route.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientMeta;
use crate::services::{AuditLogger, AuthError, AuthService};
use domain::models::audit::{modulos, telas};
use domain::models::{AuditAction, AuditEvent};
use shared::rows::to_safe_value;

/// Credentials accepted by the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authenticates a user and issues a session token.
///
/// Every rejection maps to 401 with the reason in the body; the attempt
/// counter and lockout behavior live in the auth service.
pub async fn login(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = AuthService::new(state.pool.clone(), &state.config.security);
    let success = service
        .login(payload.username.trim(), &payload.password)
        .await
        .map_err(|err| match err {
            AuthError::InvalidCredentials | AuthError::InactiveUser | AuthError::LockedOut => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Internal(detail) => ApiError::Internal(detail),
        })?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::SISTEMA, telas::LOGIN, AuditAction::View)
                .registro(success.usuario.id)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({
        "success": true,
        "token": success.token,
        "usuario": to_safe_value(&success.usuario)?,
        "permissoes": success.permissoes,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_parses() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username": "maria", "password": "s3nh4"}"#).unwrap();
        assert_eq!(request.username, "maria");
        assert_eq!(request.password, "s3nh4");
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        assert!(serde_json::from_str::<LoginRequest>(r#"{"username": "maria"}"#).is_err());
        assert!(serde_json::from_str::<LoginRequest>(r#"{"password": "x"}"#).is_err());
    }
}
