//! Login handling.
//!
//! Credential checks run against the usuarios table; repeated failures
//! lock the account. Successful logins hand back a session token plus
//! the user's per-module permission grants.

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;

use domain::models::{admin_permissions, PermissionMap, User, PERFIL_ADMIN};
use persistence::repositories::UserRepository;
use shared::jwt::JwtConfig;
use shared::password::{hash_password, needs_rehash, verify_password};

use crate::config::SecurityConfig;
use crate::middleware::metrics::record_login_outcome;

/// Why a login attempt was turned away.
///
/// Every rejection maps to 401; the variants exist so the handler can
/// phrase the message and the logs can tell the cases apart.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Usuário inativo")]
    InactiveUser,

    #[error("Usuário bloqueado por excesso de tentativas")]
    LockedOut,

    #[error("Authentication failure: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Internal(format!("Database error: {}", err))
    }
}

/// Outcome of a successful login.
#[derive(Debug)]
pub struct LoginSuccess {
    pub token: String,
    pub jti: String,
    pub usuario: User,
    pub permissoes: PermissionMap,
}

/// Validates credentials and issues session tokens.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
    max_failed_logins: i32,
    lockout_minutes: i32,
}

impl AuthService {
    pub fn new(pool: PgPool, security: &SecurityConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt: JwtConfig::new(&security.jwt_secret, security.token_expiry_secs),
            max_failed_logins: security.max_failed_logins,
            lockout_minutes: security.lockout_minutes,
        }
    }

    /// Runs one login attempt.
    ///
    /// Order of checks: unknown user, inactive status, lockout, then the
    /// password itself. A locked account is rejected before the password
    /// is looked at, so its attempt counter never moves. A wrong
    /// password counts one failure exactly; a correct one resets the
    /// counter and stamps the access time.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginSuccess, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            record_login_outcome("unknown_user");
            tracing::info!(username = %username, "Login rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if user.status != "ATIVO" {
            record_login_outcome("inactive");
            tracing::info!(user_id = user.id, "Login rejected: inactive user");
            return Err(AuthError::InactiveUser);
        }

        if user.tentativas_falhas >= self.max_failed_logins || user.is_locked(Utc::now()) {
            record_login_outcome("locked");
            tracing::warn!(
                user_id = user.id,
                tentativas = user.tentativas_falhas,
                "Login rejected: account locked"
            );
            return Err(AuthError::LockedOut);
        }

        let password_ok = verify_password(password, &user.senha_hash)
            .map_err(|e| AuthError::Internal(format!("Password verification failed: {}", e)))?;

        if !password_ok {
            let attempts = self
                .users
                .record_failed_login(user.id, self.max_failed_logins, self.lockout_minutes)
                .await?;
            record_login_outcome("bad_password");
            tracing::info!(
                user_id = user.id,
                tentativas = attempts,
                "Login rejected: wrong password"
            );
            return Err(AuthError::InvalidCredentials);
        }

        // Legacy SHA-256 digests are upgraded in place after a successful
        // check. A failed upgrade must not fail the login.
        if needs_rehash(&user.senha_hash) {
            match hash_password(password) {
                Ok(new_hash) => {
                    if let Err(err) = self.users.update_password_hash(user.id, &new_hash).await {
                        tracing::warn!(user_id = user.id, "Password hash upgrade failed: {}", err);
                    } else {
                        tracing::info!(user_id = user.id, "Password hash upgraded to Argon2id");
                    }
                }
                Err(err) => {
                    tracing::warn!(user_id = user.id, "Password re-hash failed: {}", err);
                }
            }
        }

        self.users.record_successful_login(user.id).await?;

        let permissoes = if user.perfil == PERFIL_ADMIN {
            admin_permissions()
        } else {
            self.users
                .permissions_for(user.id)
                .await?
                .into_iter()
                .map(|p| {
                    let flags = p.flags();
                    (p.modulo, flags)
                })
                .collect()
        };

        let (token, jti) = self
            .jwt
            .generate_token(user.id)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        record_login_outcome("success");
        tracing::info!(user_id = user.id, "Login succeeded");

        Ok(LoginSuccess {
            token,
            jti,
            usuario: user.into(),
            permissoes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Credenciais inválidas"
        );
        assert_eq!(AuthError::InactiveUser.to_string(), "Usuário inativo");
        assert_eq!(
            AuthError::LockedOut.to_string(),
            "Usuário bloqueado por excesso de tentativas"
        );
    }

    #[test]
    fn test_sqlx_error_becomes_internal() {
        let err: AuthError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
