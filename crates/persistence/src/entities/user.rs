//! User account and permission entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{PermissionFlags, User};

/// Database row mapping for the usuarios table. Carries the password
/// hash and lockout counters, which never cross into the domain model.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub senha_hash: String,
    pub nome: Option<String>,
    pub email: Option<String>,
    pub perfil: String,
    pub status: String,
    pub tentativas_falhas: i32,
    pub bloqueado_ate: Option<DateTime<Utc>>,
    pub ultimo_acesso: Option<DateTime<Utc>>,
    pub criado_em: DateTime<Utc>,
}

impl UserEntity {
    /// True while a lockout window is still running.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.bloqueado_ate.is_some_and(|until| until > now)
    }
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            nome: entity.nome,
            email: entity.email,
            perfil: entity.perfil,
            status: entity.status,
            ultimo_acesso: entity.ultimo_acesso,
            criado_em: entity.criado_em,
        }
    }
}

/// Database row mapping for the permissoes table.
#[derive(Debug, Clone, FromRow)]
pub struct PermissionEntity {
    pub usuario_id: i64,
    pub modulo: String,
    pub leitura: bool,
    pub escrita: bool,
    pub exclusao: bool,
}

impl PermissionEntity {
    pub fn flags(&self) -> PermissionFlags {
        PermissionFlags {
            leitura: self.leitura,
            escrita: self.escrita,
            exclusao: self.exclusao,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_user_entity() -> UserEntity {
        UserEntity {
            id: 1,
            username: "admin".to_string(),
            senha_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            nome: Some("ADMINISTRADOR".to_string()),
            email: None,
            perfil: "ADMIN".to_string(),
            status: "ATIVO".to_string(),
            tentativas_falhas: 0,
            bloqueado_ate: None,
            ultimo_acesso: None,
            criado_em: Utc::now(),
        }
    }

    #[test]
    fn test_user_entity_to_domain_drops_hash() {
        let user: User = create_test_user_entity().into();
        assert_eq!(user.username, "admin");
        assert_eq!(user.perfil, "ADMIN");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("senha"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_is_locked_respects_window() {
        let now = Utc::now();
        let mut entity = create_test_user_entity();
        assert!(!entity.is_locked(now));

        entity.bloqueado_ate = Some(now + Duration::minutes(10));
        assert!(entity.is_locked(now));

        entity.bloqueado_ate = Some(now - Duration::minutes(1));
        assert!(!entity.is_locked(now));
    }

    #[test]
    fn test_permission_entity_flags() {
        let entity = PermissionEntity {
            usuario_id: 1,
            modulo: "FINANCEIRO".to_string(),
            leitura: true,
            escrita: true,
            exclusao: false,
        };
        let flags = entity.flags();
        assert!(flags.leitura && flags.escrita);
        assert!(!flags.exclusao);
    }
}
