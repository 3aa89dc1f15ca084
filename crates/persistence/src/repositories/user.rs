//! User repository for database operations.

use sqlx::PgPool;

use crate::entities::{PermissionEntity, UserEntity};
use crate::metrics::QueryTimer;

/// Repository for the usuarios and permissoes tables.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_usuario");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM usuarios WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_usuario_por_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM usuarios WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts one failed attempt and starts the lockout window once the
    /// threshold is reached. Returns the updated attempt count.
    pub async fn record_failed_login(
        &self,
        id: i64,
        max_attempts: i32,
        lockout_minutes: i32,
    ) -> Result<i32, sqlx::Error> {
        let timer = QueryTimer::new("registrar_falha_login");
        let row: (i32,) = sqlx::query_as(
            r#"
            UPDATE usuarios SET
                tentativas_falhas = tentativas_falhas + 1,
                bloqueado_ate = CASE
                    WHEN tentativas_falhas + 1 >= $2
                        THEN NOW() + make_interval(mins => $3)
                    ELSE bloqueado_ate
                END
            WHERE id = $1
            RETURNING tentativas_falhas
            "#,
        )
        .bind(id)
        .bind(max_attempts)
        .bind(lockout_minutes)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(row.0)
    }

    /// Clears lockout state and stamps the login time.
    pub async fn record_successful_login(&self, id: i64) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("registrar_login");
        sqlx::query(
            r#"
            UPDATE usuarios SET
                tentativas_falhas = 0,
                bloqueado_ate = NULL,
                ultimo_acesso = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Swaps the stored hash, used when a legacy digest is upgraded.
    pub async fn update_password_hash(&self, id: i64, hash: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("atualizar_senha_usuario");
        sqlx::query(
            r#"
            UPDATE usuarios SET senha_hash = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(hash)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Per-module permission rows for a user.
    pub async fn permissions_for(
        &self,
        usuario_id: i64,
    ) -> Result<Vec<PermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_permissoes_usuario");
        let result = sqlx::query_as::<_, PermissionEntity>(
            r#"
            SELECT usuario_id, modulo, leitura, escrita, exclusao
            FROM permissoes
            WHERE usuario_id = $1
            ORDER BY modulo ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
