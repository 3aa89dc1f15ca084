//! Favorite repository for database operations.

use sqlx::PgPool;

use domain::models::FavoriteInput;

use crate::entities::FavoriteEntity;
use crate::metrics::QueryTimer;

/// Repository for the favoritos table.
#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Favorites of one user in the order they were pinned.
    pub async fn list_by_user(&self, usuario_id: i64) -> Result<Vec<FavoriteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_favoritos");
        let result = sqlx::query_as::<_, FavoriteEntity>(
            r#"
            SELECT * FROM favoritos
            WHERE usuario_id = $1
            ORDER BY criado_em ASC, id ASC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        usuario_id: i64,
        input: &FavoriteInput,
    ) -> Result<FavoriteEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_favorito");
        let result = sqlx::query_as::<_, FavoriteEntity>(
            r#"
            INSERT INTO favoritos (usuario_id, modulo, tela, rota, descricao)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(usuario_id)
        .bind(&input.modulo)
        .bind(&input.tela)
        .bind(&input.rota)
        .bind(&input.descricao)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Removes one favorite. Scoped to the owner so a user cannot unpin
    /// another user's shortcut. Returns the number of rows deleted.
    pub async fn delete(&self, usuario_id: i64, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("excluir_favorito");
        let result = sqlx::query(
            r#"
            DELETE FROM favoritos WHERE id = $1 AND usuario_id = $2
            "#,
        )
        .bind(id)
        .bind(usuario_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
