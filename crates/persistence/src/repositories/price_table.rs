//! Price table repository for database operations.

use sqlx::PgPool;

use domain::models::PriceTableInput;

use crate::entities::PriceTableEntity;
use crate::metrics::QueryTimer;

/// Repository for the tabelas_preco table.
#[derive(Clone)]
pub struct PriceTableRepository {
    pool: PgPool,
}

impl PriceTableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PriceTableEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_tabelas_preco");
        let result = sqlx::query_as::<_, PriceTableEntity>(
            r#"
            SELECT * FROM tabelas_preco
            ORDER BY status ASC, descricao ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PriceTableEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_tabela_preco");
        let result = sqlx::query_as::<_, PriceTableEntity>(
            r#"
            SELECT * FROM tabelas_preco WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        codigo: &str,
        input: &PriceTableInput,
    ) -> Result<PriceTableEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_tabela_preco");
        let result = sqlx::query_as::<_, PriceTableEntity>(
            r#"
            INSERT INTO tabelas_preco (codigo, descricao, percentual_ajuste, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(&input.descricao)
        .bind(input.percentual_ajuste)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        input: &PriceTableInput,
    ) -> Result<Option<PriceTableEntity>, sqlx::Error> {
        let timer = QueryTimer::new("atualizar_tabela_preco");
        let result = sqlx::query_as::<_, PriceTableEntity>(
            r#"
            UPDATE tabelas_preco SET
                codigo = COALESCE($2, codigo),
                descricao = $3,
                percentual_ajuste = $4,
                status = $5,
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.codigo)
        .bind(&input.descricao)
        .bind(input.percentual_ajuste)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("excluir_tabela_preco");
        let result = sqlx::query(
            r#"
            DELETE FROM tabelas_preco WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    pub async fn highest_code(&self) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("maior_codigo_tabela_preco");
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT codigo FROM tabelas_preco
            WHERE codigo ~ '^TBP[0-9]+$'
            ORDER BY LENGTH(codigo) DESC, codigo DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(row.map(|(codigo,)| codigo))
    }
}
