//! Bank repository for database operations.

use sqlx::PgPool;

use domain::models::BankInput;

use crate::entities::BankEntity;
use crate::metrics::QueryTimer;

/// Repository for the bancos table.
#[derive(Clone)]
pub struct BankRepository {
    pool: PgPool,
}

impl BankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All banks, active first, then by name.
    pub async fn list(&self) -> Result<Vec<BankEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_bancos");
        let result = sqlx::query_as::<_, BankEntity>(
            r#"
            SELECT * FROM bancos
            ORDER BY status ASC, nome_banco ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<BankEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_banco");
        let result = sqlx::query_as::<_, BankEntity>(
            r#"
            SELECT * FROM bancos WHERE id = $1
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
        input: &BankInput,
    ) -> Result<BankEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_banco");
        let result = sqlx::query_as::<_, BankEntity>(
            r#"
            INSERT INTO bancos (codigo, nome_banco, agencia, conta, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(&input.nome_banco)
        .bind(&input.agencia)
        .bind(&input.conta)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Full replacement of a bank. A missing code in the payload keeps
    /// the stored one.
    pub async fn update(
        &self,
        id: i64,
        input: &BankInput,
    ) -> Result<Option<BankEntity>, sqlx::Error> {
        let timer = QueryTimer::new("atualizar_banco");
        let result = sqlx::query_as::<_, BankEntity>(
            r#"
            UPDATE bancos SET
                codigo = COALESCE($2, codigo),
                nome_banco = $3,
                agencia = $4,
                conta = $5,
                status = $6,
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.codigo)
        .bind(&input.nome_banco)
        .bind(&input.agencia)
        .bind(&input.conta)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("excluir_banco");
        let result = sqlx::query(
            r#"
            DELETE FROM bancos WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Financial movements tied to a bank. Deleting a referenced bank
    /// is refused upstream when this is nonzero.
    pub async fn count_movements(&self, bank_id: i64) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("contar_movimentos_banco");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM movimentos_financeiros WHERE banco_id = $1
            "#,
        )
        .bind(bank_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Highest generated code, for the next one in the sequence.
    pub async fn highest_code(&self) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("maior_codigo_banco");
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT codigo FROM bancos
            WHERE codigo ~ '^BCO[0-9]+$'
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
