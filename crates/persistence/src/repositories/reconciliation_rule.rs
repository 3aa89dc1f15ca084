//! Reconciliation rule repository for database operations.

use sqlx::PgPool;

use domain::models::ReconciliationRuleInput;

use crate::entities::ReconciliationRuleEntity;
use crate::metrics::QueryTimer;

/// Repository for the regras_conciliacao table.
#[derive(Clone)]
pub struct ReconciliationRuleRepository {
    pool: PgPool,
}

impl ReconciliationRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All rules, active first, in match priority order.
    pub async fn list(&self) -> Result<Vec<ReconciliationRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_regras_conciliacao");
        let result = sqlx::query_as::<_, ReconciliationRuleEntity>(
            r#"
            SELECT * FROM regras_conciliacao
            ORDER BY status ASC, prioridade ASC, descricao ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<ReconciliationRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_regra_conciliacao");
        let result = sqlx::query_as::<_, ReconciliationRuleEntity>(
            r#"
            SELECT * FROM regras_conciliacao WHERE id = $1
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
        input: &ReconciliationRuleInput,
    ) -> Result<ReconciliationRuleEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_regra_conciliacao");
        let result = sqlx::query_as::<_, ReconciliationRuleEntity>(
            r#"
            INSERT INTO regras_conciliacao
                (codigo, descricao, padrao_texto, conta_contabil, prioridade, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(&input.descricao)
        .bind(&input.padrao_texto)
        .bind(&input.conta_contabil)
        .bind(input.prioridade)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        input: &ReconciliationRuleInput,
    ) -> Result<Option<ReconciliationRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("atualizar_regra_conciliacao");
        let result = sqlx::query_as::<_, ReconciliationRuleEntity>(
            r#"
            UPDATE regras_conciliacao SET
                codigo = COALESCE($2, codigo),
                descricao = $3,
                padrao_texto = $4,
                conta_contabil = $5,
                prioridade = $6,
                status = $7,
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.codigo)
        .bind(&input.descricao)
        .bind(&input.padrao_texto)
        .bind(&input.conta_contabil)
        .bind(input.prioridade)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("excluir_regra_conciliacao");
        let result = sqlx::query(
            r#"
            DELETE FROM regras_conciliacao WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    pub async fn highest_code(&self) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("maior_codigo_regra_conciliacao");
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT codigo FROM regras_conciliacao
            WHERE codigo ~ '^RGC[0-9]+$'
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
