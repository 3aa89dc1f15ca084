//! Payment term repository for database operations.

use sqlx::PgPool;

use domain::models::PaymentTermInput;

use crate::entities::PaymentTermEntity;
use crate::metrics::QueryTimer;

/// Repository for the condicoes_pagamento table.
#[derive(Clone)]
pub struct PaymentTermRepository {
    pool: PgPool,
}

impl PaymentTermRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PaymentTermEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_condicoes_pagamento");
        let result = sqlx::query_as::<_, PaymentTermEntity>(
            r#"
            SELECT * FROM condicoes_pagamento
            ORDER BY status ASC, descricao ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PaymentTermEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_condicao_pagamento");
        let result = sqlx::query_as::<_, PaymentTermEntity>(
            r#"
            SELECT * FROM condicoes_pagamento WHERE id = $1
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
        input: &PaymentTermInput,
    ) -> Result<PaymentTermEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_condicao_pagamento");
        let result = sqlx::query_as::<_, PaymentTermEntity>(
            r#"
            INSERT INTO condicoes_pagamento (codigo, descricao, parcelas, intervalo_dias, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(&input.descricao)
        .bind(input.parcelas)
        .bind(input.intervalo_dias)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        input: &PaymentTermInput,
    ) -> Result<Option<PaymentTermEntity>, sqlx::Error> {
        let timer = QueryTimer::new("atualizar_condicao_pagamento");
        let result = sqlx::query_as::<_, PaymentTermEntity>(
            r#"
            UPDATE condicoes_pagamento SET
                codigo = COALESCE($2, codigo),
                descricao = $3,
                parcelas = $4,
                intervalo_dias = $5,
                status = $6,
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.codigo)
        .bind(&input.descricao)
        .bind(input.parcelas)
        .bind(input.intervalo_dias)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("excluir_condicao_pagamento");
        let result = sqlx::query(
            r#"
            DELETE FROM condicoes_pagamento WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    pub async fn highest_code(&self) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("maior_codigo_condicao_pagamento");
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT codigo FROM condicoes_pagamento
            WHERE codigo ~ '^CPG[0-9]+$'
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
