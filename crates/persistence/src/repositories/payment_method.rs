//! Payment method repository for database operations.

use sqlx::PgPool;

use domain::models::PaymentMethodInput;

use crate::entities::PaymentMethodEntity;
use crate::metrics::QueryTimer;

/// Repository for the formas_pagamento table.
#[derive(Clone)]
pub struct PaymentMethodRepository {
    pool: PgPool,
}

impl PaymentMethodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PaymentMethodEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_formas_pagamento");
        let result = sqlx::query_as::<_, PaymentMethodEntity>(
            r#"
            SELECT * FROM formas_pagamento
            ORDER BY status ASC, descricao ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PaymentMethodEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_forma_pagamento");
        let result = sqlx::query_as::<_, PaymentMethodEntity>(
            r#"
            SELECT * FROM formas_pagamento WHERE id = $1
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
        input: &PaymentMethodInput,
    ) -> Result<PaymentMethodEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_forma_pagamento");
        let result = sqlx::query_as::<_, PaymentMethodEntity>(
            r#"
            INSERT INTO formas_pagamento (codigo, descricao, tipo, taxa_percentual, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(&input.descricao)
        .bind(&input.tipo)
        .bind(input.taxa_percentual)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        input: &PaymentMethodInput,
    ) -> Result<Option<PaymentMethodEntity>, sqlx::Error> {
        let timer = QueryTimer::new("atualizar_forma_pagamento");
        let result = sqlx::query_as::<_, PaymentMethodEntity>(
            r#"
            UPDATE formas_pagamento SET
                codigo = COALESCE($2, codigo),
                descricao = $3,
                tipo = $4,
                taxa_percentual = $5,
                status = $6,
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.codigo)
        .bind(&input.descricao)
        .bind(&input.tipo)
        .bind(input.taxa_percentual)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("excluir_forma_pagamento");
        let result = sqlx::query(
            r#"
            DELETE FROM formas_pagamento WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    pub async fn highest_code(&self) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("maior_codigo_forma_pagamento");
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT codigo FROM formas_pagamento
            WHERE codigo ~ '^FPG[0-9]+$'
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
