//! Employee repository for database operations.

use sqlx::PgPool;

use domain::models::EmployeeInput;

use crate::entities::EmployeeEntity;
use crate::metrics::QueryTimer;

/// Repository for the funcionarios table.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All employees, active first, then by name.
    pub async fn list(&self) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_funcionarios");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT * FROM funcionarios
            ORDER BY status ASC, nome ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_funcionario");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT * FROM funcionarios WHERE id = $1
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
        input: &EmployeeInput,
    ) -> Result<EmployeeEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_funcionario");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            INSERT INTO funcionarios (codigo, nome, cpf, cargo, departamento, telefone, email, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(&input.nome)
        .bind(&input.cpf)
        .bind(&input.cargo)
        .bind(&input.departamento)
        .bind(&input.telefone)
        .bind(&input.email)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Full replacement of an employee. A missing code in the payload
    /// keeps the stored one.
    pub async fn update(
        &self,
        id: i64,
        input: &EmployeeInput,
    ) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("atualizar_funcionario");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            UPDATE funcionarios SET
                codigo = COALESCE($2, codigo),
                nome = $3,
                cpf = $4,
                cargo = $5,
                departamento = $6,
                telefone = $7,
                email = $8,
                status = $9,
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.codigo)
        .bind(&input.nome)
        .bind(&input.cpf)
        .bind(&input.cargo)
        .bind(&input.departamento)
        .bind(&input.telefone)
        .bind(&input.email)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("excluir_funcionario");
        let result = sqlx::query(
            r#"
            DELETE FROM funcionarios WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Highest generated code, for the next one in the sequence. Length
    /// sorts before text so five digit sequences rank above four digit
    /// ones.
    pub async fn highest_code(&self) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("maior_codigo_funcionario");
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT codigo FROM funcionarios
            WHERE codigo ~ '^FUN[0-9]+$'
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
