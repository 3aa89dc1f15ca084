//! Backup configuration and history repository.

use sqlx::PgPool;

use domain::models::{BackupConfigInput, BackupRunInput};

use crate::entities::{BackupConfigEntity, BackupRunEntity};
use crate::metrics::QueryTimer;

/// Repository for the backup_config and backup_historico tables.
#[derive(Clone)]
pub struct BackupRepository {
    pool: PgPool,
}

impl BackupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The installation's backup schedule, if one was ever saved.
    pub async fn get_config(&self) -> Result<Option<BackupConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_backup_config");
        let result = sqlx::query_as::<_, BackupConfigEntity>(
            r#"
            SELECT * FROM backup_config ORDER BY id LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Saves the schedule. The table holds a single row keyed by id 1.
    pub async fn upsert_config(
        &self,
        input: &BackupConfigInput,
    ) -> Result<BackupConfigEntity, sqlx::Error> {
        let timer = QueryTimer::new("salvar_backup_config");
        let result = sqlx::query_as::<_, BackupConfigEntity>(
            r#"
            INSERT INTO backup_config (id, backup_automatico, frequencia, horario, manter_copias, destino)
            VALUES (1, $1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                backup_automatico = EXCLUDED.backup_automatico,
                frequencia = EXCLUDED.frequencia,
                horario = EXCLUDED.horario,
                manter_copias = EXCLUDED.manter_copias,
                destino = EXCLUDED.destino,
                atualizado_em = NOW()
            RETURNING *
            "#,
        )
        .bind(input.backup_automatico)
        .bind(&input.frequencia)
        .bind(&input.horario)
        .bind(input.manter_copias)
        .bind(&input.destino)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_run(&self, id: i64) -> Result<Option<BackupRunEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_backup_historico");
        let result = sqlx::query_as::<_, BackupRunEntity>(
            r#"
            SELECT * FROM backup_historico WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recent runs first.
    pub async fn list_runs(&self, limit: i64) -> Result<Vec<BackupRunEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_backup_historico");
        let result = sqlx::query_as::<_, BackupRunEntity>(
            r#"
            SELECT * FROM backup_historico
            ORDER BY iniciado_em DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn record_run(&self, input: &BackupRunInput) -> Result<BackupRunEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_backup_historico");
        let result = sqlx::query_as::<_, BackupRunEntity>(
            r#"
            INSERT INTO backup_historico
                (nome_arquivo, tamanho_bytes, status, mensagem_erro, iniciado_em, finalizado_em)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), $6)
            RETURNING *
            "#,
        )
        .bind(&input.nome_arquivo)
        .bind(input.tamanho_bytes)
        .bind(&input.status)
        .bind(&input.mensagem_erro)
        .bind(input.iniciado_em)
        .bind(input.finalizado_em)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Drops history entries beyond the configured retention. Returns
    /// how many were removed.
    pub async fn prune_runs(&self, keep: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("podar_backup_historico");
        let result = sqlx::query(
            r#"
            DELETE FROM backup_historico
            WHERE id NOT IN (
                SELECT id FROM backup_historico
                ORDER BY iniciado_em DESC, id DESC
                LIMIT $1
            )
            "#,
        )
        .bind(keep)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
