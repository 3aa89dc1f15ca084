//! Audit configuration repository.

use sqlx::PgPool;

use crate::entities::AuditLogConfigEntity;
use crate::metrics::QueryTimer;

/// One row of the audit configuration grid as submitted by the admin
/// screen.
#[derive(Debug, Clone)]
pub struct AuditConfigUpsert {
    pub modulo: String,
    pub tela: String,
    pub log_ativo: bool,
    pub log_visualizar: bool,
    pub log_criar: bool,
    pub log_editar: bool,
    pub log_excluir: bool,
}

/// Repository for the config_logs_auditoria table.
#[derive(Clone)]
pub struct AuditConfigRepository {
    pool: PgPool,
}

impl AuditConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every configured module and screen pair.
    pub async fn list(&self) -> Result<Vec<AuditLogConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_config_auditoria");
        let result = sqlx::query_as::<_, AuditLogConfigEntity>(
            r#"
            SELECT * FROM config_logs_auditoria
            ORDER BY modulo ASC, tela ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The configuration covering one module and screen pair, if any.
    pub async fn find(
        &self,
        modulo: &str,
        tela: &str,
    ) -> Result<Option<AuditLogConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("buscar_config_auditoria");
        let result = sqlx::query_as::<_, AuditLogConfigEntity>(
            r#"
            SELECT * FROM config_logs_auditoria
            WHERE modulo = $1 AND tela = $2
            "#,
        )
        .bind(modulo)
        .bind(tela)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Saves the whole grid in one transaction so a failed row does not
    /// leave the configuration half applied.
    pub async fn upsert_many(
        &self,
        configs: &[AuditConfigUpsert],
    ) -> Result<Vec<AuditLogConfigEntity>, sqlx::Error> {
        let timer = QueryTimer::new("salvar_config_auditoria");
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(configs.len());

        for config in configs {
            let entity = sqlx::query_as::<_, AuditLogConfigEntity>(
                r#"
                INSERT INTO config_logs_auditoria
                    (modulo, tela, log_ativo, log_visualizar, log_criar, log_editar, log_excluir)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (modulo, tela) DO UPDATE SET
                    log_ativo = EXCLUDED.log_ativo,
                    log_visualizar = EXCLUDED.log_visualizar,
                    log_criar = EXCLUDED.log_criar,
                    log_editar = EXCLUDED.log_editar,
                    log_excluir = EXCLUDED.log_excluir
                RETURNING *
                "#,
            )
            .bind(&config.modulo)
            .bind(&config.tela)
            .bind(config.log_ativo)
            .bind(config.log_visualizar)
            .bind(config.log_criar)
            .bind(config.log_editar)
            .bind(config.log_excluir)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(entity);
        }

        tx.commit().await?;
        timer.record();
        Ok(saved)
    }
}
