//! Audit log repository for database operations.

use sqlx::PgPool;

use domain::models::AuditEvent;

use crate::entities::AuditLogEntity;
use crate::metrics::QueryTimer;

/// Filters accepted by the audit log listing.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub modulo: Option<String>,
    pub tela: Option<String>,
    pub acao: Option<String>,
}

impl AuditLogFilter {
    /// WHERE clause for the active filters, parameters numbered from $1.
    fn where_clause(&self) -> (String, usize) {
        let mut conditions = Vec::new();
        let mut params = 0;

        if self.modulo.is_some() {
            params += 1;
            conditions.push(format!("modulo = ${params}"));
        }
        if self.tela.is_some() {
            params += 1;
            conditions.push(format!("tela = ${params}"));
        }
        if self.acao.is_some() {
            params += 1;
            conditions.push(format!("acao = ${params}"));
        }

        if conditions.is_empty() {
            ("TRUE".to_string(), 0)
        } else {
            (conditions.join(" AND "), params)
        }
    }
}

/// Binds the optional filter values in the same order `where_clause`
/// numbered them.
macro_rules! bind_filter {
    ($builder:expr, $filter:expr) => {{
        let mut b = $builder;
        if let Some(ref modulo) = $filter.modulo {
            b = b.bind(modulo);
        }
        if let Some(ref tela) = $filter.tela {
            b = b.bind(tela);
        }
        if let Some(ref acao) = $filter.acao {
            b = b.bind(acao);
        }
        b
    }};
}

/// Repository for the logs_auditoria table.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one audit entry. Snapshots are serialized to text the way
    /// the predecessor system stored them.
    pub async fn insert(&self, event: &AuditEvent) -> Result<AuditLogEntity, sqlx::Error> {
        let timer = QueryTimer::new("inserir_log_auditoria");
        let dados_anteriores = event.dados_anteriores.as_ref().map(|v| v.to_string());
        let dados_novos = event.dados_novos.as_ref().map(|v| v.to_string());

        let result = sqlx::query_as::<_, AuditLogEntity>(
            r#"
            INSERT INTO logs_auditoria
                (modulo, tela, acao, registro_id, dados_anteriores, dados_novos,
                 ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&event.modulo)
        .bind(&event.tela)
        .bind(event.acao.to_string())
        .bind(event.registro_id)
        .bind(dados_anteriores)
        .bind(dados_novos)
        .bind(&event.ip_address)
        .bind(&event.user_agent)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Entries newest first, filtered and capped.
    pub async fn list(
        &self,
        filter: &AuditLogFilter,
        limit: i64,
    ) -> Result<Vec<AuditLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("listar_logs_auditoria");
        let (where_clause, params) = filter.where_clause();
        let query = format!(
            r#"
            SELECT * FROM logs_auditoria
            WHERE {where_clause}
            ORDER BY criado_em DESC, id DESC
            LIMIT ${}
            "#,
            params + 1
        );

        let builder = sqlx::query_as::<_, AuditLogEntity>(&query);
        let builder = bind_filter!(builder, filter);
        let result = builder.bind(limit).fetch_all(&self.pool).await;
        timer.record();
        result
    }

    /// Full filtered history for CSV export, oldest first so the file
    /// reads chronologically.
    pub async fn list_for_export(
        &self,
        filter: &AuditLogFilter,
        max_records: i64,
    ) -> Result<Vec<AuditLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("exportar_logs_auditoria");
        let (where_clause, params) = filter.where_clause();
        let query = format!(
            r#"
            SELECT * FROM logs_auditoria
            WHERE {where_clause}
            ORDER BY criado_em ASC, id ASC
            LIMIT ${}
            "#,
            params + 1
        );

        let builder = sqlx::query_as::<_, AuditLogEntity>(&query);
        let builder = bind_filter!(builder, filter);
        let result = builder.bind(max_records).fetch_all(&self.pool).await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_with_no_filters() {
        let filter = AuditLogFilter::default();
        let (clause, params) = filter.where_clause();
        assert_eq!(clause, "TRUE");
        assert_eq!(params, 0);
    }

    #[test]
    fn test_where_clause_numbers_parameters_in_order() {
        let filter = AuditLogFilter {
            modulo: Some("FINANCEIRO".to_string()),
            tela: None,
            acao: Some("DELETE".to_string()),
        };
        let (clause, params) = filter.where_clause();
        assert_eq!(clause, "modulo = $1 AND acao = $2");
        assert_eq!(params, 2);
    }

    #[test]
    fn test_where_clause_all_filters() {
        let filter = AuditLogFilter {
            modulo: Some("FINANCEIRO".to_string()),
            tela: Some("BANCOS".to_string()),
            acao: Some("EDIT".to_string()),
        };
        let (clause, params) = filter.where_clause();
        assert_eq!(clause, "modulo = $1 AND tela = $2 AND acao = $3");
        assert_eq!(params, 3);
    }
}
