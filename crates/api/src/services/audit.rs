//! Audit logging service.
//!
//! Applies the per-screen configuration gate and writes entries.
//! Writing is best-effort: a failed insert is logged and never fails the
//! operation that triggered it.

use sqlx::PgPool;

use domain::models::{audit_allowed, AuditEvent, AuditLogConfig};
use persistence::repositories::{AuditConfigRepository, AuditLogRepository};

use crate::middleware::metrics::record_audit_entry;

/// Writes audit entries subject to the per-screen configuration.
#[derive(Clone)]
pub struct AuditLogger {
    configs: AuditConfigRepository,
    logs: AuditLogRepository,
}

impl AuditLogger {
    pub fn new(pool: PgPool) -> Self {
        Self {
            configs: AuditConfigRepository::new(pool.clone()),
            logs: AuditLogRepository::new(pool),
        }
    }

    /// Records one event if the screen's configuration allows it.
    ///
    /// Never returns an error: an unreadable configuration falls back to
    /// logging (fail-open), and an insert failure only produces a trace.
    pub async fn log(&self, event: AuditEvent) {
        let config: Option<AuditLogConfig> = match self.configs.find(&event.modulo, &event.tela).await
        {
            Ok(found) => found.map(Into::into),
            Err(err) => {
                tracing::warn!(
                    modulo = %event.modulo,
                    tela = %event.tela,
                    "Failed to load audit config, proceeding fail-open: {}",
                    err
                );
                None
            }
        };

        if !audit_allowed(config.as_ref(), event.acao) {
            tracing::debug!(
                modulo = %event.modulo,
                tela = %event.tela,
                acao = %event.acao,
                "Audit entry suppressed by configuration"
            );
            return;
        }

        let modulo = event.modulo.clone();
        match self.logs.insert(&event).await {
            Ok(entity) => {
                record_audit_entry(&modulo);
                tracing::debug!(
                    id = entity.id,
                    modulo = %modulo,
                    tela = %event.tela,
                    acao = %event.acao,
                    "Audit entry recorded"
                );
            }
            Err(err) => {
                tracing::error!(
                    modulo = %modulo,
                    tela = %event.tela,
                    acao = %event.acao,
                    "Failed to record audit entry: {}",
                    err
                );
            }
        }
    }
}
