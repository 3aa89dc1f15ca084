//! Reconciliation rule entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::ReconciliationRule;

/// Database row mapping for the regras_conciliacao table.
#[derive(Debug, Clone, FromRow)]
pub struct ReconciliationRuleEntity {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub padrao_texto: String,
    pub conta_contabil: Option<String>,
    pub prioridade: i32,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<ReconciliationRuleEntity> for ReconciliationRule {
    fn from(entity: ReconciliationRuleEntity) -> Self {
        Self {
            id: entity.id,
            codigo: entity.codigo,
            descricao: entity.descricao,
            padrao_texto: entity.padrao_texto,
            conta_contabil: entity.conta_contabil,
            prioridade: entity.prioridade,
            status: entity.status,
            criado_em: entity.criado_em,
            atualizado_em: entity.atualizado_em,
        }
    }
}
