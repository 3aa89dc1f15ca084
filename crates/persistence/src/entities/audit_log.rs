//! Audit log and audit configuration entities (database row mappings).

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

use domain::models::{AuditLogConfig, AuditLogEntry};

/// Database row mapping for the logs_auditoria table.
///
/// Snapshots are stored as serialized JSON text, the format the
/// predecessor system wrote, so old rows keep reading back.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogEntity {
    pub id: i64,
    pub modulo: String,
    pub tela: String,
    pub acao: String,
    pub registro_id: Option<i64>,
    pub dados_anteriores: Option<String>,
    pub dados_novos: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub criado_em: DateTime<Utc>,
}

impl From<AuditLogEntity> for AuditLogEntry {
    fn from(entity: AuditLogEntity) -> Self {
        Self {
            id: entity.id,
            modulo: entity.modulo,
            tela: entity.tela,
            acao: entity.acao,
            registro_id: entity.registro_id,
            dados_anteriores: entity.dados_anteriores.map(parse_snapshot),
            dados_novos: entity.dados_novos.map(parse_snapshot),
            ip_address: entity.ip_address,
            user_agent: entity.user_agent,
            criado_em: entity.criado_em,
        }
    }
}

/// Stored snapshots are normally JSON; rows written by hand or by very
/// old versions may hold plain text, which is surfaced as a string.
fn parse_snapshot(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

/// Database row mapping for the config_logs_auditoria table.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogConfigEntity {
    pub id: i64,
    pub modulo: String,
    pub tela: String,
    pub log_ativo: bool,
    pub log_visualizar: bool,
    pub log_criar: bool,
    pub log_editar: bool,
    pub log_excluir: bool,
}

impl From<AuditLogConfigEntity> for AuditLogConfig {
    fn from(entity: AuditLogConfigEntity) -> Self {
        Self {
            id: entity.id,
            modulo: entity.modulo,
            tela: entity.tela,
            log_ativo: entity.log_ativo,
            log_visualizar: entity.log_visualizar,
            log_criar: entity.log_criar,
            log_editar: entity.log_editar,
            log_excluir: entity.log_excluir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_audit_log_entity() -> AuditLogEntity {
        AuditLogEntity {
            id: 100,
            modulo: "FINANCEIRO".to_string(),
            tela: "BANCOS".to_string(),
            acao: "EDIT".to_string(),
            registro_id: Some(3),
            dados_anteriores: Some(r#"{"agencia":"0001"}"#.to_string()),
            dados_novos: Some(r#"{"agencia":"0002"}"#.to_string()),
            ip_address: Some("10.0.0.7".to_string()),
            user_agent: None,
            criado_em: Utc::now(),
        }
    }

    #[test]
    fn test_audit_log_entity_parses_snapshots() {
        let entry: AuditLogEntry = create_test_audit_log_entity().into();
        assert_eq!(entry.dados_anteriores, Some(json!({"agencia": "0001"})));
        assert_eq!(entry.dados_novos, Some(json!({"agencia": "0002"})));
    }

    #[test]
    fn test_audit_log_entity_keeps_plain_text_snapshot() {
        let mut entity = create_test_audit_log_entity();
        entity.dados_anteriores = Some("registro legado".to_string());
        let entry: AuditLogEntry = entity.into();
        assert_eq!(
            entry.dados_anteriores,
            Some(Value::String("registro legado".to_string()))
        );
    }

    #[test]
    fn test_audit_config_entity_to_domain() {
        let entity = AuditLogConfigEntity {
            id: 1,
            modulo: "FINANCEIRO".to_string(),
            tela: "BANCOS".to_string(),
            log_ativo: true,
            log_visualizar: false,
            log_criar: true,
            log_editar: true,
            log_excluir: true,
        };
        let config: AuditLogConfig = entity.into();
        assert!(config.log_ativo);
        assert!(!config.log_visualizar);
    }
}
