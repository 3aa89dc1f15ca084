//! Audit log domain models and gating rules.
//!
//! Every mutating handler records what changed, where, and by which client.
//! Whether an entry is actually persisted is governed by the per-screen
//! configuration table; a missing configuration row means logging proceeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;

/// Module identifiers used in audit entries and configuration rows.
pub mod modulos {
    pub const ADMINISTRATIVO: &str = "ADMINISTRATIVO";
    pub const FINANCEIRO: &str = "FINANCEIRO";
    pub const COMERCIAL: &str = "COMERCIAL";
    pub const SISTEMA: &str = "SISTEMA";
}

/// Screen identifiers used in audit entries and configuration rows.
pub mod telas {
    pub const FUNCIONARIOS: &str = "FUNCIONARIOS";
    pub const BANCOS: &str = "BANCOS";
    pub const CONDICOES_PAGAMENTO: &str = "CONDICOES_PAGAMENTO";
    pub const FORMAS_PAGAMENTO: &str = "FORMAS_PAGAMENTO";
    pub const REGRAS_CONCILIACAO: &str = "REGRAS_CONCILIACAO";
    pub const TABELAS_PRECO: &str = "TABELAS_PRECO";
    pub const PARCEIROS: &str = "PARCEIROS";
    pub const FAVORITOS: &str = "FAVORITOS";
    pub const BACKUP: &str = "BACKUP";
    pub const AUDITORIA: &str = "AUDITORIA";
    pub const LOGIN: &str = "LOGIN";
}

/// Audited action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Edit,
    Delete,
    View,
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREATE" => Ok(AuditAction::Create),
            "EDIT" => Ok(AuditAction::Edit),
            "DELETE" => Ok(AuditAction::Delete),
            "VIEW" => Ok(AuditAction::View),
            _ => Err(format!("Unknown audit action: {}", s)),
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditAction::Create => "CREATE",
            AuditAction::Edit => "EDIT",
            AuditAction::Delete => "DELETE",
            AuditAction::View => "VIEW",
        };
        write!(f, "{}", s)
    }
}

/// A persisted audit entry, as served to clients.
///
/// Snapshots are stored as text blobs and parsed back to JSON on the way
/// out; response keys follow the front end's camelCase convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: i64,
    pub modulo: String,
    pub tela: String,
    pub acao: String,
    pub registro_id: Option<i64>,
    pub dados_anteriores: Option<JsonValue>,
    pub dados_novos: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub criado_em: DateTime<Utc>,
}

/// Per-screen logging configuration, unique by (modulo, tela).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogConfig {
    pub id: i64,
    pub modulo: String,
    pub tela: String,
    pub log_ativo: bool,
    pub log_visualizar: bool,
    pub log_criar: bool,
    pub log_editar: bool,
    pub log_excluir: bool,
}

/// Input for one audit entry, built fluently by the handlers.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub modulo: String,
    pub tela: String,
    pub acao: AuditAction,
    pub registro_id: Option<i64>,
    pub dados_anteriores: Option<JsonValue>,
    pub dados_novos: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditEvent {
    /// Starts an event for a (module, screen, action) triple.
    pub fn new(modulo: &str, tela: &str, acao: AuditAction) -> Self {
        Self {
            modulo: modulo.to_string(),
            tela: tela.to_string(),
            acao,
            registro_id: None,
            dados_anteriores: None,
            dados_novos: None,
            ip_address: None,
            user_agent: None,
        }
    }

    /// Sets the affected row id.
    pub fn registro(mut self, id: i64) -> Self {
        self.registro_id = Some(id);
        self
    }

    /// Sets the pre-change snapshot.
    pub fn antes(mut self, snapshot: JsonValue) -> Self {
        self.dados_anteriores = Some(snapshot);
        self
    }

    /// Sets the post-change snapshot.
    pub fn depois(mut self, snapshot: JsonValue) -> Self {
        self.dados_novos = Some(snapshot);
        self
    }

    /// Attaches requester metadata (IP and user agent).
    pub fn cliente(mut self, ip: Option<String>, user_agent: Option<String>) -> Self {
        self.ip_address = ip;
        self.user_agent = user_agent;
        self
    }
}

/// Decides whether an action may be logged under the given configuration.
///
/// No configuration row for the screen means logging is allowed (fail-open).
/// `log_ativo == false` blocks everything; otherwise the per-action flag
/// decides.
pub fn audit_allowed(config: Option<&AuditLogConfig>, acao: AuditAction) -> bool {
    match config {
        None => true,
        Some(cfg) => {
            if !cfg.log_ativo {
                return false;
            }
            match acao {
                AuditAction::Create => cfg.log_criar,
                AuditAction::Edit => cfg.log_editar,
                AuditAction::Delete => cfg.log_excluir,
                AuditAction::View => cfg.log_visualizar,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(ativo: bool) -> AuditLogConfig {
        AuditLogConfig {
            id: 1,
            modulo: modulos::FINANCEIRO.to_string(),
            tela: telas::BANCOS.to_string(),
            log_ativo: ativo,
            log_visualizar: false,
            log_criar: true,
            log_editar: true,
            log_excluir: false,
        }
    }

    #[test]
    fn test_action_display_roundtrip() {
        for acao in [
            AuditAction::Create,
            AuditAction::Edit,
            AuditAction::Delete,
            AuditAction::View,
        ] {
            assert_eq!(acao.to_string().parse::<AuditAction>().unwrap(), acao);
        }
    }

    #[test]
    fn test_action_from_str_case_insensitive() {
        assert_eq!("create".parse::<AuditAction>().unwrap(), AuditAction::Create);
        assert_eq!("Edit".parse::<AuditAction>().unwrap(), AuditAction::Edit);
        assert!("UNKNOWN".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_action_serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&AuditAction::Delete).unwrap(),
            "\"DELETE\""
        );
    }

    #[test]
    fn test_audit_allowed_fail_open_without_config() {
        assert!(audit_allowed(None, AuditAction::Create));
        assert!(audit_allowed(None, AuditAction::View));
    }

    #[test]
    fn test_audit_allowed_master_switch_blocks_all() {
        let cfg = config(false);
        assert!(!audit_allowed(Some(&cfg), AuditAction::Create));
        assert!(!audit_allowed(Some(&cfg), AuditAction::Edit));
        assert!(!audit_allowed(Some(&cfg), AuditAction::Delete));
        assert!(!audit_allowed(Some(&cfg), AuditAction::View));
    }

    #[test]
    fn test_audit_allowed_per_action_flags() {
        let cfg = config(true);
        assert!(audit_allowed(Some(&cfg), AuditAction::Create));
        assert!(audit_allowed(Some(&cfg), AuditAction::Edit));
        assert!(!audit_allowed(Some(&cfg), AuditAction::Delete));
        assert!(!audit_allowed(Some(&cfg), AuditAction::View));
    }

    #[test]
    fn test_event_builder() {
        let event = AuditEvent::new(modulos::FINANCEIRO, telas::BANCOS, AuditAction::Edit)
            .registro(10)
            .antes(json!({"nome_banco": "ANTES"}))
            .depois(json!({"nome_banco": "DEPOIS"}))
            .cliente(Some("10.0.0.1".into()), Some("curl/8".into()));

        assert_eq!(event.modulo, "FINANCEIRO");
        assert_eq!(event.tela, "BANCOS");
        assert_eq!(event.acao, AuditAction::Edit);
        assert_eq!(event.registro_id, Some(10));
        assert_eq!(event.dados_anteriores, Some(json!({"nome_banco": "ANTES"})));
        assert_eq!(event.dados_novos, Some(json!({"nome_banco": "DEPOIS"})));
        assert_eq!(event.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(event.user_agent.as_deref(), Some("curl/8"));
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = AuditLogEntry {
            id: 1,
            modulo: "ADMINISTRATIVO".into(),
            tela: "FUNCIONARIOS".into(),
            acao: "EDIT".into(),
            registro_id: Some(5),
            dados_anteriores: Some(json!({"nome": "A"})),
            dados_novos: Some(json!({"nome": "B"})),
            ip_address: None,
            user_agent: None,
            criado_em: Utc::now(),
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert!(v.get("dadosAnteriores").is_some());
        assert!(v.get("dadosNovos").is_some());
        assert!(v.get("registroId").is_some());
        assert!(v.get("criadoEm").is_some());
        assert!(v.get("dados_anteriores").is_none());
    }
}
