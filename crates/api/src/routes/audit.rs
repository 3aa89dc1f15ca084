//! Audit log query, export, and configuration routes.

use axum::{
    extract::{Query, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientMeta;
use crate::services::AuditLogger;
use domain::models::audit::{modulos, telas};
use domain::models::{AuditAction, AuditEvent, AuditLogConfig, AuditLogEntry};
use persistence::repositories::{
    AuditConfigRepository, AuditConfigUpsert, AuditLogFilter, AuditLogRepository,
};
use shared::normalize::normalize;
use shared::rows::to_safe_value;

const DEFAULT_LOG_LIMIT: i64 = 100;
const MAX_LOG_LIMIT: i64 = 1000;
const EXPORT_LIMIT: i64 = 10_000;

/// Query string accepted by the log listing.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub modulo: Option<String>,
    pub tela: Option<String>,
    pub acao: Option<String>,
    pub limite: Option<i64>,
}

impl LogsQuery {
    fn filter(&self) -> AuditLogFilter {
        AuditLogFilter {
            modulo: self.modulo.as_deref().map(|m| normalize(m.trim())),
            tela: self.tela.as_deref().map(|t| normalize(t.trim())),
            acao: self.acao.as_deref().map(|a| a.trim().to_uppercase()),
        }
    }

    fn limit(&self) -> i64 {
        self.limite.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT)
    }
}

/// Query string accepted by the export endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub formato: Option<String>,
    pub modulo: Option<String>,
    pub tela: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        match raw.map(|f| f.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            Some(other) => Err(ApiError::Validation(format!(
                "Formato de exportação inválido: {}",
                other
            ))),
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One row of the configuration grid as submitted by the admin screen.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfigRow {
    pub modulo: String,
    pub tela: String,
    #[serde(default = "default_true")]
    pub log_ativo: bool,
    #[serde(default)]
    pub log_visualizar: bool,
    #[serde(default = "default_true")]
    pub log_criar: bool,
    #[serde(default = "default_true")]
    pub log_editar: bool,
    #[serde(default = "default_true")]
    pub log_excluir: bool,
}

fn default_true() -> bool {
    true
}

/// Lists audit entries newest first, filtered by module, screen and
/// action.
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Value>, ApiError> {
    let repo = AuditLogRepository::new(state.pool.clone());
    let entries: Vec<AuditLogEntry> = repo
        .list(&query.filter(), query.limit())
        .await?
        .into_iter()
        .map(AuditLogEntry::from)
        .collect();
    Ok(Json(to_safe_value(&entries)?))
}

/// Exports the filtered history as a base64 data URL, CSV by default.
/// CSV output is chronological and carries a UTF-8 BOM so spreadsheets
/// detect the encoding.
pub async fn export_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<Value>, ApiError> {
    let format = ExportFormat::parse(query.formato.as_deref())?;
    let filter = AuditLogFilter {
        modulo: query.modulo.as_deref().map(|m| normalize(m.trim())),
        tela: query.tela.as_deref().map(|t| normalize(t.trim())),
        acao: None,
    };

    let repo = AuditLogRepository::new(state.pool.clone());
    let entries: Vec<AuditLogEntry> = repo
        .list_for_export(&filter, EXPORT_LIMIT)
        .await?
        .into_iter()
        .map(AuditLogEntry::from)
        .collect();

    let data = match format {
        ExportFormat::Csv => generate_csv(&entries).into_bytes(),
        ExportFormat::Json => serde_json::to_vec_pretty(&to_safe_value(&entries)?)?,
    };
    let download_url = format!(
        "data:{};base64,{}",
        format.content_type(),
        STANDARD.encode(&data)
    );

    Ok(Json(json!({
        "success": true,
        "formato": format.name(),
        "registros": entries.len(),
        "download_url": download_url,
    })))
}

/// Lists the per-screen logging configuration.
pub async fn list_audit_configs(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = AuditConfigRepository::new(state.pool.clone());
    let configs: Vec<AuditLogConfig> = repo
        .list()
        .await?
        .into_iter()
        .map(AuditLogConfig::from)
        .collect();
    Ok(Json(to_safe_value(&configs)?))
}

/// Saves the whole configuration grid in one transaction.
pub async fn upsert_audit_configs(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(rows): Json<Vec<AuditConfigRow>>,
) -> Result<Json<Value>, ApiError> {
    let mut upserts = Vec::with_capacity(rows.len());
    for row in rows {
        let modulo = normalize(row.modulo.trim());
        let tela = normalize(row.tela.trim());
        if modulo.is_empty() || tela.is_empty() {
            return Err(ApiError::Validation(
                "Módulo e tela são obrigatórios".to_string(),
            ));
        }
        upserts.push(AuditConfigUpsert {
            modulo,
            tela,
            log_ativo: row.log_ativo,
            log_visualizar: row.log_visualizar,
            log_criar: row.log_criar,
            log_editar: row.log_editar,
            log_excluir: row.log_excluir,
        });
    }

    let repo = AuditConfigRepository::new(state.pool.clone());
    let saved: Vec<AuditLogConfig> = repo
        .upsert_many(&upserts)
        .await?
        .into_iter()
        .map(AuditLogConfig::from)
        .collect();
    let depois = to_safe_value(&saved)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::SISTEMA, telas::AUDITORIA, AuditAction::Edit)
                .depois(depois)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}

/// Renders the entries as CSV, oldest first, with a UTF-8 BOM.
fn generate_csv(entries: &[AuditLogEntry]) -> String {
    let mut csv = String::new();
    csv.push('\u{FEFF}');
    csv.push_str(
        "id,data,modulo,tela,acao,registro_id,dados_anteriores,dados_novos,ip,user_agent\n",
    );

    for entry in entries {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            entry.id,
            entry.criado_em.to_rfc3339(),
            escape_csv(&entry.modulo),
            escape_csv(&entry.tela),
            escape_csv(&entry.acao),
            entry.registro_id.map(|id| id.to_string()).unwrap_or_default(),
            escape_csv(&snapshot_text(entry.dados_anteriores.as_ref())),
            escape_csv(&snapshot_text(entry.dados_novos.as_ref())),
            entry.ip_address.as_deref().unwrap_or(""),
            escape_csv(entry.user_agent.as_deref().unwrap_or("")),
        ));
    }

    csv
}

fn snapshot_text(snapshot: Option<&Value>) -> String {
    snapshot.map(Value::to_string).unwrap_or_default()
}

/// Escapes a value for CSV output, doubling embedded quotes.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simples"), "simples");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("diz \"oi\""), "\"diz \"\"oi\"\"\"");
        assert_eq!(escape_csv("linha\nquebrada"), "\"linha\nquebrada\"");
    }

    #[test]
    fn test_generate_csv_has_bom_and_header() {
        let csv = generate_csv(&[]);
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv.contains("id,data,modulo"));
    }

    #[test]
    fn test_generate_csv_quotes_json_snapshots() {
        let entry = AuditLogEntry {
            id: 1,
            modulo: "FINANCEIRO".to_string(),
            tela: "BANCOS".to_string(),
            acao: "EDIT".to_string(),
            registro_id: Some(7),
            dados_anteriores: Some(json!({"agencia": "0001"})),
            dados_novos: Some(json!({"agencia": "0002"})),
            ip_address: Some("10.0.0.1".to_string()),
            user_agent: None,
            criado_em: Utc::now(),
        };
        let csv = generate_csv(&[entry]);
        // The snapshot contains commas and quotes, so it must be quoted.
        assert!(csv.contains("\"{\"\"agencia\"\":\"\"0001\"\"}\""));
    }

    #[test]
    fn test_export_format_parses_and_defaults_to_csv() {
        assert_eq!(ExportFormat::parse(None).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse(Some("CSV")).unwrap(), ExportFormat::Csv);
        assert_eq!(
            ExportFormat::parse(Some("json")).unwrap(),
            ExportFormat::Json
        );
        assert!(ExportFormat::parse(Some("xml")).is_err());
    }

    #[test]
    fn test_logs_query_limit_clamps() {
        assert_eq!(LogsQuery::default().limit(), DEFAULT_LOG_LIMIT);
        let query = LogsQuery {
            limite: Some(MAX_LOG_LIMIT + 500),
            ..LogsQuery::default()
        };
        assert_eq!(query.limit(), MAX_LOG_LIMIT);
    }

    #[test]
    fn test_logs_query_filter_normalizes() {
        let query = LogsQuery {
            modulo: Some(" financeiro ".to_string()),
            tela: Some("bancos".to_string()),
            acao: Some("edit".to_string()),
            limite: None,
        };
        let filter = query.filter();
        assert_eq!(filter.modulo.as_deref(), Some("FINANCEIRO"));
        assert_eq!(filter.tela.as_deref(), Some("BANCOS"));
        assert_eq!(filter.acao.as_deref(), Some("EDIT"));
    }
}
