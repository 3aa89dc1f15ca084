//! Backup configuration and run history models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::normalize::normalize;
use shared::validation::{validate_frequencia, validate_horario};
use validator::Validate;

/// Singleton backup schedule for the installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    pub id: i64,
    pub backup_automatico: bool,
    pub frequencia: String,
    pub horario: String,
    pub manter_copias: i32,
    pub destino: Option<String>,
    pub atualizado_em: DateTime<Utc>,
}

/// One executed backup, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRun {
    pub id: i64,
    pub nome_arquivo: String,
    pub tamanho_bytes: i64,
    pub status: String,
    pub mensagem_erro: Option<String>,
    pub iniciado_em: DateTime<Utc>,
    pub finalizado_em: Option<DateTime<Utc>>,
}

/// Payload accepted when saving the backup schedule.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackupConfigInput {
    #[serde(default)]
    pub backup_automatico: bool,
    #[serde(default = "default_frequencia")]
    #[validate(custom(function = "validate_frequencia"))]
    pub frequencia: String,
    #[serde(default = "default_horario")]
    #[validate(custom(function = "validate_horario"))]
    pub horario: String,
    #[serde(default = "default_manter_copias")]
    #[validate(range(min = 1, max = 120, message = "Manter cópias deve estar entre 1 e 120"))]
    pub manter_copias: i32,
    #[validate(length(max = 300, message = "Destino deve ter no máximo 300 caracteres"))]
    pub destino: Option<String>,
}

impl BackupConfigInput {
    /// Canonical form as persisted.
    pub fn normalized(mut self) -> Self {
        self.frequencia = normalize(self.frequencia.trim());
        self.horario = self.horario.trim().to_string();
        self.destino = self
            .destino
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }
}

/// Payload accepted when recording a backup run.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackupRunInput {
    #[validate(length(min = 1, max = 200, message = "Nome do arquivo é obrigatório"))]
    pub nome_arquivo: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Tamanho não pode ser negativo"))]
    pub tamanho_bytes: i64,
    #[validate(length(min = 1, max = 20, message = "Status é obrigatório"))]
    pub status: String,
    #[validate(length(max = 500, message = "Mensagem de erro deve ter no máximo 500 caracteres"))]
    pub mensagem_erro: Option<String>,
    pub iniciado_em: Option<DateTime<Utc>>,
    pub finalizado_em: Option<DateTime<Utc>>,
}

impl BackupRunInput {
    /// Canonical form as persisted. File names keep their case.
    pub fn normalized(mut self) -> Self {
        self.nome_arquivo = self.nome_arquivo.trim().to_string();
        self.status = normalize(self.status.trim());
        self.mensagem_erro = self
            .mensagem_erro
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        self
    }
}

fn default_frequencia() -> String {
    "DIARIO".to_string()
}

fn default_horario() -> String {
    "03:00".to_string()
}

fn default_manter_copias() -> i32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_apply() {
        let payload: BackupConfigInput = serde_json::from_str("{}").unwrap();
        assert!(!payload.backup_automatico);
        assert_eq!(payload.frequencia, "DIARIO");
        assert_eq!(payload.horario, "03:00");
        assert_eq!(payload.manter_copias, 7);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn bad_schedule_time_is_rejected() {
        let payload: BackupConfigInput =
            serde_json::from_str(r#"{"horario": "25:00"}"#).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        let payload: BackupConfigInput =
            serde_json::from_str(r#"{"frequencia": "ANUAL"}"#).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn config_normalized_uppercases_frequency() {
        let payload: BackupConfigInput =
            serde_json::from_str(r#"{"frequencia": "semanal", "destino": " /mnt/backups "}"#)
                .unwrap();
        let normalized = payload.normalized();
        assert_eq!(normalized.frequencia, "SEMANAL");
        assert_eq!(normalized.destino.as_deref(), Some("/mnt/backups"));
    }

    #[test]
    fn run_size_defaults_to_zero() {
        let payload: BackupRunInput = serde_json::from_str(
            r#"{"nome_arquivo": "gestor-2024-06-01.sql.gz", "status": "sucesso"}"#,
        )
        .unwrap();
        assert_eq!(payload.tamanho_bytes, 0);
        let normalized = payload.normalized();
        assert_eq!(normalized.status, "SUCESSO");
        assert_eq!(normalized.nome_arquivo, "gestor-2024-06-01.sql.gz");
    }

    #[test]
    fn negative_run_size_is_rejected() {
        let payload: BackupRunInput = serde_json::from_str(
            r#"{"nome_arquivo": "b.sql", "status": "FALHA", "tamanho_bytes": -1}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
