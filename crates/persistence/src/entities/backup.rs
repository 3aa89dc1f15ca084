//! Backup configuration and history entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{BackupConfig, BackupRun};

/// Database row mapping for the backup_config table.
#[derive(Debug, Clone, FromRow)]
pub struct BackupConfigEntity {
    pub id: i64,
    pub backup_automatico: bool,
    pub frequencia: String,
    pub horario: String,
    pub manter_copias: i32,
    pub destino: Option<String>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<BackupConfigEntity> for BackupConfig {
    fn from(entity: BackupConfigEntity) -> Self {
        Self {
            id: entity.id,
            backup_automatico: entity.backup_automatico,
            frequencia: entity.frequencia,
            horario: entity.horario,
            manter_copias: entity.manter_copias,
            destino: entity.destino,
            atualizado_em: entity.atualizado_em,
        }
    }
}

/// Database row mapping for the backup_historico table.
#[derive(Debug, Clone, FromRow)]
pub struct BackupRunEntity {
    pub id: i64,
    pub nome_arquivo: String,
    pub tamanho_bytes: i64,
    pub status: String,
    pub mensagem_erro: Option<String>,
    pub iniciado_em: DateTime<Utc>,
    pub finalizado_em: Option<DateTime<Utc>>,
}

impl From<BackupRunEntity> for BackupRun {
    fn from(entity: BackupRunEntity) -> Self {
        Self {
            id: entity.id,
            nome_arquivo: entity.nome_arquivo,
            tamanho_bytes: entity.tamanho_bytes,
            status: entity.status,
            mensagem_erro: entity.mensagem_erro,
            iniciado_em: entity.iniciado_em,
            finalizado_em: entity.finalizado_em,
        }
    }
}
