//! Backup schedule and run history routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientMeta;
use crate::services::AuditLogger;
use domain::models::audit::{modulos, telas};
use domain::models::{
    AuditAction, AuditEvent, BackupConfig, BackupConfigInput, BackupRun, BackupRunInput,
};
use persistence::repositories::BackupRepository;
use shared::rows::{serialize_value, to_safe_value};

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 200;

/// Query string accepted by the history listing.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limite: Option<i64>,
}

impl HistoryQuery {
    fn limit(&self) -> i64 {
        self.limite
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// The backup schedule; the body is `null` when none was ever saved.
pub async fn get_backup_config(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = BackupRepository::new(state.pool.clone());
    match repo.get_config().await? {
        Some(entity) => Ok(Json(to_safe_value(&BackupConfig::from(entity))?)),
        None => Ok(Json(Value::Null)),
    }
}

/// Saves the backup schedule and prunes history beyond the configured
/// retention.
pub async fn save_backup_config(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<BackupConfigInput>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;
    let input = payload.normalized();

    let repo = BackupRepository::new(state.pool.clone());
    let antes = match repo.get_config().await? {
        Some(entity) => Some(to_safe_value(&BackupConfig::from(entity))?),
        None => None,
    };

    let saved = BackupConfig::from(repo.upsert_config(&input).await?);
    repo.prune_runs(i64::from(saved.manter_copias)).await?;
    let depois = to_safe_value(&saved)?;

    let mut event = AuditEvent::new(modulos::SISTEMA, telas::BACKUP, AuditAction::Edit)
        .registro(saved.id)
        .depois(depois)
        .cliente(meta.ip, meta.user_agent);
    if let Some(antes) = antes {
        event = event.antes(antes);
    }
    AuditLogger::new(state.pool.clone()).log(event).await;

    Ok(Json(json!({"success": true})))
}

/// Lists backup runs, most recent first.
pub async fn list_backup_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, ApiError> {
    let repo = BackupRepository::new(state.pool.clone());
    let runs: Vec<BackupRun> = repo
        .list_runs(query.limit())
        .await?
        .into_iter()
        .map(BackupRun::from)
        .collect();
    Ok(Json(to_safe_value(&runs)?))
}

/// One backup run by id; the body is `null` when the id does not exist.
pub async fn get_backup_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = BackupRepository::new(state.pool.clone());
    match repo.find_run(id).await? {
        Some(entity) => Ok(Json(to_safe_value(&BackupRun::from(entity))?)),
        None => Ok(Json(Value::Null)),
    }
}

/// Records an executed backup, successful or failed.
pub async fn record_backup_run(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<BackupRunInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let input = payload.normalized();

    let repo = BackupRepository::new(state.pool.clone());
    let run = BackupRun::from(repo.record_run(&input).await?);
    let snapshot = to_safe_value(&run)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::SISTEMA, telas::BACKUP, AuditAction::Create)
                .registro(run.id)
                .depois(snapshot)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": serialize_value(json!(run.id)),
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_limit_defaults_and_clamps() {
        assert_eq!(HistoryQuery::default().limit(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(HistoryQuery { limite: Some(10) }.limit(), 10);
        assert_eq!(HistoryQuery { limite: Some(0) }.limit(), 1);
        assert_eq!(
            HistoryQuery {
                limite: Some(9999)
            }
            .limit(),
            MAX_HISTORY_LIMIT
        );
    }
}
