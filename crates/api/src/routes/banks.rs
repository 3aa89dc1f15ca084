//! Bank registration routes for the financial module.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientMeta;
use crate::services::AuditLogger;
use domain::models::audit::{modulos, telas};
use domain::models::{AuditAction, AuditEvent, Bank, BankInput};
use domain::services::codes::{next_code, prefixes};
use persistence::db::is_unique_violation;
use persistence::repositories::BankRepository;
use shared::rows::{serialize_value, to_safe_value};

/// Lists every bank, active entries first.
pub async fn list_banks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = BankRepository::new(state.pool.clone());
    let banks: Vec<Bank> = repo.list().await?.into_iter().map(Bank::from).collect();
    Ok(Json(to_safe_value(&banks)?))
}

/// One bank by id; the body is `null` when the id does not exist.
pub async fn get_bank(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = BankRepository::new(state.pool.clone());
    match repo.find_by_id(id).await? {
        Some(entity) => Ok(Json(to_safe_value(&Bank::from(entity))?)),
        None => Ok(Json(Value::Null)),
    }
}

/// Creates a bank. A missing code is generated from the BCO sequence.
pub async fn create_bank(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<BankInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let input = payload.normalized();
    let supplied_code = input.codigo.clone();

    let repo = BankRepository::new(state.pool.clone());
    let mut codigo = match supplied_code.clone() {
        Some(code) => code,
        None => next_code(prefixes::BANCO, repo.highest_code().await?.as_deref()),
    };

    let mut attempts = 0;
    let entity = loop {
        match repo.create(&codigo, &input).await {
            Ok(entity) => break entity,
            // A concurrent create may have taken the generated code.
            // Caller-picked codes are never retried.
            Err(err) if supplied_code.is_none() && attempts < 2 && is_unique_violation(&err) => {
                attempts += 1;
                codigo = next_code(prefixes::BANCO, repo.highest_code().await?.as_deref());
            }
            Err(err) => return Err(err.into()),
        }
    };

    let bank = Bank::from(entity);
    let snapshot = to_safe_value(&bank)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::FINANCEIRO, telas::BANCOS, AuditAction::Create)
                .registro(bank.id)
                .depois(snapshot)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": serialize_value(json!(bank.id)),
            "codigo": bank.codigo,
        })),
    ))
}

/// Replaces a bank and records the change with before and after snapshots.
pub async fn update_bank(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
    Json(payload): Json<BankInput>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;
    let input = payload.normalized();

    let repo = BankRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let antes = to_safe_value(&Bank::from(prior))?;

    repo.update(id, &input)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let depois = to_safe_value(&input)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::FINANCEIRO, telas::BANCOS, AuditAction::Edit)
                .registro(id)
                .antes(antes)
                .depois(depois)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}

/// Deletes a bank unless financial movements reference it.
pub async fn delete_bank(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
) -> Result<Json<Value>, ApiError> {
    let repo = BankRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;

    if repo.count_movements(id).await? > 0 {
        return Err(ApiError::Conflict(
            "Banco possui movimentos financeiros vinculados".to_string(),
        ));
    }

    let antes = to_safe_value(&Bank::from(prior))?;
    if repo.delete(id).await? == 0 {
        return Err(ApiError::Validation("Registro não encontrado".to_string()));
    }

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::FINANCEIRO, telas::BANCOS, AuditAction::Delete)
                .registro(id)
                .antes(antes)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}
