//! Price table registration routes for the commercial module.

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
use domain::models::{AuditAction, AuditEvent, PriceTable, PriceTableInput};
use domain::services::codes::{next_code, prefixes};
use persistence::db::is_unique_violation;
use persistence::repositories::PriceTableRepository;
use shared::rows::{serialize_value, to_safe_value};

/// Lists every price table, active entries first.
pub async fn list_price_tables(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = PriceTableRepository::new(state.pool.clone());
    let tables: Vec<PriceTable> = repo.list().await?.into_iter().map(PriceTable::from).collect();
    Ok(Json(to_safe_value(&tables)?))
}

/// One price table by id; the body is `null` when the id does not exist.
pub async fn get_price_table(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = PriceTableRepository::new(state.pool.clone());
    match repo.find_by_id(id).await? {
        Some(entity) => Ok(Json(to_safe_value(&PriceTable::from(entity))?)),
        None => Ok(Json(Value::Null)),
    }
}

/// Creates a price table. A missing code is generated from the TBP
/// sequence.
pub async fn create_price_table(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<PriceTableInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let input = payload.normalized();
    let supplied_code = input.codigo.clone();

    let repo = PriceTableRepository::new(state.pool.clone());
    let mut codigo = match supplied_code.clone() {
        Some(code) => code,
        None => next_code(prefixes::TABELA_PRECO, repo.highest_code().await?.as_deref()),
    };

    let mut attempts = 0;
    let entity = loop {
        match repo.create(&codigo, &input).await {
            Ok(entity) => break entity,
            Err(err) if supplied_code.is_none() && attempts < 2 && is_unique_violation(&err) => {
                attempts += 1;
                codigo = next_code(prefixes::TABELA_PRECO, repo.highest_code().await?.as_deref());
            }
            Err(err) => return Err(err.into()),
        }
    };

    let table = PriceTable::from(entity);
    let snapshot = to_safe_value(&table)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::COMERCIAL,
                telas::TABELAS_PRECO,
                AuditAction::Create,
            )
            .registro(table.id)
            .depois(snapshot)
            .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": serialize_value(json!(table.id)),
            "codigo": table.codigo,
        })),
    ))
}

/// Replaces a price table and records the change.
pub async fn update_price_table(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
    Json(payload): Json<PriceTableInput>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;
    let input = payload.normalized();

    let repo = PriceTableRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let antes = to_safe_value(&PriceTable::from(prior))?;

    repo.update(id, &input)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let depois = to_safe_value(&input)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::COMERCIAL, telas::TABELAS_PRECO, AuditAction::Edit)
                .registro(id)
                .antes(antes)
                .depois(depois)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}

/// Deletes a price table.
pub async fn delete_price_table(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
) -> Result<Json<Value>, ApiError> {
    let repo = PriceTableRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;

    let antes = to_safe_value(&PriceTable::from(prior))?;
    if repo.delete(id).await? == 0 {
        return Err(ApiError::Validation("Registro não encontrado".to_string()));
    }

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::COMERCIAL,
                telas::TABELAS_PRECO,
                AuditAction::Delete,
            )
            .registro(id)
            .antes(antes)
            .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}
