//! Business partner routes for the commercial module.
//!
//! Partner rows live in a hosted row store instead of the local database,
//! so these handlers go through the [`PartnerStore`] trait on the shared
//! state rather than a repository.

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
use crate::services::{AuditLogger, PartnerRecord};
use domain::models::audit::{modulos, telas};
use domain::models::{AuditAction, AuditEvent, PartnerInput};
use domain::services::codes::partner_code;
use shared::rows::{serialize_row, serialize_rows, serialize_value};

/// Lists every partner, active entries first.
pub async fn list_partners(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let records = state.partner_store.list().await?;
    let rows = serialize_rows(records.into_iter().map(Value::Object).collect());
    Ok(Json(Value::Array(rows)))
}

/// One partner by id; the body is `null` when the id does not exist.
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match state.partner_store.get(id).await? {
        Some(record) => Ok(Json(serialize_row(Value::Object(record)))),
        None => Ok(Json(Value::Null)),
    }
}

/// Creates a partner. A missing code is generated from the clock, since
/// the remote store has no scannable sequence.
pub async fn create_partner(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<PartnerInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let codigo = match payload.codigo.clone() {
        Some(code) if !code.trim().is_empty() => code,
        _ => partner_code(),
    };
    let record = payload.into_record(codigo);

    let created = state.partner_store.create(record).await?;
    let id = record_id(&created);
    let codigo = created
        .get("codigo")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let snapshot = serialize_row(Value::Object(created));

    let mut event = AuditEvent::new(modulos::COMERCIAL, telas::PARCEIROS, AuditAction::Create)
        .depois(snapshot)
        .cliente(meta.ip, meta.user_agent);
    if let Some(id) = id {
        event = event.registro(id);
    }
    AuditLogger::new(state.pool.clone()).log(event).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": id.map_or(Value::Null, |i| serialize_value(json!(i))),
            "codigo": codigo,
        })),
    ))
}

/// Replaces a partner and records the change. A payload without a code
/// keeps the stored one.
pub async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
    Json(payload): Json<PartnerInput>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let prior = state
        .partner_store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let codigo = match payload.codigo.clone() {
        Some(code) if !code.trim().is_empty() => code,
        _ => prior
            .get("codigo")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(partner_code),
    };
    let record = payload.into_record(codigo);

    let updated = state
        .partner_store
        .update(id, record)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;

    let antes = serialize_row(Value::Object(prior));
    let depois = serialize_row(Value::Object(updated));
    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::COMERCIAL, telas::PARCEIROS, AuditAction::Edit)
                .registro(id)
                .antes(antes)
                .depois(depois)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}

/// Deletes a partner.
pub async fn delete_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
) -> Result<Json<Value>, ApiError> {
    let removed = state
        .partner_store
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;

    let antes = serialize_row(Value::Object(removed));
    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::COMERCIAL, telas::PARCEIROS, AuditAction::Delete)
                .registro(id)
                .antes(antes)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}

fn record_id(record: &PartnerRecord) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_record_id_reads_integer_ids() {
        let mut record = Map::new();
        record.insert("id".to_string(), json!(42));
        assert_eq!(record_id(&record), Some(42));
    }

    #[test]
    fn test_record_id_ignores_missing_or_textual_ids() {
        assert_eq!(record_id(&Map::new()), None);
        let mut record = Map::new();
        record.insert("id".to_string(), json!("42"));
        assert_eq!(record_id(&record), None);
    }
}
