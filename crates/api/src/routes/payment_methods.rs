//! Payment method registration routes for the financial module.

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
use domain::models::{AuditAction, AuditEvent, PaymentMethod, PaymentMethodInput};
use domain::services::codes::{next_code, prefixes};
use persistence::db::is_unique_violation;
use persistence::repositories::PaymentMethodRepository;
use shared::rows::{serialize_value, to_safe_value};

/// Lists every payment method, active entries first.
pub async fn list_payment_methods(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = PaymentMethodRepository::new(state.pool.clone());
    let methods: Vec<PaymentMethod> = repo
        .list()
        .await?
        .into_iter()
        .map(PaymentMethod::from)
        .collect();
    Ok(Json(to_safe_value(&methods)?))
}

/// One payment method by id; the body is `null` when the id does not exist.
pub async fn get_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = PaymentMethodRepository::new(state.pool.clone());
    match repo.find_by_id(id).await? {
        Some(entity) => Ok(Json(to_safe_value(&PaymentMethod::from(entity))?)),
        None => Ok(Json(Value::Null)),
    }
}

/// Creates a payment method. A missing code is generated from the FPG
/// sequence.
pub async fn create_payment_method(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<PaymentMethodInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let input = payload.normalized();
    let supplied_code = input.codigo.clone();

    let repo = PaymentMethodRepository::new(state.pool.clone());
    let mut codigo = match supplied_code.clone() {
        Some(code) => code,
        None => next_code(
            prefixes::FORMA_PAGAMENTO,
            repo.highest_code().await?.as_deref(),
        ),
    };

    let mut attempts = 0;
    let entity = loop {
        match repo.create(&codigo, &input).await {
            Ok(entity) => break entity,
            Err(err) if supplied_code.is_none() && attempts < 2 && is_unique_violation(&err) => {
                attempts += 1;
                codigo = next_code(
                    prefixes::FORMA_PAGAMENTO,
                    repo.highest_code().await?.as_deref(),
                );
            }
            Err(err) => return Err(err.into()),
        }
    };

    let method = PaymentMethod::from(entity);
    let snapshot = to_safe_value(&method)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::FINANCEIRO,
                telas::FORMAS_PAGAMENTO,
                AuditAction::Create,
            )
            .registro(method.id)
            .depois(snapshot)
            .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": serialize_value(json!(method.id)),
            "codigo": method.codigo,
        })),
    ))
}

/// Replaces a payment method and records the change.
pub async fn update_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
    Json(payload): Json<PaymentMethodInput>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;
    let input = payload.normalized();

    let repo = PaymentMethodRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let antes = to_safe_value(&PaymentMethod::from(prior))?;

    repo.update(id, &input)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let depois = to_safe_value(&input)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::FINANCEIRO,
                telas::FORMAS_PAGAMENTO,
                AuditAction::Edit,
            )
            .registro(id)
            .antes(antes)
            .depois(depois)
            .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}

/// Deletes a payment method.
pub async fn delete_payment_method(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
) -> Result<Json<Value>, ApiError> {
    let repo = PaymentMethodRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;

    let antes = to_safe_value(&PaymentMethod::from(prior))?;
    if repo.delete(id).await? == 0 {
        return Err(ApiError::Validation("Registro não encontrado".to_string()));
    }

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::FINANCEIRO,
                telas::FORMAS_PAGAMENTO,
                AuditAction::Delete,
            )
            .registro(id)
            .antes(antes)
            .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}
