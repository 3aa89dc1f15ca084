//! Employee registration routes for the administrative module.

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
use domain::models::{AuditAction, AuditEvent, Employee, EmployeeInput};
use domain::services::codes::{next_code, prefixes};
use persistence::db::is_unique_violation;
use persistence::repositories::EmployeeRepository;
use shared::rows::{serialize_value, to_safe_value};

/// Lists every employee, active entries first.
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let employees: Vec<Employee> = repo.list().await?.into_iter().map(Employee::from).collect();
    Ok(Json(to_safe_value(&employees)?))
}

/// One employee by id; the body is `null` when the id does not exist.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    match repo.find_by_id(id).await? {
        Some(entity) => Ok(Json(to_safe_value(&Employee::from(entity))?)),
        None => Ok(Json(Value::Null)),
    }
}

/// Creates an employee. A missing code is generated from the FUN sequence.
pub async fn create_employee(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(payload): Json<EmployeeInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let input = payload.normalized();
    let supplied_code = input.codigo.clone();

    let repo = EmployeeRepository::new(state.pool.clone());
    let mut codigo = match supplied_code.clone() {
        Some(code) => code,
        None => next_code(prefixes::FUNCIONARIO, repo.highest_code().await?.as_deref()),
    };

    let mut attempts = 0;
    let entity = loop {
        match repo.create(&codigo, &input).await {
            Ok(entity) => break entity,
            Err(err) if supplied_code.is_none() && attempts < 2 && is_unique_violation(&err) => {
                attempts += 1;
                codigo = next_code(prefixes::FUNCIONARIO, repo.highest_code().await?.as_deref());
            }
            Err(err) => return Err(err.into()),
        }
    };

    let employee = Employee::from(entity);
    let snapshot = to_safe_value(&employee)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::ADMINISTRATIVO,
                telas::FUNCIONARIOS,
                AuditAction::Create,
            )
            .registro(employee.id)
            .depois(snapshot)
            .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": serialize_value(json!(employee.id)),
            "codigo": employee.codigo,
        })),
    ))
}

/// Replaces an employee and records the change with before and after
/// snapshots.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
    Json(payload): Json<EmployeeInput>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;
    let input = payload.normalized();

    let repo = EmployeeRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let antes = to_safe_value(&Employee::from(prior))?;

    repo.update(id, &input)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;
    let depois = to_safe_value(&input)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::ADMINISTRATIVO,
                telas::FUNCIONARIOS,
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

/// Deletes an employee.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    meta: ClientMeta,
) -> Result<Json<Value>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let prior = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Validation("Registro não encontrado".to_string()))?;

    let antes = to_safe_value(&Employee::from(prior))?;
    if repo.delete(id).await? == 0 {
        return Err(ApiError::Validation("Registro não encontrado".to_string()));
    }

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(
                modulos::ADMINISTRATIVO,
                telas::FUNCIONARIOS,
                AuditAction::Delete,
            )
            .registro(id)
            .antes(antes)
            .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}
