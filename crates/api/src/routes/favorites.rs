//! Favorite screen routes.
//!
//! Favorites are per user, so every handler requires a valid session
//! token and scopes its queries to the authenticated user.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientMeta, UserAuth};
use crate::services::AuditLogger;
use domain::models::audit::{modulos, telas};
use domain::models::{AuditAction, AuditEvent, Favorite, FavoriteInput};
use persistence::repositories::FavoriteRepository;
use shared::rows::{serialize_value, to_safe_value};

/// Query string accepted by the unpin endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteFavoriteQuery {
    pub id: i64,
}

/// Lists the authenticated user's favorites in pin order.
pub async fn list_favorites(
    State(state): State<AppState>,
    user: UserAuth,
) -> Result<Json<Value>, ApiError> {
    let repo = FavoriteRepository::new(state.pool.clone());
    let favorites: Vec<Favorite> = repo
        .list_by_user(user.user_id)
        .await?
        .into_iter()
        .map(Favorite::from)
        .collect();
    Ok(Json(to_safe_value(&favorites)?))
}

/// Pins a screen for the authenticated user.
pub async fn create_favorite(
    State(state): State<AppState>,
    user: UserAuth,
    meta: ClientMeta,
    Json(payload): Json<FavoriteInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let input = payload.normalized();

    let repo = FavoriteRepository::new(state.pool.clone());
    let favorite = Favorite::from(repo.create(user.user_id, &input).await?);
    let snapshot = to_safe_value(&favorite)?;

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::SISTEMA, telas::FAVORITOS, AuditAction::Create)
                .registro(favorite.id)
                .depois(snapshot)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": serialize_value(json!(favorite.id)),
        })),
    ))
}

/// Unpins one of the authenticated user's favorites, addressed by the
/// `id` query parameter.
pub async fn delete_favorite(
    State(state): State<AppState>,
    user: UserAuth,
    meta: ClientMeta,
    Query(query): Query<DeleteFavoriteQuery>,
) -> Result<Json<Value>, ApiError> {
    let repo = FavoriteRepository::new(state.pool.clone());
    if repo.delete(user.user_id, query.id).await? == 0 {
        return Err(ApiError::Validation("Registro não encontrado".to_string()));
    }

    AuditLogger::new(state.pool.clone())
        .log(
            AuditEvent::new(modulos::SISTEMA, telas::FAVORITOS, AuditAction::Delete)
                .registro(query.id)
                .cliente(meta.ip, meta.user_agent),
        )
        .await;

    Ok(Json(json!({"success": true})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[test]
    fn test_delete_query_parses_id() {
        let uri: Uri = "/favorites?id=17".parse().unwrap();
        let Query(query) = Query::<DeleteFavoriteQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.id, 17);
    }

    #[test]
    fn test_delete_query_rejects_missing_id() {
        let uri: Uri = "/favorites".parse().unwrap();
        assert!(Query::<DeleteFavoriteQuery>::try_from_uri(&uri).is_err());
    }
}
