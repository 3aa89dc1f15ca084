//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;
use persistence::metrics::record_pool_metrics;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
    pub partner_store: PartnerStoreHealth,
}

/// Database health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

/// Partner store configuration status. The remote store is not pinged
/// here; a health probe must not consume its request quota.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PartnerStoreHealth {
    pub enabled: bool,
    pub configured: bool,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Full health check endpoint.
///
/// Reports database connectivity with latency, partner store
/// configuration state, and the crate version. Also refreshes the
/// connection pool gauges.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let start = std::time::Instant::now();
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let latency_ms = start.elapsed().as_millis() as u64;

    record_pool_metrics(&state.pool);

    let partner_config = &state.config.partner_store;
    let response = HealthResponse {
        status: if db_connected { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            connected: db_connected,
            latency_ms: if db_connected { Some(latency_ms) } else { None },
        },
        partner_store: PartnerStoreHealth {
            enabled: partner_config.enabled,
            configured: partner_config.enabled && !partner_config.url.is_empty(),
        },
    };

    if db_connected {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// Returns 200 OK if the service can accept traffic (database connected).
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    if db_connected {
        Ok(Json(StatusResponse {
            status: "ready".to_string(),
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_healthy() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: DatabaseHealth {
                connected: true,
                latency_ms: Some(5),
            },
            partner_store: PartnerStoreHealth {
                enabled: true,
                configured: true,
            },
        };
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
        assert!(response.database.connected);
        assert_eq!(response.database.latency_ms, Some(5));
    }

    #[test]
    fn test_health_response_unhealthy_has_no_latency() {
        let response = HealthResponse {
            status: "unhealthy".to_string(),
            version: "0.9.2".to_string(),
            database: DatabaseHealth {
                connected: false,
                latency_ms: None,
            },
            partner_store: PartnerStoreHealth {
                enabled: false,
                configured: false,
            },
        };
        assert_eq!(response.status, "unhealthy");
        assert!(response.database.latency_ms.is_none());
    }

    #[test]
    fn test_partner_store_health_serialization() {
        let health = PartnerStoreHealth {
            enabled: true,
            configured: false,
        };
        let json = serde_json::to_string(&health).unwrap();
        assert!(json.contains("\"enabled\":true"));
        assert!(json.contains("\"configured\":false"));
    }

    #[test]
    fn test_status_responses() {
        assert_eq!(
            StatusResponse {
                status: "alive".to_string()
            }
            .status,
            "alive"
        );
        assert_eq!(
            StatusResponse {
                status: "ready".to_string()
            }
            .status,
            "ready"
        );
    }
}
