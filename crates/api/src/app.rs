use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{
    audit, auth, backup, banks, employees, favorites, health, partners, payment_methods,
    payment_terms, price_tables, reconciliation_rules,
};
use crate::services::partner_store::{HostedPartnerStore, PartnerStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub partner_store: Arc<dyn PartnerStore>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let partner_store = Arc::new(HostedPartnerStore::from_config(&config.partner_store));
    create_app_with_partner_store(config, pool, partner_store)
}

/// Same as [`create_app`] but with an injected partner store, so tests can
/// substitute an in-memory implementation.
pub fn create_app_with_partner_store(
    config: Config,
    pool: PgPool,
    partner_store: Arc<dyn PartnerStore>,
) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        partner_store,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Registration families share the same verb surface
    let cadastro_routes = Router::new()
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/banks", get(banks::list_banks).post(banks::create_bank))
        .route(
            "/banks/:id",
            get(banks::get_bank)
                .put(banks::update_bank)
                .delete(banks::delete_bank),
        )
        .route(
            "/payment-terms",
            get(payment_terms::list_payment_terms).post(payment_terms::create_payment_term),
        )
        .route(
            "/payment-terms/:id",
            get(payment_terms::get_payment_term)
                .put(payment_terms::update_payment_term)
                .delete(payment_terms::delete_payment_term),
        )
        .route(
            "/payment-methods",
            get(payment_methods::list_payment_methods).post(payment_methods::create_payment_method),
        )
        .route(
            "/payment-methods/:id",
            get(payment_methods::get_payment_method)
                .put(payment_methods::update_payment_method)
                .delete(payment_methods::delete_payment_method),
        )
        .route(
            "/reconciliation-rules",
            get(reconciliation_rules::list_reconciliation_rules)
                .post(reconciliation_rules::create_reconciliation_rule),
        )
        .route(
            "/reconciliation-rules/:id",
            get(reconciliation_rules::get_reconciliation_rule)
                .put(reconciliation_rules::update_reconciliation_rule)
                .delete(reconciliation_rules::delete_reconciliation_rule),
        )
        .route(
            "/price-tables",
            get(price_tables::list_price_tables).post(price_tables::create_price_table),
        )
        .route(
            "/price-tables/:id",
            get(price_tables::get_price_table)
                .put(price_tables::update_price_table)
                .delete(price_tables::delete_price_table),
        );

    // Partners live in the hosted datastore, same verb surface
    let partner_routes = Router::new()
        .route(
            "/partners",
            get(partners::list_partners).post(partners::create_partner),
        )
        .route(
            "/partners/:id",
            get(partners::get_partner)
                .put(partners::update_partner)
                .delete(partners::delete_partner),
        );

    // Favorites identify the user from the bearer token; delete takes ?id=
    let favorite_routes = Router::new().route(
        "/favorites",
        get(favorites::list_favorites)
            .post(favorites::create_favorite)
            .delete(favorites::delete_favorite),
    );

    let backup_routes = Router::new()
        .route(
            "/backup/config",
            get(backup::get_backup_config).post(backup::save_backup_config),
        )
        .route(
            "/backup/history",
            get(backup::list_backup_history).post(backup::record_backup_run),
        )
        .route("/backup/history/:id", get(backup::get_backup_run));

    let audit_routes = Router::new()
        .route("/audit/logs", get(audit::list_audit_logs))
        .route("/audit/logs/export", get(audit::export_audit_logs))
        .route(
            "/audit/config",
            get(audit::list_audit_configs).post(audit::upsert_audit_configs),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(cadastro_routes)
        .merge(partner_routes)
        .merge(favorite_routes)
        .merge(backup_routes)
        .merge(audit_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
