use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::telemetry::TelemetryService;

use super::api::anomalies as anomaly_handlers;
use super::api::health as health_handlers;
use super::api::satellites as satellite_handlers;
use super::api::telemetry as telemetry_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let store = config
        .storage
        .open()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = AppState {
        config: Arc::new(config),
        service: TelemetryService::new(store),
    };

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handlers::health))
        // Ingestion
        .route("/api/telemetry", post(telemetry_handlers::ingest))
        // Satellite queries
        .route("/api/satellites", get(satellite_handlers::list_satellites))
        .route(
            "/api/satellites/{id}/status",
            get(satellite_handlers::latest_status),
        )
        .route(
            "/api/satellites/{id}/telemetry",
            get(satellite_handlers::history),
        )
        // Anomalies
        .route("/api/anomalies", get(anomaly_handlers::list_anomalies))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
