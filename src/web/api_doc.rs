use utoipa::OpenApi;

use super::api::anomalies::AnomaliesQuery;
use super::api::error::ErrorResponse;
use super::api::health::HealthResponse;
use super::api::satellites::HistoryQuery;
use super::api::telemetry::IngestResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::health::health,
        super::api::telemetry::ingest,
        super::api::satellites::list_satellites,
        super::api::satellites::latest_status,
        super::api::satellites::history,
        super::api::anomalies::list_anomalies,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            IngestResponse,
            HistoryQuery,
            AnomaliesQuery,
            crate::telemetry::Reading,
            crate::telemetry::ReadingInput,
            crate::telemetry::Orientation,
            crate::telemetry::TelemetryStatus,
            crate::telemetry::SatelliteSummary,
            crate::telemetry::Anomaly,
            crate::telemetry::AnomalyKind,
        )
    ),
    info(
        title = "Satellite Telemetry API",
        description = "Ingest fleet telemetry and query satellite status, history and anomalies",
        version = "0.1.0"
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "telemetry", description = "Telemetry ingestion"),
        (name = "satellites", description = "Per-satellite status and history"),
        (name = "anomalies", description = "Threshold anomaly detection")
    )
)]
pub struct ApiDoc;
