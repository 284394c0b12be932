use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::telemetry::Anomaly;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::{deserialize_datetime, run_blocking};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnomaliesQuery {
    #[serde(deserialize_with = "deserialize_datetime")]
    pub since: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/anomalies",
    tag = "anomalies",
    params(
        ("since" = String, Query, description = "Only readings strictly after this instant (RFC3339)")
    ),
    responses(
        (status = 200, description = "Detected anomalies", body = Vec<Anomaly>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Reading store failure", body = ErrorResponse)
    )
)]
pub async fn list_anomalies(
    State(state): State<AppState>,
    query: Result<Query<AnomaliesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Anomaly>>> {
    let Query(AnomaliesQuery { since }) = query?;

    let anomalies = run_blocking(&state, move |service| service.get_anomalies(since)).await?;
    Ok(Json(anomalies))
}
