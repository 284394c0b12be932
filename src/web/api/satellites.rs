use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::telemetry::{Reading, SatelliteSummary};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::{deserialize_datetime, run_blocking};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellites",
    responses(
        (status = 200, description = "Latest status of every satellite, by id", body = Vec<SatelliteSummary>),
        (status = 500, description = "Reading store failure", body = ErrorResponse)
    )
)]
pub async fn list_satellites(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SatelliteSummary>>> {
    let summaries = run_blocking(&state, |service| service.list_summaries()).await?;
    Ok(Json(summaries))
}

#[utoipa::path(
    get,
    path = "/api/satellites/{id}/status",
    tag = "satellites",
    params(
        ("id" = String, Path, description = "Satellite ID")
    ),
    responses(
        (status = 200, description = "Most recent reading", body = Reading),
        (status = 404, description = "No readings for this satellite", body = ErrorResponse),
        (status = 500, description = "Reading store failure", body = ErrorResponse)
    )
)]
pub async fn latest_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Reading>> {
    run_blocking(&state, move |service| service.get_latest(&id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("satellite_not_found"))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryQuery {
    #[serde(deserialize_with = "deserialize_datetime")]
    pub from: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub to: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/satellites/{id}/telemetry",
    tag = "satellites",
    params(
        ("id" = String, Path, description = "Satellite ID"),
        ("from" = String, Query, description = "Window start, inclusive (RFC3339)"),
        ("to" = String, Query, description = "Window end, inclusive (RFC3339)")
    ),
    responses(
        (status = 200, description = "Readings in the window, oldest first", body = Vec<Reading>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 500, description = "Reading store failure", body = ErrorResponse)
    )
)]
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Reading>>> {
    let Query(window) = query?;

    let readings = run_blocking(&state, move |service| {
        service.get_history(&id, window.from, window.to)
    })
    .await?;

    Ok(Json(readings))
}
