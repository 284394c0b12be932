use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry::ReadingInput;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::run_blocking_to_completion;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub stored: usize,
}

#[utoipa::path(
    post,
    path = "/api/telemetry",
    tag = "telemetry",
    request_body = Vec<ReadingInput>,
    responses(
        (status = 201, description = "Batch stored", body = IngestResponse),
        (status = 400, description = "Malformed or rejected batch", body = ErrorResponse),
        (status = 500, description = "Reading store failure", body = ErrorResponse)
    )
)]
pub async fn ingest(
    State(state): State<AppState>,
    body: Result<Json<Vec<ReadingInput>>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(batch) = body?;

    let stored = run_blocking_to_completion(&state, move |service| service.ingest(batch)).await?;

    Ok((StatusCode::CREATED, Json(IngestResponse { stored })))
}
