pub mod anomalies;
pub mod error;
pub mod health;
pub mod satellites;
pub mod telemetry;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::store::StoreError;
use crate::telemetry::TelemetryService;

use super::state::AppState;
use error::{ApiError, ApiResult};

/// Runs a service call on the blocking pool, bounded by the request timeout.
///
/// Store calls may block on disk IO; nothing is held across the await. Only
/// used for reads, which are safe to abandon.
pub(crate) async fn run_blocking<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&TelemetryService) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    let task = tokio::task::spawn_blocking(move || op(&service));

    match tokio::time::timeout(state.request_timeout(), task).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(join_error)) => Err(ApiError::Internal(join_error.to_string())),
        Err(_) => Err(ApiError::Timeout),
    }
}

/// Runs a write on the blocking pool and waits for it to finish. Writes are
/// never cut off by the request timeout.
pub(crate) async fn run_blocking_to_completion<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&TelemetryService) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|join_error| ApiError::Internal(join_error.to_string()))?
        .map_err(ApiError::from)
}

pub(crate) fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
