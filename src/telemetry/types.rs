use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TelemetryStatus {
    Nominal,
    Warning,
    Critical,
}

/// Attitude of the satellite at sampling time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Orientation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// A telemetry sample as submitted for ingestion, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingInput {
    pub satellite_id: String,
    pub timestamp: DateTime<Utc>,
    pub battery_level: f64,
    pub temperature: f64,
    pub orientation: Orientation,
    pub status: TelemetryStatus,
}

/// A persisted telemetry sample. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: u64,
    pub satellite_id: String,
    pub timestamp: DateTime<Utc>,
    pub battery_level: f64,
    pub temperature: f64,
    pub orientation: Orientation,
    pub status: TelemetryStatus,
}

impl Reading {
    pub fn from_input(id: u64, input: ReadingInput) -> Self {
        Reading {
            id,
            satellite_id: input.satellite_id,
            timestamp: input.timestamp,
            battery_level: input.battery_level,
            temperature: input.temperature,
            orientation: input.orientation,
            status: input.status,
        }
    }
}

/// Latest known state of one satellite.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteSummary {
    pub satellite_id: String,
    pub last_contact: DateTime<Utc>,
    pub last_status: TelemetryStatus,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    LowBattery,
    HighTemperature,
    CriticalState,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub satellite_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}
