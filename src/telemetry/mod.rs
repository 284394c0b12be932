pub mod anomaly;
pub mod history;
pub mod ingest;
pub mod service;
pub mod summary;
mod types;

pub use service::TelemetryService;
pub use types::{
    Anomaly, AnomalyKind, Orientation, Reading, ReadingInput, SatelliteSummary, TelemetryStatus,
};
