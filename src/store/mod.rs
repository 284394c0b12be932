mod error;
mod file;
mod memory;

use chrono::{DateTime, Utc};

use crate::telemetry::{Reading, ReadingInput};

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable home of telemetry readings.
///
/// `find_all` and `find_by_satellite` return readings in id order. The two
/// time-bounded lookups return readings sorted by timestamp, ties by id.
pub trait ReadingStore: Send + Sync {
    /// Assigns ids and persists the batch. Either every reading is stored or
    /// none is.
    fn append_all(&self, inputs: Vec<ReadingInput>) -> Result<Vec<Reading>, StoreError>;

    fn find_all(&self) -> Result<Vec<Reading>, StoreError>;

    fn find_by_satellite(&self, satellite_id: &str) -> Result<Vec<Reading>, StoreError>;

    /// Readings with `from <= timestamp <= to`.
    fn find_by_satellite_in_range(
        &self,
        satellite_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reading>, StoreError>;

    /// Readings with `timestamp > since`, across all satellites.
    fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Reading>, StoreError>;
}

/// Checks the constraints every backend enforces before writing a batch.
pub(crate) fn validate_batch(inputs: &[ReadingInput]) -> Result<(), StoreError> {
    for (index, input) in inputs.iter().enumerate() {
        let reject = |reason: &str| StoreError::Constraint {
            index,
            reason: reason.to_string(),
        };

        if input.satellite_id.trim().is_empty() {
            return Err(reject("satellite id must not be empty"));
        }
        if !input.battery_level.is_finite() {
            return Err(reject("battery level must be a finite number"));
        }
        if !input.temperature.is_finite() {
            return Err(reject("temperature must be a finite number"));
        }
        let o = &input.orientation;
        if !(o.roll.is_finite() && o.pitch.is_finite() && o.yaw.is_finite()) {
            return Err(reject("orientation must be finite"));
        }
    }
    Ok(())
}

pub(crate) fn sort_chronologically(readings: &mut [Reading]) {
    readings.sort_by_key(|r| (r.timestamp, r.id));
}
