use chrono::{DateTime, Utc};
use std::sync::RwLock;

use crate::telemetry::{Reading, ReadingInput};

use super::{sort_chronologically, validate_batch, ReadingStore, StoreError};

#[derive(Default)]
struct Inner {
    readings: Vec<Reading>,
    next_id: u64,
}

/// Keeps readings in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered<F>(&self, keep: F) -> Vec<Reading>
    where
        F: Fn(&Reading) -> bool,
    {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.readings.iter().filter(|r| keep(r)).cloned().collect()
    }
}

impl ReadingStore for MemoryStore {
    fn append_all(&self, inputs: Vec<ReadingInput>) -> Result<Vec<Reading>, StoreError> {
        validate_batch(&inputs)?;

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let mut stored = Vec::with_capacity(inputs.len());
        for input in inputs {
            inner.next_id += 1;
            stored.push(Reading::from_input(inner.next_id, input));
        }
        inner.readings.extend(stored.iter().cloned());
        Ok(stored)
    }

    fn find_all(&self) -> Result<Vec<Reading>, StoreError> {
        Ok(self.filtered(|_| true))
    }

    fn find_by_satellite(&self, satellite_id: &str) -> Result<Vec<Reading>, StoreError> {
        Ok(self.filtered(|r| r.satellite_id == satellite_id))
    }

    fn find_by_satellite_in_range(
        &self,
        satellite_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reading>, StoreError> {
        let mut readings = self.filtered(|r| {
            r.satellite_id == satellite_id && r.timestamp >= from && r.timestamp <= to
        });
        sort_chronologically(&mut readings);
        Ok(readings)
    }

    fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Reading>, StoreError> {
        let mut readings = self.filtered(|r| r.timestamp > since);
        sort_chronologically(&mut readings);
        Ok(readings)
    }
}
