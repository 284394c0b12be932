use std::collections::BTreeMap;

use crate::store::{ReadingStore, StoreError};

use super::{Reading, SatelliteSummary};

/// Returns one summary per satellite in the store, ordered by satellite id.
pub fn list_summaries(store: &dyn ReadingStore) -> Result<Vec<SatelliteSummary>, StoreError> {
    let readings = store.find_all()?;

    Ok(latest_per_satellite(readings)
        .into_values()
        .map(|latest| SatelliteSummary {
            satellite_id: latest.satellite_id,
            last_contact: latest.timestamp,
            last_status: latest.status,
        })
        .collect())
}

/// Most recent reading of one satellite, if it has any.
pub fn get_latest(
    store: &dyn ReadingStore,
    satellite_id: &str,
) -> Result<Option<Reading>, StoreError> {
    let readings = store.find_by_satellite(satellite_id)?;

    Ok(readings.into_iter().fold(None, |latest, candidate| match latest {
        Some(current) if !supersedes(&candidate, &current) => Some(current),
        _ => Some(candidate),
    }))
}

/// Folds readings into the latest one per satellite. A `BTreeMap` keeps the
/// result ordered by satellite id.
fn latest_per_satellite(readings: Vec<Reading>) -> BTreeMap<String, Reading> {
    let mut latest: BTreeMap<String, Reading> = BTreeMap::new();

    for reading in readings {
        match latest.get(&reading.satellite_id) {
            Some(current) if !supersedes(&reading, current) => {}
            _ => {
                latest.insert(reading.satellite_id.clone(), reading);
            }
        }
    }

    latest
}

/// A later timestamp wins; on equal timestamps the higher id (the later
/// ingestion) wins. Independent of the order the store iterates in.
fn supersedes(candidate: &Reading, current: &Reading) -> bool {
    (candidate.timestamp, candidate.id) > (current.timestamp, current.id)
}
