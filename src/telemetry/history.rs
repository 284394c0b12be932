use chrono::{DateTime, Utc};

use crate::store::{ReadingStore, StoreError};

use super::Reading;

/// Readings of one satellite with `from <= timestamp <= to`, oldest first.
///
/// An unknown satellite and an empty window look the same: an empty list.
pub fn get_history(
    store: &dyn ReadingStore,
    satellite_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Reading>, StoreError> {
    store.find_by_satellite_in_range(satellite_id, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{at, input};
    use crate::store::MemoryStore;
    use crate::telemetry::TelemetryStatus::Nominal;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .append_all(vec![
                input("SAT-1", 10, 80.0, 20.0, Nominal),
                input("SAT-1", 20, 79.0, 21.0, Nominal),
                input("SAT-1", 30, 78.0, 22.0, Nominal),
                input("SAT-2", 20, 90.0, 20.0, Nominal),
            ])
            .unwrap();
        store
    }

    #[test]
    fn bounds_are_inclusive() {
        let history = get_history(&seeded(), "SAT-1", at(10), at(20)).unwrap();
        assert_eq!(
            history.iter().map(|r| r.timestamp).collect::<Vec<_>>(),
            vec![at(10), at(20)]
        );
        assert!(history.iter().all(|r| r.satellite_id == "SAT-1"));
    }

    #[test]
    fn single_instant_window() {
        let history = get_history(&seeded(), "SAT-1", at(30), at(30)).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].battery_level, 78.0);
    }

    #[test]
    fn no_data_is_empty_not_error() {
        let store = seeded();
        assert!(get_history(&store, "SAT-9", at(0), at(100)).unwrap().is_empty());
        assert!(get_history(&store, "SAT-1", at(40), at(50)).unwrap().is_empty());
        assert!(get_history(&store, "SAT-1", at(30), at(10)).unwrap().is_empty());
    }
}
