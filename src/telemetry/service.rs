use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::store::{ReadingStore, StoreError};

use super::{anomaly, history, ingest, summary};
use super::{Anomaly, Reading, ReadingInput, SatelliteSummary};

/// Entry point used by the transport layers. Cloning shares the same store.
#[derive(Clone)]
pub struct TelemetryService {
    store: Arc<dyn ReadingStore>,
}

impl TelemetryService {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        TelemetryService { store }
    }

    pub fn ingest(&self, batch: Vec<ReadingInput>) -> Result<usize, StoreError> {
        ingest::ingest(self.store.as_ref(), batch)
    }

    pub fn list_summaries(&self) -> Result<Vec<SatelliteSummary>, StoreError> {
        summary::list_summaries(self.store.as_ref())
    }

    pub fn get_latest(&self, satellite_id: &str) -> Result<Option<Reading>, StoreError> {
        summary::get_latest(self.store.as_ref(), satellite_id)
    }

    pub fn get_history(
        &self,
        satellite_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reading>, StoreError> {
        history::get_history(self.store.as_ref(), satellite_id, from, to)
    }

    pub fn get_anomalies(&self, since: DateTime<Utc>) -> Result<Vec<Anomaly>, StoreError> {
        anomaly::get_anomalies(self.store.as_ref(), since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{at, input};
    use crate::store::{FileStore, MemoryStore, StoreError};
    use std::fs::OpenOptions;
    use std::io::Write;
    use crate::telemetry::AnomalyKind;
    use crate::telemetry::TelemetryStatus::{Nominal, Warning};
    use tempfile::tempdir;

    fn fleet_batch() -> Vec<ReadingInput> {
        vec![
            input("SAT-1", 10, 82.5, 15.2, Nominal),
            input("SAT-1", 20, 25.0, 45.0, Warning),
            input("SAT-2", 15, 90.0, 20.0, Nominal),
        ]
    }

    fn check_fleet_scenario(service: &TelemetryService) {
        assert_eq!(service.ingest(fleet_batch()).unwrap(), 3);

        let summaries = service.list_summaries().unwrap();
        assert_eq!(
            summaries,
            vec![
                SatelliteSummary {
                    satellite_id: "SAT-1".into(),
                    last_contact: at(20),
                    last_status: Warning,
                },
                SatelliteSummary {
                    satellite_id: "SAT-2".into(),
                    last_contact: at(15),
                    last_status: Nominal,
                },
            ]
        );

        let anomalies = service.get_anomalies(at(5)).unwrap();
        assert_eq!(
            anomalies,
            vec![
                Anomaly {
                    satellite_id: "SAT-1".into(),
                    timestamp: at(20),
                    kind: AnomalyKind::LowBattery,
                    battery_level: Some(25.0),
                    temperature: None,
                },
                Anomaly {
                    satellite_id: "SAT-1".into(),
                    timestamp: at(20),
                    kind: AnomalyKind::HighTemperature,
                    battery_level: None,
                    temperature: Some(45.0),
                },
            ]
        );

        let latest = service.get_latest("SAT-1").unwrap().unwrap();
        assert_eq!(latest.timestamp, at(20));
        assert_eq!(service.get_history("SAT-1", at(0), at(15)).unwrap().len(), 1);
    }

    #[test]
    fn fleet_scenario_in_memory() {
        check_fleet_scenario(&TelemetryService::new(Arc::new(MemoryStore::new())));
    }

    #[test]
    fn fleet_scenario_on_disk() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        check_fleet_scenario(&TelemetryService::new(Arc::new(store)));
    }

    #[test]
    fn read_failures_reach_every_query() {
        let dir = tempdir().unwrap();
        let service = TelemetryService::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        service.ingest(fleet_batch()).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(dir.path().join("readings.jsonl"))
            .unwrap();
        writeln!(file, "{{\"id\":4,\"satelliteId\":\"SA").unwrap();
        drop(file);

        assert!(matches!(service.list_summaries(), Err(StoreError::Json(_))));
        assert!(matches!(service.get_latest("SAT-1"), Err(StoreError::Json(_))));
        assert!(matches!(
            service.get_history("SAT-1", at(0), at(100)),
            Err(StoreError::Json(_))
        ));
        assert!(matches!(service.get_anomalies(at(0)), Err(StoreError::Json(_))));
    }
}
