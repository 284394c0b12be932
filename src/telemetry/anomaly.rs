//! Threshold rules applied to stored readings.
//!
//! Each reading is checked against every rule independently, so one reading
//! can produce up to three anomalies. Records appear in rule order within a
//! reading and in store order across readings.

use chrono::{DateTime, Utc};

use crate::store::{ReadingStore, StoreError};

use super::{Anomaly, AnomalyKind, Reading, TelemetryStatus};

/// Battery levels strictly below this are reported.
pub const LOW_BATTERY_THRESHOLD: f64 = 30.0;
/// Temperatures strictly above this are reported.
pub const HIGH_TEMPERATURE_THRESHOLD: f64 = 40.0;

/// Anomalies for every reading with `timestamp > since`.
pub fn get_anomalies(
    store: &dyn ReadingStore,
    since: DateTime<Utc>,
) -> Result<Vec<Anomaly>, StoreError> {
    let readings = store.find_since(since)?;
    Ok(readings.iter().flat_map(detect).collect())
}

/// Evaluates the rules for a single reading.
pub fn detect(reading: &Reading) -> Vec<Anomaly> {
    let mut anomalies = Vec::with_capacity(3);

    if reading.battery_level < LOW_BATTERY_THRESHOLD {
        anomalies.push(anomaly(
            reading,
            AnomalyKind::LowBattery,
            Some(reading.battery_level),
            None,
        ));
    }

    if reading.temperature > HIGH_TEMPERATURE_THRESHOLD {
        anomalies.push(anomaly(
            reading,
            AnomalyKind::HighTemperature,
            None,
            Some(reading.temperature),
        ));
    }

    if reading.status == TelemetryStatus::Critical {
        anomalies.push(anomaly(
            reading,
            AnomalyKind::CriticalState,
            Some(reading.battery_level),
            Some(reading.temperature),
        ));
    }

    anomalies
}

fn anomaly(
    reading: &Reading,
    kind: AnomalyKind,
    battery_level: Option<f64>,
    temperature: Option<f64>,
) -> Anomaly {
    Anomaly {
        satellite_id: reading.satellite_id.clone(),
        timestamp: reading.timestamp,
        kind,
        battery_level,
        temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{at, input};
    use crate::store::MemoryStore;
    use crate::telemetry::TelemetryStatus::{Critical, Nominal, Warning};

    fn reading(battery_level: f64, temperature: f64, status: TelemetryStatus) -> Reading {
        Reading::from_input(1, input("SAT-1", 0, battery_level, temperature, status))
    }

    fn kinds(anomalies: &[Anomaly]) -> Vec<AnomalyKind> {
        anomalies.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn healthy_reading_is_clean() {
        assert!(detect(&reading(80.0, 20.0, Warning)).is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(detect(&reading(30.0, 40.0, Nominal)).is_empty());

        let low = detect(&reading(29.99, 40.0, Nominal));
        assert_eq!(kinds(&low), vec![AnomalyKind::LowBattery]);
        assert_eq!(low[0].battery_level, Some(29.99));
        assert_eq!(low[0].temperature, None);

        let hot = detect(&reading(30.0, 40.01, Nominal));
        assert_eq!(kinds(&hot), vec![AnomalyKind::HighTemperature]);
        assert_eq!(hot[0].battery_level, None);
        assert_eq!(hot[0].temperature, Some(40.01));
    }

    #[test]
    fn all_rules_fire_in_order() {
        let anomalies = detect(&reading(10.0, 50.0, Critical));
        assert_eq!(
            kinds(&anomalies),
            vec![
                AnomalyKind::LowBattery,
                AnomalyKind::HighTemperature,
                AnomalyKind::CriticalState,
            ]
        );
    }

    #[test]
    fn critical_state_carries_both_values() {
        let anomalies = detect(&reading(75.0, 12.5, Critical));
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::CriticalState);
        assert_eq!(anomalies[0].battery_level, Some(75.0));
        assert_eq!(anomalies[0].temperature, Some(12.5));
    }

    #[test]
    fn since_is_exclusive() {
        let store = MemoryStore::new();
        store
            .append_all(vec![
                input("SAT-1", 10, 5.0, 20.0, Nominal),
                input("SAT-1", 11, 5.0, 20.0, Nominal),
            ])
            .unwrap();

        let anomalies = get_anomalies(&store, at(10)).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].timestamp, at(11));
    }

    #[test]
    fn grouped_by_reading_in_time_order() {
        let store = MemoryStore::new();
        store
            .append_all(vec![
                input("SAT-2", 30, 10.0, 20.0, Critical),
                input("SAT-1", 20, 80.0, 45.0, Nominal),
            ])
            .unwrap();

        let anomalies = get_anomalies(&store, at(0)).unwrap();
        let summary: Vec<_> = anomalies
            .iter()
            .map(|a| (a.satellite_id.as_str(), a.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("SAT-1", AnomalyKind::HighTemperature),
                ("SAT-2", AnomalyKind::LowBattery),
                ("SAT-2", AnomalyKind::CriticalState),
            ]
        );
        assert_eq!(anomalies, get_anomalies(&store, at(0)).unwrap());
    }

    #[test]
    fn renders_absent_values_as_missing_fields() {
        let json = serde_json::to_value(&detect(&reading(10.0, 20.0, Nominal))[0]).unwrap();
        assert_eq!(json["type"], "LOW_BATTERY");
        assert_eq!(json["batteryLevel"], 10.0);
        assert!(json.get("temperature").is_none());
    }
}
