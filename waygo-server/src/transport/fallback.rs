//! Static dataset served when TransportAPI is unreachable.
//!
//! The app stays usable offline or without API credentials: nearby stops
//! and live departures both degrade to this fixed central-London set, and
//! responses say which source they came from.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{AtcoCode, Departure, Stop, map_all};

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

/// A result tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: DataSource::Fallback,
        }
    }
}

/// (atcocode, name, distance, indicator)
const FALLBACK_STOPS: [(&str, &str, f64, &str); 6] = [
    ("490008660N", "Strand / Savoy Street", 120.0, "Stop X"),
    ("490009333W", "Waterloo Station", 340.0, "Stop F"),
    ("490000098E", "Piccadilly Circus", 450.0, "Stop A"),
    ("490000103S", "Oxford Circus", 580.0, "Stop C"),
    ("490000234N", "King's Cross Station", 720.0, "Stop M"),
    ("490000567W", "Victoria Station", 890.0, "Stop D"),
];

const FALLBACK_LOCALITY: &str = "London";

/// The fallback stops, nearest first.
pub fn fallback_stops() -> Vec<Stop> {
    FALLBACK_STOPS
        .iter()
        .filter_map(|(code, name, distance, indicator)| {
            let atcocode = AtcoCode::parse(code).ok()?;
            Some(Stop {
                atcocode,
                name: (*name).to_string(),
                distance: *distance,
                indicator: Some((*indicator).to_string()),
                locality: Some(FALLBACK_LOCALITY.to_string()),
            })
        })
        .collect()
}

/// Fallback departures as raw feed records.
pub fn fallback_departure_records() -> Vec<Value> {
    vec![
        json!({"line": "24", "destination": "Pimlico", "expected": "3 mins", "status": "On time"}),
        json!({"line": "15", "destination": "Tower Hill", "expected": "7 mins", "status": "On time"}),
        json!({"line": "11", "destination": "Liverpool Street", "expected": "12 mins", "status": "On time"}),
        json!({"line": "23", "destination": "Westbourne Park", "expected": "15 mins", "status": "Delayed"}),
        json!({"line": "88", "destination": "Parliament Hill Fields", "expected": "18 mins", "status": "On time"}),
    ]
}

/// Fallback departures, mapped the same way live records are.
pub fn fallback_departures() -> Vec<Departure> {
    map_all(&fallback_departure_records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusClass;

    #[test]
    fn all_fallback_stops_valid() {
        let stops = fallback_stops();
        assert_eq!(stops.len(), FALLBACK_STOPS.len());
        assert_eq!(stops[0].name, "Strand / Savoy Street");
        assert!(stops.iter().all(|s| s.locality.as_deref() == Some("London")));
    }

    #[test]
    fn fallback_stops_sorted_by_distance() {
        let stops = fallback_stops();
        assert!(stops.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn fallback_departures_mapped() {
        let departures = fallback_departures();
        assert_eq!(departures.len(), 5);
        assert_eq!(departures[0].line, "24");
        assert_eq!(departures[0].destination, "Pimlico");
        assert_eq!(departures[0].expected_time, "3 mins");
        assert_eq!(departures[0].status_class, StatusClass::OnTime);

        let disrupted: Vec<_> = departures.iter().filter(|d| d.is_disrupted()).collect();
        assert_eq!(disrupted.len(), 1);
        assert_eq!(disrupted[0].line, "23");
    }

    #[test]
    fn data_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DataSource::Fallback).unwrap(),
            r#""fallback""#
        );
    }
}
