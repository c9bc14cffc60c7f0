//! TransportAPI response DTOs.
//!
//! These types map directly to the TransportAPI UK JSON responses. Fields
//! are optional because the API omits rather than nulls them, and the
//! departure records themselves stay untyped: their shape varies by
//! operator and is handled by the departure mapper.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Response from `places.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    /// When the response was generated.
    pub request_time: Option<String>,

    /// Matching places, nearest first.
    pub member: Option<Vec<PlaceDto>>,
}

/// A single place (here always a bus stop).
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    /// ATCO code of the stop.
    pub atcocode: Option<String>,

    /// Human-readable name.
    pub name: Option<String>,

    /// Distance from the query point in metres.
    pub distance: Option<f64>,

    /// Stop letter or bay, e.g. "Stop X".
    pub indicator: Option<String>,

    /// Town or district.
    pub locality: Option<String>,

    /// Place type ("bus_stop").
    #[serde(rename = "type")]
    pub place_type: Option<String>,
}

/// Response from `bus/stop/{atcocode}/live.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveDeparturesResponse {
    /// Stop the board is for.
    pub atcocode: Option<String>,

    /// Stop name.
    pub name: Option<String>,

    /// Departures grouped by line (or under `"all"` when ungrouped).
    /// Each group is normally an array of raw departure records.
    pub departures: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_places() {
        let json = r#"{
            "request_time": "2026-10-19T10:30:00+01:00",
            "source": "NaPTAN",
            "member": [
                {
                    "type": "bus_stop",
                    "name": "Strand / Savoy Street",
                    "description": "London",
                    "latitude": 51.5101,
                    "longitude": -0.1206,
                    "accuracy": 20,
                    "atcocode": "490008660N",
                    "distance": 120
                },
                {
                    "type": "bus_stop",
                    "name": "Waterloo Station",
                    "atcocode": "490009333W",
                    "indicator": "Stop F",
                    "locality": "London",
                    "distance": 340.5
                }
            ]
        }"#;

        let places: PlacesResponse = serde_json::from_str(json).unwrap();
        let member = places.member.unwrap();
        assert_eq!(member.len(), 2);
        assert_eq!(member[0].atcocode.as_deref(), Some("490008660N"));
        assert_eq!(member[0].distance, Some(120.0));
        assert_eq!(member[0].place_type.as_deref(), Some("bus_stop"));
        assert!(member[0].indicator.is_none());
        assert_eq!(member[1].indicator.as_deref(), Some("Stop F"));
    }

    #[test]
    fn deserialize_places_without_member() {
        let places: PlacesResponse = serde_json::from_str(r#"{"error": "bad key"}"#).unwrap();
        assert!(places.member.is_none());
    }

    #[test]
    fn deserialize_live_departures() {
        let json = r#"{
            "atcocode": "490008660N",
            "name": "Strand / Savoy Street",
            "departures": {
                "24": [
                    {"line": "24", "direction": "Pimlico", "best_departure_estimate": "10:33"}
                ],
                "15": [
                    {"line": "15", "direction": "Tower Hill", "expected_departure_time": "10:37",
                     "status": {"cancellation": {"value": false, "reason": null}}}
                ]
            }
        }"#;

        let live: LiveDeparturesResponse = serde_json::from_str(json).unwrap();
        let groups = live.departures.unwrap();
        let keys: Vec<_> = groups.keys().map(String::as_str).collect();
        // Feed order, not sorted
        assert_eq!(keys, ["24", "15"]);
        assert!(groups["15"][0]["status"].is_object());
    }
}
