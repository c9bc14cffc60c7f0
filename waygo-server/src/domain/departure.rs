//! Canonical departure records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::{StatusClass, is_present, normalize};

/// Shown when a record has no route number.
pub const NO_LINE: &str = "N/A";

/// Shown when a record has no destination or direction.
pub const UNKNOWN_DESTINATION: &str = "Unknown Destination";

/// Shown when a record has no time estimate.
pub const DUE: &str = "Due";

/// Destination fields, most explicit first. `direction` is the bus's
/// heading sign and only used when no destination is named.
const DESTINATION_FIELDS: [&str; 3] = ["destination", "destination_name", "direction"];

/// Expected time fields, most explicit first.
const EXPECTED_TIME_FIELDS: [&str; 3] =
    ["expected_departure_time", "expected", "best_departure_estimate"];

const STATUS_FIELDS: [&str; 2] = ["status", "departure_status"];

static NO_STATUS: Value = Value::Null;

/// A single upcoming departure from a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub line: String,
    pub destination: String,
    pub expected_time: String,
    pub status_class: StatusClass,
    pub status_text: String,
    /// The feed gave no usable status and "On Time" was assumed.
    #[serde(default)]
    pub status_defaulted: bool,
}

impl Departure {
    pub fn is_disrupted(&self) -> bool {
        self.status_class.is_disrupted()
    }
}

/// Text of a scalar field: non-empty strings as-is, numbers in decimal.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First field in `keys` holding usable text.
fn first_text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(key).and_then(scalar_text))
}

/// First supplied status field; `false`, `0` and `""` count as absent.
/// Shape checks are the normalizer's job.
fn first_status(record: &Value) -> &Value {
    STATUS_FIELDS
        .iter()
        .filter_map(|key| record.get(key))
        .find(|v| is_present(v))
        .unwrap_or(&NO_STATUS)
}

/// Map one raw departure record. Never fails; missing fields get defaults.
pub fn map_departure(record: &Value) -> Departure {
    let status = normalize(first_status(record));

    Departure {
        line: first_text(record, &["line"]).unwrap_or_else(|| NO_LINE.to_string()),
        destination: first_text(record, &DESTINATION_FIELDS)
            .unwrap_or_else(|| UNKNOWN_DESTINATION.to_string()),
        expected_time: first_text(record, &EXPECTED_TIME_FIELDS)
            .unwrap_or_else(|| DUE.to_string()),
        status_class: status.class,
        status_text: status.text,
        status_defaulted: status.defaulted,
    }
}

/// Map raw departure records, keeping length and order.
pub fn map_all(records: &[Value]) -> Vec<Departure> {
    records.iter().map(map_departure).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_gets_every_default() {
        let departures = map_all(&[json!({})]);
        assert_eq!(departures.len(), 1);

        let d = &departures[0];
        assert_eq!(d.line, "N/A");
        assert_eq!(d.destination, "Unknown Destination");
        assert_eq!(d.expected_time, "Due");
        assert_eq!(d.status_text, "On Time");
        assert_eq!(d.status_class, StatusClass::OnTime);
        assert!(d.status_defaulted);
    }

    #[test]
    fn transport_api_record() {
        let departures = map_all(&[json!({
            "line": "24",
            "destination_name": "Pimlico",
            "best_departure_estimate": "3 mins",
            "status": "Delayed"
        })]);

        assert_eq!(departures.len(), 1);
        let d = &departures[0];
        assert_eq!(d.line, "24");
        assert_eq!(d.destination, "Pimlico");
        assert_eq!(d.expected_time, "3 mins");
        assert!(d.is_disrupted());
    }

    #[test]
    fn explicit_destination_beats_direction() {
        let d = map_departure(&json!({
            "direction": "Westbound",
            "destination_name": "Tower Hill"
        }));
        assert_eq!(d.destination, "Tower Hill");

        let d = map_departure(&json!({"direction": "Liverpool Street"}));
        assert_eq!(d.destination, "Liverpool Street");

        let d = map_departure(&json!({"destination": "", "direction": "Victoria"}));
        assert_eq!(d.destination, "Victoria");
    }

    #[test]
    fn explicit_expected_time_beats_estimate() {
        let d = map_departure(&json!({
            "expected_departure_time": "10:42",
            "best_departure_estimate": "10:45"
        }));
        assert_eq!(d.expected_time, "10:42");

        let d = map_departure(&json!({"expected": "7 mins"}));
        assert_eq!(d.expected_time, "7 mins");
    }

    #[test]
    fn numeric_line_rendered_as_text() {
        let d = map_departure(&json!({"line": 88}));
        assert_eq!(d.line, "88");
    }

    #[test]
    fn departure_status_used_when_status_missing() {
        let d = map_departure(&json!({"departure_status": "CANCELLED"}));
        assert_eq!(d.status_class, StatusClass::Cancelled);

        let d = map_departure(&json!({"status": null, "departure_status": "On time"}));
        assert_eq!(d.status_text, "On time");
        assert!(!d.status_defaulted);
    }

    #[test]
    fn falsy_status_does_not_hide_departure_status() {
        let d = map_departure(&json!({"status": false, "departure_status": "Delayed"}));
        assert_eq!(d.status_class, StatusClass::Delayed);
        assert_eq!(d.status_text, "Delayed");

        let d = map_departure(&json!({"status": 0, "departure_status": "Cancelled"}));
        assert_eq!(d.status_class, StatusClass::Cancelled);
        assert!(d.is_disrupted());
        assert!(!d.status_defaulted);
    }

    #[test]
    fn nested_status_object() {
        let d = map_departure(&json!({
            "line": "15",
            "status": {"cancellation": {"reason": "Road closure"}}
        }));
        assert_eq!(d.status_text, "Road closure");
        assert_eq!(d.status_class, StatusClass::Unknown);
    }

    #[test]
    fn non_object_records_map_to_defaults() {
        let departures = map_all(&[json!(null), json!("24"), json!([1, 2])]);
        assert_eq!(departures.len(), 3);
        for d in &departures {
            assert_eq!(d.line, "N/A");
            assert_eq!(d.destination, "Unknown Destination");
        }
    }

    #[test]
    fn order_preserved() {
        let departures = map_all(&[
            json!({"line": "11"}),
            json!({"line": "23"}),
            json!({"line": "88"}),
        ]);
        let lines: Vec<_> = departures.iter().map(|d| d.line.as_str()).collect();
        assert_eq!(lines, ["11", "23", "88"]);
    }
}
