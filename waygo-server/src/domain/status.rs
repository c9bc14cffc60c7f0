//! Departure status normalization.
//!
//! TransportAPI reports a departure's status in several shapes depending on
//! the operator feed: a plain string, or an object carrying a
//! `cancellation`, `value` or `reason` field, where `cancellation` may
//! itself be a string or an object. This module collapses all of them into
//! a [`NormalizedStatus`] and never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Text shown when the feed gives no usable status.
pub const DEFAULT_STATUS_TEXT: &str = "On Time";

/// Canonical status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    OnTime,
    Delayed,
    Cancelled,
    Unknown,
}

impl StatusClass {
    /// Classify free status text by case-insensitive substring.
    ///
    /// Disruption wins over "on time", so "Delayed, was on time" is
    /// [`StatusClass::Delayed`].
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("cancelled") {
            StatusClass::Cancelled
        } else if lower.contains("delay") {
            StatusClass::Delayed
        } else if lower.contains("on time") {
            StatusClass::OnTime
        } else {
            StatusClass::Unknown
        }
    }

    /// Delayed or cancelled.
    pub fn is_disrupted(self) -> bool {
        matches!(self, StatusClass::Delayed | StatusClass::Cancelled)
    }
}

/// A status ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedStatus {
    pub class: StatusClass,
    /// Never empty.
    pub text: String,
    /// True when the feed supplied nothing usable and [`DEFAULT_STATUS_TEXT`]
    /// was substituted.
    pub defaulted: bool,
}

impl NormalizedStatus {
    fn reported(text: &str) -> Self {
        Self {
            class: StatusClass::classify(text),
            text: text.to_string(),
            defaulted: false,
        }
    }

    fn fallback() -> Self {
        Self {
            class: StatusClass::classify(DEFAULT_STATUS_TEXT),
            text: DEFAULT_STATUS_TEXT.to_string(),
            defaulted: true,
        }
    }
}

/// Nested fields a status object may carry, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NestedField {
    Cancellation,
    Value,
    Reason,
}

impl NestedField {
    const ORDER: [NestedField; 3] = [
        NestedField::Cancellation,
        NestedField::Value,
        NestedField::Reason,
    ];

    fn key(self) -> &'static str {
        match self {
            NestedField::Cancellation => "cancellation",
            NestedField::Value => "value",
            NestedField::Reason => "reason",
        }
    }
}

/// The shapes a raw status field can take.
#[derive(Debug, Clone, Copy)]
enum RawStatus<'a> {
    /// Absent, null or empty.
    Missing,
    Text(&'a str),
    Nested(NestedField, &'a Value),
    /// Any other value: numbers, booleans, arrays, objects without a
    /// known field.
    Unrecognized,
}

impl<'a> RawStatus<'a> {
    fn of(raw: &'a Value) -> Self {
        match raw {
            Value::Null => RawStatus::Missing,
            Value::String(s) if s.is_empty() => RawStatus::Missing,
            Value::String(s) => RawStatus::Text(s),
            Value::Object(map) => NestedField::ORDER
                .iter()
                .find_map(|field| {
                    map.get(field.key())
                        .filter(|v| is_present(v))
                        .map(|v| RawStatus::Nested(*field, v))
                })
                .unwrap_or(RawStatus::Unrecognized),
            _ => RawStatus::Unrecognized,
        }
    }

    /// The status text this shape carries, if it carries one.
    fn text(self) -> Option<&'a str> {
        match self {
            RawStatus::Text(s) => Some(s),
            RawStatus::Nested(NestedField::Cancellation, Value::Object(map)) => {
                [NestedField::Reason, NestedField::Value]
                    .iter()
                    .find_map(|field| map.get(field.key()).filter(|v| is_present(v)))
                    .and_then(Value::as_str)
            }
            RawStatus::Nested(_, inner) => inner.as_str(),
            RawStatus::Missing | RawStatus::Unrecognized => None,
        }
    }
}

/// Whether a JSON value counts as supplied: null, false, zero and the
/// empty string do not.
pub(super) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Normalize a raw status value from the feed.
///
/// Pass [`Value::Null`] when the record has no status at all.
pub fn normalize(raw: &Value) -> NormalizedStatus {
    let shape = RawStatus::of(raw);
    match shape.text().filter(|s| !s.is_empty()) {
        Some(text) => NormalizedStatus::reported(text),
        None => {
            if !matches!(shape, RawStatus::Missing) {
                debug!(raw = %raw, "unrecognized status shape, defaulting to on time");
            }
            NormalizedStatus::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_used_as_is() {
        let status = normalize(&json!("On time"));
        assert_eq!(status.class, StatusClass::OnTime);
        assert_eq!(status.text, "On time");
        assert!(!status.defaulted);
    }

    #[test]
    fn null_and_empty_default_to_on_time() {
        for raw in [Value::Null, json!(""), json!({})] {
            let status = normalize(&raw);
            assert_eq!(status.text, "On Time");
            assert_eq!(status.class, StatusClass::OnTime);
            assert!(status.defaulted);
        }
    }

    #[test]
    fn cancellation_object_prefers_reason() {
        let status = normalize(&json!({"cancellation": {"reason": "Signal fault"}}));
        assert_eq!(status.text, "Signal fault");
        assert_eq!(status.class, StatusClass::Unknown);
        assert!(!status.defaulted);

        let status = normalize(&json!({
            "cancellation": {"reason": "Driver shortage", "value": "Cancelled"}
        }));
        assert_eq!(status.text, "Driver shortage");
    }

    #[test]
    fn cancellation_object_falls_back_to_value() {
        let status = normalize(&json!({"cancellation": {"reason": "", "value": "Cancelled"}}));
        assert_eq!(status.text, "Cancelled");
        assert_eq!(status.class, StatusClass::Cancelled);
    }

    #[test]
    fn cancellation_object_without_fields_defaults() {
        let status = normalize(&json!({"cancellation": {"code": 7}}));
        assert_eq!(status.text, "On Time");
        assert!(status.defaulted);
    }

    #[test]
    fn cancellation_string_used_directly() {
        let status = normalize(&json!({"cancellation": "Bus cancelled"}));
        assert_eq!(status.text, "Bus cancelled");
        assert_eq!(status.class, StatusClass::Cancelled);
    }

    #[test]
    fn cancellation_takes_priority_over_value() {
        let status = normalize(&json!({"value": "On time", "cancellation": "Cancelled"}));
        assert_eq!(status.class, StatusClass::Cancelled);
    }

    #[test]
    fn empty_cancellation_skipped_for_value() {
        let status = normalize(&json!({"cancellation": "", "value": "Delayed 5 min"}));
        assert_eq!(status.text, "Delayed 5 min");
        assert!(status.class.is_disrupted());
    }

    #[test]
    fn value_then_reason() {
        let status = normalize(&json!({"value": "Delayed 5 min"}));
        assert_eq!(status.class, StatusClass::Delayed);
        assert!(status.class.is_disrupted());

        let status = normalize(&json!({"reason": "Heavy traffic delays"}));
        assert_eq!(status.text, "Heavy traffic delays");
        assert_eq!(status.class, StatusClass::Delayed);
    }

    #[test]
    fn non_string_results_forced_to_default() {
        for raw in [
            json!({"value": 12}),
            json!({"reason": true}),
            json!({"cancellation": {"reason": 3}}),
            json!({"cancellation": 1}),
            json!(42),
            json!(true),
            json!(["Delayed"]),
        ] {
            let status = normalize(&raw);
            assert_eq!(status.text, "On Time", "raw: {raw}");
            assert!(status.defaulted, "raw: {raw}");
        }
    }

    #[test]
    fn classification() {
        assert_eq!(StatusClass::classify("DELAYED"), StatusClass::Delayed);
        assert_eq!(StatusClass::classify("Minor delays"), StatusClass::Delayed);
        assert_eq!(StatusClass::classify("Cancelled"), StatusClass::Cancelled);
        assert_eq!(
            StatusClass::classify("Cancelled due to delays"),
            StatusClass::Cancelled
        );
        assert_eq!(StatusClass::classify("on TIME"), StatusClass::OnTime);
        assert_eq!(StatusClass::classify("Early"), StatusClass::Unknown);
        assert_eq!(StatusClass::classify("3 mins"), StatusClass::Unknown);
    }

    #[test]
    fn disrupted_classes() {
        assert!(StatusClass::Delayed.is_disrupted());
        assert!(StatusClass::Cancelled.is_disrupted());
        assert!(!StatusClass::OnTime.is_disrupted());
        assert!(!StatusClass::Unknown.is_disrupted());
    }

    #[test]
    fn status_class_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&StatusClass::OnTime).unwrap(),
            r#""on_time""#
        );
        assert_eq!(
            serde_json::from_str::<StatusClass>(r#""cancelled""#).unwrap(),
            StatusClass::Cancelled
        );
    }
}
