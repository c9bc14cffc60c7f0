//! Conversion from TransportAPI DTOs to domain types.

use serde_json::Value;
use tracing::warn;

use crate::domain::{AtcoCode, Departure, Stop, map_all};

use super::types::{LiveDeparturesResponse, PlaceDto, PlacesResponse};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse an ATCO code
    #[error("invalid ATCO code: {0}")]
    InvalidAtcoCode(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert a `places.json` response into stops.
///
/// Returns `None` when the response has no `member` list at all. Invalid
/// places are skipped rather than failing the whole response.
pub fn convert_places(places: &PlacesResponse) -> Option<Vec<Stop>> {
    let member = places.member.as_ref()?;

    let mut stops = Vec::with_capacity(member.len());
    for place in member {
        match convert_place(place) {
            Ok(stop) => stops.push(stop),
            Err(e) => warn!(
                atcocode = place.atcocode.as_deref().unwrap_or("<none>"),
                error = %e,
                "skipping place"
            ),
        }
    }

    Some(stops)
}

/// Convert a single place to a stop.
pub fn convert_place(place: &PlaceDto) -> Result<Stop, ConversionError> {
    let code = place
        .atcocode
        .as_deref()
        .ok_or(ConversionError::MissingField("atcocode"))?;
    let atcocode =
        AtcoCode::parse(code).map_err(|_| ConversionError::InvalidAtcoCode(code.to_string()))?;

    let name = place
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or(ConversionError::MissingField("name"))?;

    Ok(Stop {
        atcocode,
        name: name.to_string(),
        distance: place.distance.unwrap_or(0.0),
        indicator: place.indicator.clone(),
        locality: place.locality.clone(),
    })
}

/// Flatten the per-line departure groups into one list of raw records.
///
/// Groups are visited in the order the feed lists them. A group that is
/// not an array contributes itself as a single record.
pub fn flatten_departures(live: &LiveDeparturesResponse) -> Vec<Value> {
    let Some(groups) = live.departures.as_ref() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for group in groups.values() {
        match group {
            Value::Array(items) => records.extend(items.iter().cloned()),
            other => records.push(other.clone()),
        }
    }
    records
}

/// Convert a live departures response to domain departures.
pub fn convert_live_departures(live: &LiveDeparturesResponse) -> Vec<Departure> {
    map_all(&flatten_departures(live))
}
