//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::auth::FieldError;
use crate::domain::{AtcoCode, Departure, FavoritesList, Stop};
use crate::theme::{Palette, ThemeMode};
use crate::transport::DataSource;

/// Query for stops near a point.
#[derive(Debug, Deserialize)]
pub struct NearbyStopsRequest {
    pub lat: f64,
    pub lon: f64,
}

/// Query for filtering the loaded stops.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    #[serde(default)]
    pub q: String,
}

/// A list of stops and where it came from.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<Stop>,

    /// Absent for searches over already-loaded stops
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
}

/// Departure board for one stop.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub atcocode: AtcoCode,
    pub departures: Vec<Departure>,
    pub source: DataSource,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: FavoritesList,
}

/// Current theme with its colours.
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub mode: ThemeMode,
    pub palette: &'static Palette,
}

impl ThemeResponse {
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            mode,
            palette: mode.palette(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Per-field messages for rejected forms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}
