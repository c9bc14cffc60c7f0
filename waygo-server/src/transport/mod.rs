//! TransportAPI UK client.
//!
//! This module provides an HTTP client for TransportAPI, which supplies
//! nearby bus stops (`places.json`) and live departures
//! (`bus/stop/{atcocode}/live.json`), plus the static dataset used when
//! the API cannot be reached.
//!
//! Key characteristics of TransportAPI:
//! - Credentials travel as `app_id`/`app_key` query parameters
//! - Live departures are grouped by line under a `departures` object
//! - Departure status fields differ between operators and are passed
//!   through untyped to the departure mapper

mod client;
mod convert;
mod error;
mod fallback;
mod types;

pub use client::{StopDirectory, TransportClient, TransportConfig};
pub use convert::{
    ConversionError, convert_live_departures, convert_place, convert_places, flatten_departures,
};
pub use error::TransportError;
pub use fallback::{
    DataSource, Sourced, fallback_departure_records, fallback_departures, fallback_stops,
};
pub use types::{LiveDeparturesResponse, PlaceDto, PlacesResponse};
