//! Domain types for the bus stop app.
//!
//! Stop codes and coordinates validate at construction time. The
//! departure and favourites operations are pure and total: malformed feed
//! data degrades to defaults instead of failing.

mod departure;
mod error;
mod favorites;
mod location;
mod status;
mod stop;

pub use departure::{DUE, Departure, NO_LINE, UNKNOWN_DESTINATION, map_all, map_departure};
pub use error::DomainError;
pub use favorites::FavoritesList;
pub use location::Coordinates;
pub use status::{DEFAULT_STATUS_TEXT, NormalizedStatus, StatusClass, normalize};
pub use stop::{AtcoCode, InvalidAtcoCode, Stop, search_stops};
