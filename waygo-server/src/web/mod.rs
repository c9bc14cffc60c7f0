//! Web layer for WayGo.
//!
//! JSON endpoints over the [`AppStore`](crate::state::AppStore).

mod dto;
mod extract;
mod routes;
mod state;

pub use dto::*;
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use routes::{AppError, create_router};
pub use state::AppState;
