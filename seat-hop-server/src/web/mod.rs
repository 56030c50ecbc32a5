//! Web layer for the seat-hop planner.
//!
//! Provides a JSON HTTP endpoint for planning journeys.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, AvailabilityBackend, RouteBackend};
