//! Domain error types.
//!
//! These errors represent validation failures in the domain layer:
//! malformed routes, requests that don't fit the route, and impossible
//! spans. They are distinct from API/IO errors.

use std::fmt;

use super::StationCode;

/// How many route codes to list when a requested station is missing.
pub const KNOWN_CODES_LISTED: usize = 20;

/// Which end of the journey a station was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRole {
    Source,
    Destination,
}

impl fmt::Display for StationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationRole::Source => f.write_str("source"),
            StationRole::Destination => f.write_str("destination"),
        }
    }
}

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A route needs at least a source and a destination
    #[error("route must have at least two stations, got {0}")]
    RouteTooShort(usize),

    /// A station appears twice in one route
    #[error("station {0} appears more than once in the route")]
    DuplicateStation(StationCode),

    /// Requested station is not a stop of the route
    #[error("{role} station {code} not found on route (known: {})", join_codes(.known))]
    StationNotOnRoute {
        role: StationRole,
        code: StationCode,
        known: Vec<StationCode>,
    },

    /// Destination is reached before the source in route order
    #[error("destination {destination} comes before source {origin} on this route")]
    DestinationBeforeSource {
        origin: StationCode,
        destination: StationCode,
    },

    /// Source and destination are the same stop
    #[error("source and destination are both {0}")]
    SameStation(StationCode),

    /// Span does not describe a forward hop inside the route
    #[error("invalid span {start}..{end} for a route of {len} stations")]
    InvalidSpan { start: usize, end: usize, len: usize },
}

fn join_codes(codes: &[StationCode]) -> String {
    codes
        .iter()
        .map(StationCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
