//! Domain types for the seat-hop planner.
//!
//! This module contains the core domain model types: validated station
//! codes, routes, ticket parameters, availability probe keys and results,
//! and the segments, paths and plans assembled from them. All types enforce
//! their invariants at construction time, so code that receives these
//! types can trust their validity.

mod error;
mod probe;
mod route;
mod segment;
mod station;
mod ticket;

pub use error::{DomainError, KNOWN_CODES_LISTED, StationRole};
pub use probe::{ProbeKey, ProbeResult};
pub use route::Route;
pub use segment::{Path, Plan, Segment, Span};
pub use station::{InvalidStationCode, StationCode};
pub use ticket::{InvalidTicketField, Quota, TicketRequest, TrainNumber, TravelClass};
