//! Seat-hop journey planner.
//!
//! Answers: "there's no seat on this train for my whole journey; which
//! tickets for shorter stretches of the same train get me there with the
//! fewest seat changes?"
//!
//! The search probes availability for every stretch of the route, treats
//! each bookable stretch as boardable from any of its stations, and picks
//! the shortest chain of tickets from source to destination.

mod config;
mod graph;
mod matrix;
mod paths;
mod search;
mod select;

pub use config::PlannerConfig;
pub use graph::{OverlapEdge, OverlapGraph};
pub use matrix::{ProbeRecord, SegmentMatrix, build_segment_matrix};
pub use paths::enumerate_paths;
pub use search::{
    JourneyOutcome, JourneyReport, JourneySearch, SearchError, SearchRequest, plan_journey,
};
pub use select::select_plan;
