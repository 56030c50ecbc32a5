//! Seat-hop journey planner server.
//!
//! A web application that answers: "there's no seat on my train for the
//! whole journey; which shorter tickets on the same train get me there
//! with the fewest seat changes?"

pub mod availability;
pub mod cache;
pub mod domain;
pub mod planner;
pub mod routes;
pub mod web;
