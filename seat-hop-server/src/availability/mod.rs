//! Seat availability: the upstream client, status interpretation and
//! single-segment probes.
//!
//! Key characteristics of the availability API:
//! - One request answers one (origin, destination) pair for a train,
//!   class and quota, usually with rows for several dates
//! - Status is free text (`"AVAILABLE-0012"`, `"RAC 5"`, `"GNWL 10"`)
//! - Calls are rate limited and fail often enough that a failure must
//!   only ever cost the one segment it was asked about

mod client;
mod error;
mod mock;
mod payload;
mod prober;
mod status;

pub use client::{AvailabilityClient, AvailabilityClientConfig};
pub(crate) use client::CLIENT_USER_AGENT;
pub use error::AvailabilityError;
pub use mock::MockAvailability;
pub use payload::read_status;
pub use prober::{AvailabilitySource, probe};
pub use status::is_bookable;
