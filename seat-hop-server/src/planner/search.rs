//! Journey search: from a train and two stations to a booking plan.
//!
//! Probes every stretch of the route the traveller needs, links the
//! bookable ones into an overlap graph, enumerates the ways across it and
//! keeps the plan with the fewest tickets.

use tracing::info;

use crate::cache::ProbeCache;
use crate::availability::AvailabilitySource;
use crate::domain::{DomainError, Plan, Route, StationCode, StationRole, TicketRequest};
use crate::routes::{RouteError, RouteSource};

use super::config::PlannerConfig;
use super::graph::OverlapGraph;
use super::matrix::{SegmentMatrix, build_segment_matrix};
use super::paths::enumerate_paths;
use super::select::select_plan;

/// Error from journey search. Any of these aborts the search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The train's route could not be resolved
    #[error(transparent)]
    Route(#[from] RouteError),

    /// A requested station is not a stop of the train
    #[error("{role} station {code} not found on route (known: {})", join_codes(.known))]
    StationNotOnRoute {
        role: StationRole,
        code: StationCode,
        known: Vec<StationCode>,
    },

    /// The train reaches the destination before the source
    #[error("destination {destination} comes before source {origin} on this route")]
    DestinationBeforeSource {
        origin: StationCode,
        destination: StationCode,
    },

    /// Source and destination are the same stop
    #[error("source and destination are both {0}")]
    SameStation(StationCode),

    /// The resolved route itself is unusable
    #[error("invalid route: {0}")]
    InvalidRoute(DomainError),
}

impl From<DomainError> for SearchError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::StationNotOnRoute { role, code, known } => {
                SearchError::StationNotOnRoute { role, code, known }
            }
            DomainError::DestinationBeforeSource {
                origin,
                destination,
            } => SearchError::DestinationBeforeSource {
                origin,
                destination,
            },
            DomainError::SameStation(code) => SearchError::SameStation(code),
            other => SearchError::InvalidRoute(other),
        }
    }
}

fn join_codes(codes: &[StationCode]) -> String {
    codes
        .iter()
        .map(StationCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyOutcome {
    /// Book these tickets.
    Found(Plan),

    /// No combination of bookable segments covers the journey.
    NoPlanFound,
}

/// Result of planning one journey, with enough detail to explain it.
#[derive(Debug, Clone)]
pub struct JourneyReport {
    /// The stretch of the route that was planned.
    pub route: Route,

    /// Train, date, class and quota the plan was made for.
    pub ticket: TicketRequest,

    pub outcome: JourneyOutcome,

    /// Everything probed on the way.
    pub matrix: SegmentMatrix,

    /// Number of complete paths enumerated.
    pub paths_found: usize,
}

impl JourneyReport {
    /// The plan, if one was found.
    pub fn plan(&self) -> Option<&Plan> {
        match &self.outcome {
            JourneyOutcome::Found(plan) => Some(plan),
            JourneyOutcome::NoPlanFound => None,
        }
    }
}

/// Plan a journey over the whole of `route`.
///
/// Uses a fresh [`ProbeCache`] that lives only for this call. Probe
/// failures count as unavailable segments; "no plan" is a normal outcome.
pub async fn plan_journey<A>(
    source: &A,
    route: &Route,
    ticket: &TicketRequest,
    config: &PlannerConfig,
) -> JourneyReport
where
    A: AvailabilitySource + Sync,
{
    let cache = ProbeCache::new();
    let matrix = build_segment_matrix(source, route, ticket, &cache, config).await;

    let graph = OverlapGraph::build(route.len(), matrix.segments());
    let paths = enumerate_paths(&graph, config.max_paths);
    let paths_found = paths.len();

    let outcome = match select_plan(paths) {
        Some(path) => {
            info!(
                train = %ticket.train,
                paths = paths_found,
                bookings = path.len(),
                seat_changes = path.seat_changes(),
                "plan selected"
            );
            JourneyOutcome::Found(Plan::from(path))
        }
        None => {
            info!(
                train = %ticket.train,
                checked = matrix.checked(),
                bookable = matrix.bookable(),
                "no plan found"
            );
            JourneyOutcome::NoPlanFound
        }
    };

    JourneyReport {
        route: route.clone(),
        ticket: ticket.clone(),
        outcome,
        matrix,
        paths_found,
    }
}

/// Request for journey search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Train, date, class and quota.
    pub ticket: TicketRequest,

    /// Boarding station.
    pub source: StationCode,

    /// Alighting station.
    pub destination: StationCode,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(ticket: TicketRequest, source: StationCode, destination: StationCode) -> Self {
        Self {
            ticket,
            source,
            destination,
        }
    }

    /// Validate the search request.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.source == self.destination {
            return Err(SearchError::SameStation(self.source));
        }
        Ok(())
    }
}

/// Journey search over a route source and an availability source.
pub struct JourneySearch<'a, R, A> {
    routes: &'a R,
    availability: &'a A,
    config: &'a PlannerConfig,
}

impl<'a, R, A> JourneySearch<'a, R, A>
where
    R: RouteSource + Sync,
    A: AvailabilitySource + Sync,
{
    /// Create a new search.
    pub fn new(routes: &'a R, availability: &'a A, config: &'a PlannerConfig) -> Self {
        Self {
            routes,
            availability,
            config,
        }
    }

    /// Resolve the train's route, cut it to the requested stations and
    /// plan over the result.
    pub async fn search(&self, request: &SearchRequest) -> Result<JourneyReport, SearchError> {
        request.validate()?;

        let full = self.routes.resolve_route(&request.ticket.train).await?;
        let route = full.slice_between(&request.source, &request.destination)?;

        info!(
            train = %request.ticket.train,
            source = %request.source,
            destination = %request.destination,
            route_stations = full.len(),
            journey_stations = route.len(),
            "planning journey"
        );

        Ok(plan_journey(self.availability, &route, &request.ticket, self.config).await)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
