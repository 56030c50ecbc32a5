//! Application state for the web layer.

use std::sync::Arc;

use serde_json::Value;

use crate::availability::{
    AvailabilityClient, AvailabilityError, AvailabilitySource, MockAvailability,
};
use crate::domain::{ProbeKey, Route, TrainNumber};
use crate::planner::PlannerConfig;
use crate::routes::{RouteClient, RouteError, RouteSource, RouteTable};

/// Where seat availability comes from.
pub enum AvailabilityBackend {
    /// The RapidAPI availability endpoint.
    Live(AvailabilityClient),

    /// A fixed table, for demos and tests.
    Mock(MockAvailability),
}

impl AvailabilitySource for AvailabilityBackend {
    async fn fetch_availability(&self, key: &ProbeKey) -> Result<Value, AvailabilityError> {
        match self {
            AvailabilityBackend::Live(client) => client.fetch_availability(key).await,
            AvailabilityBackend::Mock(mock) => mock.fetch_availability(key).await,
        }
    }
}

/// Where train routes come from.
pub enum RouteBackend {
    /// The train information API.
    Live(RouteClient),

    /// A fixed table, for demos and tests.
    Table(RouteTable),
}

impl RouteSource for RouteBackend {
    async fn resolve_route(&self, train: &TrainNumber) -> Result<Route, RouteError> {
        match self {
            RouteBackend::Live(client) => client.resolve_route(train).await,
            RouteBackend::Table(table) => table.resolve_route(train).await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests. Probe caches are
/// not part of it: each journey search gets its own.
#[derive(Clone)]
pub struct AppState {
    /// Train route resolution
    pub routes: Arc<RouteBackend>,

    /// Seat availability
    pub availability: Arc<AvailabilityBackend>,

    /// Journey planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        routes: RouteBackend,
        availability: AvailabilityBackend,
        config: PlannerConfig,
    ) -> Self {
        Self {
            routes: Arc::new(routes),
            availability: Arc::new(availability),
            config: Arc::new(config),
        }
    }

    /// State backed entirely by in-memory tables.
    pub fn mock(routes: RouteTable, availability: MockAvailability, config: PlannerConfig) -> Self {
        Self::new(
            RouteBackend::Table(routes),
            AvailabilityBackend::Mock(availability),
            config,
        )
    }
}
