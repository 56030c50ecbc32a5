use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use seat_hop_server::availability::{
    AvailabilityClient, AvailabilityClientConfig, MockAvailability,
};
use seat_hop_server::planner::PlannerConfig;
use seat_hop_server::routes::{RouteClient, RouteClientConfig, RouteTable};
use seat_hop_server::web::{AppState, AvailabilityBackend, RouteBackend, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Read and parse an environment variable, falling back to `default` when
/// it is unset or unparseable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "ignoring unparseable setting");
            default
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seat_hop_server=info,tower_http=info")),
        )
        .init();

    let defaults = PlannerConfig::default();
    let config = PlannerConfig::default()
        .with_max_concurrent_probes(env_or(
            "SEATHOP_MAX_CONCURRENT",
            defaults.max_concurrent_probes,
        ))
        .with_probe_timeout(Duration::from_secs(env_or(
            "SEATHOP_PROBE_TIMEOUT_SECS",
            defaults.probe_timeout.as_secs(),
        )));

    let state = match std::env::var("SEATHOP_MOCK_FILE") {
        Ok(path) => {
            let routes = RouteTable::from_json_file(&path).expect("Failed to load mock routes");
            let availability =
                MockAvailability::from_json_file(&path).expect("Failed to load mock availability");
            info!(%path, trains = routes.len(), "serving from mock data");
            AppState::mock(routes, availability, config)
        }
        Err(_) => {
            let api_key = std::env::var("RAPIDAPI_KEY").unwrap_or_else(|_| {
                warn!("RAPIDAPI_KEY not set. API calls will fail.");
                String::new()
            });

            let availability_config = AvailabilityClientConfig::new(&api_key)
                .with_max_concurrent(config.max_concurrent_probes)
                .with_timeout(config.probe_timeout.as_secs());
            let availability = AvailabilityClient::new(availability_config)
                .expect("Failed to create availability client");
            let routes = RouteClient::new(RouteClientConfig::new(&api_key))
                .expect("Failed to create route client");

            AppState::new(
                RouteBackend::Live(routes),
                AvailabilityBackend::Live(availability),
                config,
            )
        }
    };

    let app = create_router(state);

    let addr = env_or("SEATHOP_BIND", SocketAddr::from(([127, 0, 0, 1], 3000)));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    info!(%addr, "seat-hop planner listening");
    info!("endpoints: GET /health, POST /journey/plan");

    axum::serve(listener, app).await.expect("Server error");
}
