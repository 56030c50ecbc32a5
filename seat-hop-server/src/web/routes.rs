//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{Quota, StationCode, TicketRequest, TrainNumber, TravelClass};
use crate::planner::{JourneySearch, SearchError, SearchRequest};
use crate::routes::RouteError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journey/plan", post(plan_journey))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan the bookings for a journey on one train.
async fn plan_journey(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanJourneyResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanJourneyRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid journey request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let search_request = parse_request(&req)?;

    let search = JourneySearch::new(
        state.routes.as_ref(),
        state.availability.as_ref(),
        &state.config,
    );
    let report = search.search(&search_request).await?;

    Ok(Json(PlanJourneyResponse::from_report(&report, req.debug)))
}

/// Validate the raw request fields.
fn parse_request(req: &PlanJourneyRequest) -> Result<SearchRequest, AppError> {
    let bad = |message: String| AppError::BadRequest { message };

    let train = TrainNumber::parse(&req.train).map_err(|e| bad(e.to_string()))?;
    let source = StationCode::parse_normalized(&req.source)
        .map_err(|_| bad(format!("Invalid source station code: {}", req.source)))?;
    let destination = StationCode::parse_normalized(&req.destination)
        .map_err(|_| bad(format!("Invalid destination station code: {}", req.destination)))?;
    let date = NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d")
        .map_err(|_| bad(format!("Invalid date (expected YYYY-MM-DD): {}", req.date)))?;
    let class = TravelClass::parse(&req.class).map_err(|e| bad(e.to_string()))?;
    let quota = Quota::parse(&req.quota).map_err(|e| bad(e.to_string()))?;

    Ok(SearchRequest::new(
        TicketRequest::new(train, date, class, quota),
        source,
        destination,
    ))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::Route(RouteError::RouteUnavailable { .. }) => {
                AppError::NotFound { message }
            }
            SearchError::Route(_) | SearchError::InvalidRoute(_) => {
                AppError::BadGateway { message }
            }
            SearchError::StationNotOnRoute { .. }
            | SearchError::DestinationBeforeSource { .. }
            | SearchError::SameStation(_) => AppError::BadRequest { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
