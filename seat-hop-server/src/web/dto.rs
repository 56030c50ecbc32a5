//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Segment;
use crate::planner::{JourneyReport, ProbeRecord};

/// Request to plan a journey.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    /// Train number, e.g. "17644"
    pub train: String,

    /// Boarding station code
    pub source: String,

    /// Alighting station code
    pub destination: String,

    /// Travel date, YYYY-MM-DD
    pub date: String,

    /// Travel class, e.g. "2A" or "SL"
    pub class: String,

    /// Booking quota, e.g. "GN" or "TQ"
    pub quota: String,

    /// Include every probed segment in the response
    #[serde(default)]
    pub debug: bool,
}

/// One ticket in a plan.
#[derive(Debug, Serialize)]
pub struct BookingResult {
    /// Ticket origin code
    pub from: String,

    /// Ticket destination code
    pub to: String,

    /// Route position of the origin, counted from the requested source
    pub start: usize,

    /// Route position of the destination
    pub end: usize,

    /// Availability status as reported upstream
    pub status: String,
}

/// One probed segment, for diagnostics.
#[derive(Debug, Serialize)]
pub struct CheckedSegment {
    pub from: String,
    pub to: String,
    pub bookable: bool,
    pub status: String,
}

/// Response with the booking plan.
#[derive(Debug, Serialize)]
pub struct PlanJourneyResponse {
    /// Whether a plan was found
    pub success: bool,

    pub train: String,
    pub date: String,
    pub class: String,
    pub quota: String,

    /// Station codes from source to destination
    pub route: Vec<String>,

    /// Tickets to book, in travel order; `None` when no plan exists
    pub plan: Option<Vec<BookingResult>>,

    pub bookings: usize,
    pub seat_changes: usize,

    /// Distinct segments probed
    pub segments_checked: usize,

    /// Probed segments that were bookable
    pub segments_bookable: usize,

    /// Whether the whole journey was bookable as one ticket
    pub fast_path: bool,

    /// Upstream availability calls made
    pub upstream_calls: usize,

    /// Every probed segment, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<Vec<CheckedSegment>>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Conversion implementations

impl BookingResult {
    /// Convert a planned segment to a booking result.
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            from: segment.origin.to_string(),
            to: segment.destination.to_string(),
            start: segment.span.start(),
            end: segment.span.end(),
            status: segment.status.clone(),
        }
    }
}

impl CheckedSegment {
    pub fn from_record(record: &ProbeRecord) -> Self {
        Self {
            from: record.origin.to_string(),
            to: record.destination.to_string(),
            bookable: record.result.bookable,
            status: record.result.status.clone(),
        }
    }
}

impl PlanJourneyResponse {
    /// Convert a journey report to a response.
    pub fn from_report(report: &JourneyReport, include_checked: bool) -> Self {
        let plan = report
            .plan()
            .map(|plan| plan.bookings().iter().map(BookingResult::from_segment).collect());
        let (bookings, seat_changes) = report
            .plan()
            .map(|plan| (plan.booking_count(), plan.seat_changes()))
            .unwrap_or((0, 0));

        let checked = include_checked.then(|| {
            report
                .matrix
                .probes()
                .iter()
                .map(CheckedSegment::from_record)
                .collect()
        });

        Self {
            success: plan.is_some(),
            train: report.ticket.train.to_string(),
            date: report.ticket.date.format("%Y-%m-%d").to_string(),
            class: report.ticket.class.to_string(),
            quota: report.ticket.quota.to_string(),
            route: report
                .route
                .stations()
                .iter()
                .map(ToString::to_string)
                .collect(),
            plan,
            bookings,
            seat_changes,
            segments_checked: report.matrix.checked(),
            segments_bookable: report.matrix.bookable(),
            fast_path: report.matrix.fast_path(),
            upstream_calls: report.matrix.upstream_calls(),
            checked,
        }
    }
}
