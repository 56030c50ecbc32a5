//! Bookable segments and the paths built from them.

use super::error::DomainError;
use super::{ProbeResult, Route, StationCode};

/// A forward hop between two route positions, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span inside a route of `len` stations.
    pub fn new(start: usize, end: usize, len: usize) -> Result<Self, DomainError> {
        if start >= end || end >= len {
            return Err(DomainError::InvalidSpan { start, end, len });
        }
        Ok(Self { start, end })
    }

    /// Boarding position.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Alighting position.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Every span of a route of `len` stations, ordered by start then end.
    pub fn all(len: usize) -> impl Iterator<Item = Span> {
        (0..len).flat_map(move |start| (start + 1..len).map(move |end| Span { start, end }))
    }
}

/// One bookable ticket covering a contiguous stretch of the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub span: Span,
    pub origin: StationCode,
    pub destination: StationCode,
    pub status: String,
}

impl Segment {
    /// Build a segment from a probe outcome.
    ///
    /// Returns `None` when the probe did not report the span as bookable,
    /// or the span does not fit the route.
    pub fn from_probe(route: &Route, span: Span, result: &ProbeResult) -> Option<Self> {
        if !result.bookable {
            return None;
        }
        Some(Self {
            span,
            origin: route.station(span.start())?,
            destination: route.station(span.end())?,
            status: result.status.clone(),
        })
    }
}

/// A sequence of bookings that together carry the traveller from the first
/// route position to the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Create a path. Empty paths are rejected.
    pub fn new(segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    /// Bookings in travel order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of bookings.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: paths are never empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Seat changes between consecutive bookings.
    pub fn seat_changes(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

/// The booking plan chosen for a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    bookings: Vec<Segment>,
}

impl Plan {
    /// Bookings in travel order.
    pub fn bookings(&self) -> &[Segment] {
        &self.bookings
    }

    /// Number of tickets to buy.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    /// Seat changes, one fewer than the number of tickets.
    pub fn seat_changes(&self) -> usize {
        self.bookings.len().saturating_sub(1)
    }
}

impl From<Path> for Plan {
    fn from(path: Path) -> Self {
        Self {
            bookings: path.segments,
        }
    }
}
