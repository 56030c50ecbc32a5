//! Availability query keys and their outcomes.

use std::fmt;

use chrono::NaiveDate;

use super::{Quota, StationCode, TrainNumber, TravelClass};

/// Identifies one availability query.
///
/// Every parameter that can change the answer is part of the key, so two
/// equal keys always refer to the same upstream question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeKey {
    pub train: TrainNumber,
    pub origin: StationCode,
    pub destination: StationCode,
    pub date: NaiveDate,
    pub class: TravelClass,
    pub quota: Quota,
}

impl fmt::Display for ProbeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|{}",
            self.train, self.origin, self.destination, self.date, self.class, self.quota
        )
    }
}

/// Outcome of one availability query.
///
/// `status` is kept verbatim as reported upstream (or as an `ERROR: ...`
/// marker when the query failed) so it can be shown next to a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub bookable: bool,
    pub status: String,
}

impl ProbeResult {
    /// Create a result from an already interpreted status.
    pub fn new(bookable: bool, status: impl Into<String>) -> Self {
        Self {
            bookable,
            status: status.into(),
        }
    }

    /// A failed query. Never bookable.
    pub fn error(cause: impl fmt::Display) -> Self {
        Self {
            bookable: false,
            status: format!("ERROR: {cause}"),
        }
    }

    /// Whether the query itself failed, as opposed to reporting no seats.
    pub fn is_error(&self) -> bool {
        self.status.starts_with("ERROR:")
    }
}
