//! Ticket parameters shared by every availability query of one search.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ProbeKey, StationCode};

/// Error returned when a ticket parameter is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct InvalidTicketField {
    field: &'static str,
    reason: &'static str,
}

/// Validate and normalize a short alphanumeric code.
fn normalize(
    field: &'static str,
    raw: &str,
    max_len: usize,
) -> Result<String, InvalidTicketField> {
    let value = raw.trim().to_ascii_uppercase();

    if value.is_empty() {
        return Err(InvalidTicketField {
            field,
            reason: "must not be empty",
        });
    }
    if value.len() > max_len {
        return Err(InvalidTicketField {
            field,
            reason: "too long",
        });
    }
    if !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(InvalidTicketField {
            field,
            reason: "must be ASCII letters or digits",
        });
    }

    Ok(value)
}

macro_rules! ticket_code {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse and normalize (trim, upper-case) the value.
            pub fn parse(raw: &str) -> Result<Self, InvalidTicketField> {
                normalize($field, raw, $max).map(Self)
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidTicketField;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::parse(&raw)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

ticket_code!(
    /// Train number as printed on the ticket, e.g. "17644".
    TrainNumber,
    "train number",
    8
);

ticket_code!(
    /// Travel class, e.g. "SL", "3A", "2A", "CC".
    TravelClass,
    "class",
    3
);

ticket_code!(
    /// Booking quota, e.g. "GN" (general) or "TQ" (tatkal).
    Quota,
    "quota",
    3
);

/// Everything about a booking except the stations: which train, on which
/// day, in which class and quota.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketRequest {
    pub train: TrainNumber,
    pub date: NaiveDate,
    pub class: TravelClass,
    pub quota: Quota,
}

impl TicketRequest {
    /// Create a ticket request.
    pub fn new(train: TrainNumber, date: NaiveDate, class: TravelClass, quota: Quota) -> Self {
        Self {
            train,
            date,
            class,
            quota,
        }
    }

    /// The cache key for an availability query between two stations.
    pub fn probe_key(&self, origin: StationCode, destination: StationCode) -> ProbeKey {
        ProbeKey {
            train: self.train.clone(),
            origin,
            destination,
            date: self.date,
            class: self.class.clone(),
            quota: self.quota.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_normalized() {
        assert_eq!(TrainNumber::parse(" 17644 ").unwrap().as_str(), "17644");
        assert_eq!(TravelClass::parse("sl").unwrap().as_str(), "SL");
        assert_eq!(Quota::parse("gn").unwrap().as_str(), "GN");
    }

    #[test]
    fn invalid_codes_rejected() {
        let err = TrainNumber::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid train number: must not be empty");

        let err = TravelClass::parse("3AC1").unwrap_err();
        assert_eq!(err.to_string(), "invalid class: too long");

        let err = Quota::parse("G-N").unwrap_err();
        assert_eq!(err.to_string(), "invalid quota: must be ASCII letters or digits");
    }

    #[test]
    fn serde_goes_through_validation() {
        let class: TravelClass = serde_json::from_str("\"2a\"").unwrap();
        assert_eq!(class.as_str(), "2A");
        assert!(serde_json::from_str::<Quota>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&class).unwrap(), "\"2A\"");
    }

    #[test]
    fn probe_key_carries_every_parameter() {
        let request = TicketRequest::new(
            TrainNumber::parse("17644").unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 6).unwrap(),
            TravelClass::parse("2A").unwrap(),
            Quota::parse("GN").unwrap(),
        );
        let a = StationCode::parse("COA").unwrap();
        let b = StationCode::parse("MS").unwrap();

        let key = request.probe_key(a, b);
        assert_eq!(key.train, request.train);
        assert_eq!(key.origin, a);
        assert_eq!(key.destination, b);
        assert_eq!(key.date, request.date);
        assert_eq!(key.class, request.class);
        assert_eq!(key.quota, request.quota);

        assert_ne!(key, request.probe_key(b, a));
    }
}
