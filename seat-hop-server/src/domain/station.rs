//! Station code types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Longest station code accepted.
const MAX_LEN: usize = 5;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid station code, 1 to 5 uppercase ASCII letters.
///
/// Station codes are what the reservation system uses to name boarding
/// points ("MS", "COA", "NDLS"). Any `StationCode` value is valid by
/// construction, and the type is `Copy` so routes can hand codes around
/// freely.
///
/// # Examples
///
/// ```
/// use seat_hop_server::domain::StationCode;
///
/// let ms = StationCode::parse("MS").unwrap();
/// assert_eq!(ms.as_str(), "MS");
///
/// // Lowercase is rejected by `parse`...
/// assert!(StationCode::parse("ms").is_err());
/// // ...but accepted by `parse_normalized`.
/// assert_eq!(StationCode::parse_normalized(" ms ").unwrap(), ms);
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("TOOLONG").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode {
    bytes: [u8; MAX_LEN],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1 to 5 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let raw = s.as_bytes();

        if raw.is_empty() || raw.len() > MAX_LEN {
            return Err(InvalidStationCode {
                reason: "must be 1 to 5 characters",
            });
        }

        if !raw.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        let mut bytes = [0u8; MAX_LEN];
        bytes[..raw.len()].copy_from_slice(raw);

        Ok(Self {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Parse user or upstream input: surrounding whitespace is trimmed and
    /// letters are upper-cased before validation.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_normalized(&raw).map_err(serde::de::Error::custom)
    }
}
