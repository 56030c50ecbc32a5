//! Ordered station sequence of one train.

use std::collections::HashSet;

use super::error::{DomainError, KNOWN_CODES_LISTED, StationRole};
use super::StationCode;

/// The stops of a single train in running order.
///
/// Index 0 is the journey source and the last index the destination.
/// A route always has at least two stations and never visits a station
/// twice, so a station code identifies exactly one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stations: Vec<StationCode>,
}

impl Route {
    /// Create a route, validating length and uniqueness.
    pub fn new(stations: Vec<StationCode>) -> Result<Self, DomainError> {
        if stations.len() < 2 {
            return Err(DomainError::RouteTooShort(stations.len()));
        }

        let mut seen = HashSet::with_capacity(stations.len());
        for station in &stations {
            if !seen.insert(*station) {
                return Err(DomainError::DuplicateStation(*station));
            }
        }

        Ok(Self { stations })
    }

    /// Number of stations on the route.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false: a route has at least two stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations in running order.
    pub fn stations(&self) -> &[StationCode] {
        &self.stations
    }

    /// Station at a route position.
    pub fn station(&self, index: usize) -> Option<StationCode> {
        self.stations.get(index).copied()
    }

    /// First station.
    pub fn source(&self) -> StationCode {
        self.stations[0]
    }

    /// Last station.
    pub fn destination(&self) -> StationCode {
        self.stations[self.stations.len() - 1]
    }

    /// Position of a station on the route.
    pub fn position(&self, code: &StationCode) -> Option<usize> {
        self.stations.iter().position(|s| s == code)
    }

    /// Number of distinct (origin, destination) hops on the route.
    pub fn pair_count(&self) -> usize {
        let n = self.stations.len();
        n * (n - 1) / 2
    }

    /// Cut the route down to the stretch between two stations, inclusive.
    ///
    /// Fails if either station is not a stop, if the destination comes
    /// before the source, or if both are the same stop.
    pub fn slice_between(
        &self,
        source: &StationCode,
        destination: &StationCode,
    ) -> Result<Route, DomainError> {
        let start = self
            .position(source)
            .ok_or_else(|| self.not_on_route(StationRole::Source, *source))?;
        let end = self
            .position(destination)
            .ok_or_else(|| self.not_on_route(StationRole::Destination, *destination))?;

        if end < start {
            return Err(DomainError::DestinationBeforeSource {
                origin: *source,
                destination: *destination,
            });
        }
        if end == start {
            return Err(DomainError::SameStation(*source));
        }

        Ok(Route {
            stations: self.stations[start..=end].to_vec(),
        })
    }

    fn not_on_route(&self, role: StationRole, code: StationCode) -> DomainError {
        DomainError::StationNotOnRoute {
            role,
            code,
            known: self
                .stations
                .iter()
                .take(KNOWN_CODES_LISTED)
                .copied()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<StationCode> {
        list.iter().map(|s| StationCode::parse(s).unwrap()).collect()
    }

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn new_rejects_short_routes() {
        assert_eq!(Route::new(vec![]), Err(DomainError::RouteTooShort(0)));
        assert_eq!(
            Route::new(codes(&["MS"])),
            Err(DomainError::RouteTooShort(1))
        );
    }

    #[test]
    fn new_rejects_duplicates() {
        assert_eq!(
            Route::new(codes(&["A", "B", "A"])),
            Err(DomainError::DuplicateStation(code("A")))
        );
    }

    #[test]
    fn accessors() {
        let route = Route::new(codes(&["A", "B", "C", "D", "E"])).unwrap();
        assert_eq!(route.len(), 5);
        assert_eq!(route.source(), code("A"));
        assert_eq!(route.destination(), code("E"));
        assert_eq!(route.position(&code("C")), Some(2));
        assert_eq!(route.position(&code("Z")), None);
        assert_eq!(route.station(4), Some(code("E")));
        assert_eq!(route.station(5), None);
        assert_eq!(route.pair_count(), 10);
    }

    #[test]
    fn slice_between_inclusive() {
        let route = Route::new(codes(&["COA", "VSKP", "BZA", "NLR", "MS"])).unwrap();
        let sliced = route.slice_between(&code("VSKP"), &code("NLR")).unwrap();
        assert_eq!(sliced.stations(), codes(&["VSKP", "BZA", "NLR"]).as_slice());
    }

    #[test]
    fn slice_between_missing_source_lists_known_codes() {
        let route = Route::new(codes(&["A", "B", "C"])).unwrap();
        let err = route.slice_between(&code("X"), &code("C")).unwrap_err();
        assert_eq!(
            err,
            DomainError::StationNotOnRoute {
                role: StationRole::Source,
                code: code("X"),
                known: codes(&["A", "B", "C"]),
            }
        );
    }

    #[test]
    fn slice_between_known_codes_capped() {
        let names: Vec<String> = (0..30)
            .map(|i| {
                let a = (b'A' + (i / 26) as u8) as char;
                let b = (b'A' + (i % 26) as u8) as char;
                format!("{a}{b}")
            })
            .collect();
        let stations = names.iter().map(|s| code(s)).collect();
        let route = Route::new(stations).unwrap();

        match route.slice_between(&code("AA"), &code("ZZ")) {
            Err(DomainError::StationNotOnRoute { role, known, .. }) => {
                assert_eq!(role, StationRole::Destination);
                assert_eq!(known.len(), KNOWN_CODES_LISTED);
            }
            other => panic!("expected StationNotOnRoute, got {other:?}"),
        }
    }

    #[test]
    fn slice_between_rejects_reverse_order() {
        let route = Route::new(codes(&["A", "B", "C"])).unwrap();
        let err = route.slice_between(&code("C"), &code("A")).unwrap_err();
        assert!(matches!(err, DomainError::DestinationBeforeSource { .. }));
    }

    #[test]
    fn slice_between_rejects_same_station() {
        let route = Route::new(codes(&["A", "B", "C"])).unwrap();
        let err = route.slice_between(&code("B"), &code("B")).unwrap_err();
        assert_eq!(err, DomainError::SameStation(code("B")));
    }
}
