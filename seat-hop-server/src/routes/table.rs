//! Static route table, for mock mode and tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{Route, StationCode, TrainNumber};

use super::RouteSource;
use super::error::RouteError;

/// On-disk form: `{"routes": {"17644": ["COA", "VSKP", "MS"]}}`.
#[derive(Debug, Deserialize)]
struct RouteFile {
    #[serde(default)]
    routes: HashMap<String, Vec<String>>,
}

/// Route source backed by a fixed train → stations map.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Arc<HashMap<TrainNumber, Vec<StationCode>>>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a train. Stations are stored as given and validated on lookup,
    /// so a malformed route surfaces as `RouteUnavailable`.
    pub fn with_route(mut self, train: TrainNumber, stations: Vec<StationCode>) -> Self {
        Arc::make_mut(&mut self.routes).insert(train, stations);
        self
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RouteError::NotConfigured(format!("failed to read {}: {e}", path.display()))
        })?;
        let file: RouteFile = serde_json::from_str(&json).map_err(|e| RouteError::Json {
            message: e.to_string(),
        })?;

        let mut routes = HashMap::with_capacity(file.routes.len());
        for (train, stations) in file.routes {
            let train = TrainNumber::parse(&train)
                .map_err(|e| RouteError::NotConfigured(format!("mock route {train}: {e}")))?;
            let stations = stations
                .iter()
                .map(|s| StationCode::parse_normalized(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| RouteError::NotConfigured(format!("mock route {train}: {e}")))?;
            routes.insert(train, stations);
        }

        Ok(Self {
            routes: Arc::new(routes),
        })
    }

    /// Number of trains in the table.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteSource for RouteTable {
    async fn resolve_route(&self, train: &TrainNumber) -> Result<Route, RouteError> {
        let stations = self
            .routes
            .get(train)
            .ok_or_else(|| RouteError::RouteUnavailable {
                train: train.clone(),
                reason: "unknown train".to_string(),
            })?;

        Route::new(stations.clone()).map_err(|e| RouteError::RouteUnavailable {
            train: train.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn codes(list: &[&str]) -> Vec<StationCode> {
        list.iter().map(|s| StationCode::parse(s).unwrap()).collect()
    }

    fn train(s: &str) -> TrainNumber {
        TrainNumber::parse(s).unwrap()
    }

    #[tokio::test]
    async fn known_train_resolves() {
        let table = RouteTable::new().with_route(train("17644"), codes(&["COA", "BZA", "MS"]));
        let route = table.resolve_route(&train("17644")).await.unwrap();
        assert_eq!(route.stations(), codes(&["COA", "BZA", "MS"]).as_slice());
    }

    #[tokio::test]
    async fn unknown_train_is_unavailable() {
        let table = RouteTable::new();
        let err = table.resolve_route(&train("99999")).await.unwrap_err();
        assert!(matches!(err, RouteError::RouteUnavailable { .. }));
        assert!(err.to_string().contains("unknown train"));
    }

    #[tokio::test]
    async fn malformed_route_is_unavailable() {
        let table = RouteTable::new().with_route(train("1"), codes(&["A", "B", "A"]));
        let err = table.resolve_route(&train("1")).await.unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[tokio::test]
    async fn load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"routes": {{"17644": ["coa", "VSKP", "MS"]}}, "availability": {{}}}}"#
        )
        .unwrap();

        let table = RouteTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        let route = table.resolve_route(&train("17644")).await.unwrap();
        assert_eq!(route.len(), 3);
    }

    #[test]
    fn json_file_with_bad_code_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"routes": {{"17644": ["C0A"]}}}}"#).unwrap();
        assert!(RouteTable::from_json_file(file.path()).is_err());
    }
}
