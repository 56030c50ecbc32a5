//! Train route resolution.
//!
//! Turns a train number into its ordered station codes, either from the
//! train information API or from a static table.

mod client;
mod error;
mod table;

use std::future::Future;

use crate::domain::{Route, TrainNumber};

pub use client::{RouteClient, RouteClientConfig, codes_from_live_status, codes_from_train_details};
pub use error::RouteError;
pub use table::RouteTable;

/// Source of train routes.
pub trait RouteSource {
    /// Resolve a train to its stops in running order.
    ///
    /// Fails with [`RouteError::RouteUnavailable`] when the train is
    /// unknown or the upstream answer can't be turned into a route.
    fn resolve_route(
        &self,
        train: &TrainNumber,
    ) -> impl Future<Output = Result<Route, RouteError>> + Send;
}
