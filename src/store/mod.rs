//! Route Store module
//!
//! Persistence layer for plannings, routes, waypoints and the collection
//! point catalog, backed by PostgreSQL.

mod catalog;
mod error;
mod route_store;

pub use error::StoreError;
pub use route_store::RouteStore;
