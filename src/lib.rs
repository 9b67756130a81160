//! collecte_server Library
//!
//! Waste-collection circuit server: container reports, route aggregates
//! persisted in PostgreSQL, and the request/response protocol served to
//! field clients.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod protocol;
pub mod registry;
pub mod state;
pub mod store;

mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use domain::{CollectionPoint, Container, GeoCoordinate, Planning, Route, Waypoint};
pub use protocol::Dispatcher;
pub use registry::{ContainerRegistry, RouteComputer};
pub use state::AppState;
pub use store::{RouteStore, StoreError};
