//! Domain module
//!
//! Core domain types: containers, collection points and route aggregates.

pub mod container;
pub mod context;
pub mod error;
pub mod geo;
pub mod route;

pub use container::{
    CollectionPoint, Container, ContainerId, PointId, ReadinessPolicy, Reading,
    DEFAULT_READY_THRESHOLD,
};
pub use context::SessionContext;
pub use error::DomainError;
pub use geo::GeoCoordinate;
pub use route::{Planning, PlanningId, Route, RouteId, TruckId, Waypoint, WaypointId};
