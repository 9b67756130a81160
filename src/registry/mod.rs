//! Container Registry module
//!
//! Live container state and the route computation trigger.

mod computer;
mod container_registry;
mod error;

pub use computer::{IdleRouteComputer, RouteComputer};
pub use container_registry::ContainerRegistry;
pub use error::RegistryError;
