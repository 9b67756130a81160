//! Shared application state
//!
//! Handles shared by every client session. Each session gets its own
//! `Dispatcher` built from these.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{GeoCoordinate, SessionContext};
use crate::protocol::Dispatcher;
use crate::registry::ContainerRegistry;
use crate::store::RouteStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: RouteStore,
    pub registry: Arc<ContainerRegistry>,
    pub depot: GeoCoordinate,
    clients: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(store: RouteStore, registry: Arc<ContainerRegistry>, depot: GeoCoordinate) -> Self {
        Self {
            store,
            registry,
            depot,
            clients: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Open a new client session, numbered from 1
    pub fn open_session(&self) -> SessionContext {
        SessionContext::new(self.clients.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Dispatcher owned by one session
    pub fn dispatcher(&self, session: SessionContext) -> Dispatcher {
        Dispatcher::new(
            session,
            self.store.clone(),
            Arc::clone(&self.registry),
            self.depot,
        )
    }
}
