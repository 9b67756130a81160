//! Container Registry
//!
//! Process-wide live state of every container, shared behind an `Arc`.
//! Reports replace a container's reading under the write lock, so readers
//! always see complete readings.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::{CollectionPoint, Container, ContainerId, Planning, ReadinessPolicy, Reading};
use crate::store::RouteStore;

use super::{RegistryError, RouteComputer};

/// Live container state plus the route computation trigger
pub struct ContainerRegistry {
    containers: RwLock<HashMap<ContainerId, Container>>,
    policy: ReadinessPolicy,
    store: RouteStore,
    computer: Arc<dyn RouteComputer>,
}

impl ContainerRegistry {
    pub fn new(store: RouteStore, policy: ReadinessPolicy, computer: Arc<dyn RouteComputer>) -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            policy,
            store,
            computer,
        }
    }

    pub fn policy(&self) -> ReadinessPolicy {
        self.policy
    }

    /// Register every container of the point catalog not already known.
    ///
    /// Returns the number of containers added.
    pub async fn load_from_store(&self) -> Result<usize, RegistryError> {
        let points = self.store.list_collection_points().await?;

        let mut containers = self.containers.write().await;
        let mut added = 0;
        for container in points.into_iter().flat_map(|p| p.containers) {
            if let std::collections::hash_map::Entry::Vacant(slot) = containers.entry(container.id) {
                slot.insert(container);
                added += 1;
            }
        }

        tracing::info!(added, total = containers.len(), "Container registry loaded");
        Ok(added)
    }

    /// Register (or replace) a container, returning the previous state
    pub async fn register(&self, container: Container) -> Option<Container> {
        self.containers.write().await.insert(container.id, container)
    }

    pub async fn len(&self) -> usize {
        self.containers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.containers.read().await.is_empty()
    }

    /// Snapshot of one container
    pub async fn get_container(&self, id: ContainerId) -> Result<Container, RegistryError> {
        self.containers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RegistryError::ContainerNotFound(id))
    }

    /// Store a new reading for a container and return its updated state.
    ///
    /// A container unknown to the registry triggers a catalog reload first,
    /// so containers added to the store after startup can report.
    pub async fn apply_reading(
        &self,
        id: ContainerId,
        reading: Reading,
    ) -> Result<Container, RegistryError> {
        let known = self.containers.read().await.contains_key(&id);
        if !known {
            tracing::debug!(container_id = id, "Unknown container, reloading catalog");
            self.load_from_store().await?;
        }

        let mut containers = self.containers.write().await;
        let container = containers
            .get_mut(&id)
            .ok_or(RegistryError::ContainerNotFound(id))?;

        container.set_reading(reading);

        tracing::debug!(
            container_id = id,
            fill_ratio = container.fill_ratio(),
            ready = container.is_ready_for_collection(&self.policy),
            "Container reading applied"
        );

        Ok(container.clone())
    }

    /// Replace the stored readings of `points` with live ones, under a single
    /// read lock so the result is one consistent snapshot.
    pub async fn overlay(&self, mut points: Vec<CollectionPoint>) -> Vec<CollectionPoint> {
        let containers = self.containers.read().await;
        for container in points.iter_mut().flat_map(|p| p.containers.iter_mut()) {
            if let Some(live) = containers.get(&container.id) {
                container.set_reading(live.reading());
            }
        }
        points
    }

    /// Point catalog with live readings
    pub async fn current_points(&self) -> Result<Vec<CollectionPoint>, RegistryError> {
        let points = self.store.list_collection_points().await?;
        Ok(self.overlay(points).await)
    }

    // =========================================================================
    // Route computation
    // =========================================================================

    /// Start a route computation for today in the background.
    ///
    /// The outcome is only logged; callers do not wait for it.
    pub fn trigger_route_computation(self: &Arc<Self>) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        let date = Local::now().date_naive();

        tokio::spawn(async move {
            match registry.compute_routes(date).await {
                Ok(Some(planning)) => tracing::info!(
                    planning_id = planning.id,
                    %date,
                    routes = planning.routes.len(),
                    "Route computation stored a new planning"
                ),
                Ok(None) => tracing::info!(%date, "Route computation proposed no routes"),
                Err(e) => tracing::error!(%date, error = %e, "Route computation failed"),
            }
        })
    }

    /// Run the route computer on the current points and store its proposal
    /// as the planning of `date`. Returns `None` when nothing was proposed.
    pub async fn compute_routes(&self, date: NaiveDate) -> Result<Option<Planning>, RegistryError> {
        let points = self.current_points().await?;
        let computer = Arc::clone(&self.computer);
        let policy = self.policy;

        let routes = tokio::task::spawn_blocking(move || computer.compute(date, &points, &policy))
            .await
            .map_err(|e| RegistryError::ComputationAborted(e.to_string()))?;

        if routes.is_empty() {
            return Ok(None);
        }

        let planning = self.store.replace_planning_routes(date, routes).await?;
        Ok(Some(planning))
    }
}

impl std::fmt::Debug for ContainerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerRegistry")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
