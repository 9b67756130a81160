//! Route computer seam
//!
//! The optimization that turns collection points into circuits lives outside
//! this crate. The registry only hands it a snapshot and stores what it
//! proposes.

use chrono::NaiveDate;

use crate::domain::{CollectionPoint, ReadinessPolicy, Route};

/// Computes the routes of a date from the current state of the collection points.
///
/// Runs on the blocking thread pool; implementations may be CPU heavy.
/// Returned routes need no identity: planning id and date are set by the store.
/// An empty proposal leaves the existing planning untouched.
pub trait RouteComputer: Send + Sync + 'static {
    fn compute(
        &self,
        date: NaiveDate,
        points: &[CollectionPoint],
        policy: &ReadinessPolicy,
    ) -> Vec<Route>;
}

/// Computer that never proposes routes, for deployments where plannings are
/// written by an external optimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleRouteComputer;

impl RouteComputer for IdleRouteComputer {
    fn compute(
        &self,
        date: NaiveDate,
        points: &[CollectionPoint],
        policy: &ReadinessPolicy,
    ) -> Vec<Route> {
        let ready = points.iter().filter(|p| p.is_ready_for_collection(policy)).count();
        tracing::info!(
            %date,
            points = points.len(),
            ready,
            "No route computer configured, keeping current planning"
        );
        Vec::new()
    }
}
