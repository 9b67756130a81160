//! Plannings, routes and waypoints
//!
//! A planning groups the routes ("itineraires") of one date. A route is the
//! ordered list of stops ("ilots de passage") one truck visits that day.

use chrono::NaiveDate;

use super::CollectionPoint;

pub type PlanningId = i64;
pub type RouteId = i64;
pub type WaypointId = i64;
pub type TruckId = i64;

/// One stop of a route
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Assigned by the store on insert
    pub id: Option<WaypointId>,
    /// Assigned by the store on insert
    pub route_id: Option<RouteId>,
    pub point: CollectionPoint,
}

impl Waypoint {
    pub fn new(point: CollectionPoint) -> Self {
        Self {
            id: None,
            route_id: None,
            point,
        }
    }
}

/// Ordered sequence of waypoints assigned to one truck for one date
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Assigned by the store on insert
    pub id: Option<RouteId>,
    pub planning_id: PlanningId,
    pub truck_id: TruckId,
    pub date: NaiveDate,
    /// Visiting order
    pub waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn new(planning_id: PlanningId, truck_id: TruckId, date: NaiveDate) -> Self {
        Self {
            id: None,
            planning_id,
            truck_id,
            date,
            waypoints: Vec::new(),
        }
    }

    /// Append a stop at the end of the circuit
    pub fn with_stop(mut self, point: CollectionPoint) -> Self {
        self.waypoints.push(Waypoint::new(point));
        self
    }

    pub fn points(&self) -> impl Iterator<Item = &CollectionPoint> {
        self.waypoints.iter().map(|w| &w.point)
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Dated collection of routes
#[derive(Debug, Clone, PartialEq)]
pub struct Planning {
    pub id: PlanningId,
    pub date: NaiveDate,
    pub routes: Vec<Route>,
}
