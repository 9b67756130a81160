//! Response documents
//!
//! Every response is `{"response": {"response_type": ..., ...}}` with
//! `response_type` always first, followed by the sections of that type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::{CollectionPoint, ContainerId, GeoCoordinate, ReadinessPolicy, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    Ok,
    Error,
    RespSupervisionState,
    RespCircuits,
    /// Reserved for REQ_CIRCUIT, which is not served
    RespCircuit,
}

/// Body of a response document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub response_type: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervision_state: Option<SupervisionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuits: Option<Vec<Circuit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_collected: Option<NotCollected>,
}

#[derive(Serialize)]
struct Document<'a> {
    response: &'a Response,
}

impl Response {
    fn of_type(response_type: ResponseType) -> Self {
        Self {
            response_type,
            supervision_state: None,
            circuits: None,
            not_collected: None,
        }
    }

    pub fn ok() -> Self {
        Self::of_type(ResponseType::Ok)
    }

    pub fn error() -> Self {
        Self::of_type(ResponseType::Error)
    }

    pub fn supervision_state(state: SupervisionState) -> Self {
        Self {
            supervision_state: Some(state),
            ..Self::of_type(ResponseType::RespSupervisionState)
        }
    }

    /// Circuits of the day, followed by the (always empty) not-collected section
    pub fn circuits(circuits: Vec<Circuit>) -> Self {
        Self {
            circuits: Some(circuits),
            not_collected: Some(NotCollected::default()),
            ..Self::of_type(ResponseType::RespCircuits)
        }
    }

    /// Wrap into a response document
    pub fn into_document(self) -> Value {
        match serde_json::to_value(Document { response: &self }) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode response document");
                json!({"response": {"response_type": "ERROR"}})
            }
        }
    }
}

// =========================================================================
// REQ_SUPERVISION_STATE
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupervisionState {
    /// When the snapshot was produced (RFC 3339)
    pub date_state: String,
    pub container_sets: Vec<SupervisedContainerSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupervisedContainerSet {
    pub location: GeoCoordinate,
    pub to_be_collected: bool,
    pub containers: Vec<SupervisedContainer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupervisedContainer {
    pub id: ContainerId,
    pub weight: i32,
    pub volume: i32,
    pub volumemax: i32,
    pub fillratio: f64,
    pub to_be_collected: bool,
}

impl SupervisionState {
    pub fn new(
        points: &[CollectionPoint],
        policy: &ReadinessPolicy,
        produced_at: DateTime<Utc>,
    ) -> Self {
        let container_sets = points
            .iter()
            .map(|point| SupervisedContainerSet {
                location: point.location,
                to_be_collected: point.is_ready_for_collection(policy),
                containers: point
                    .containers
                    .iter()
                    .map(|c| SupervisedContainer {
                        id: c.id,
                        weight: c.weight(),
                        volume: c.volume(),
                        volumemax: c.volume_max(),
                        fillratio: c.fill_ratio(),
                        to_be_collected: c.is_ready_for_collection(policy),
                    })
                    .collect(),
            })
            .collect();

        Self {
            date_state: produced_at.to_rfc3339(),
            container_sets,
        }
    }
}

// =========================================================================
// REQ_CIRCUITS
// =========================================================================

/// Client-facing view of a route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    pub index: usize,
    pub depot_location: GeoCoordinate,
    pub container_sets: Vec<CircuitContainerSet>,
}

/// A stop: its location and the ids of the containers there, no readings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitContainerSet {
    pub location: GeoCoordinate,
    pub containers: Vec<ContainerRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerRef {
    pub id: ContainerId,
}

/// Points left out of every circuit. Not tracked yet, always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotCollected {
    pub container_sets: Vec<CircuitContainerSet>,
}

impl Circuit {
    pub fn new(index: usize, depot: GeoCoordinate, route: &Route) -> Self {
        Self {
            index,
            depot_location: depot,
            container_sets: route
                .points()
                .map(|point| CircuitContainerSet {
                    location: point.location,
                    containers: point
                        .container_ids()
                        .into_iter()
                        .map(|id| ContainerRef { id })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Container, Reading};
    use chrono::{NaiveDate, TimeZone};

    fn point(id: i64, volume: i32) -> CollectionPoint {
        CollectionPoint::new(id, GeoCoordinate::new(43.6, 1.4 + id as f64 / 100.0)).with_container(
            Container::new(id * 10, id, Reading::new(12, volume, 100).unwrap()),
        )
    }

    #[test]
    fn test_response_type_comes_first() {
        let doc = Response::circuits(Vec::new()).into_document();
        let body = doc["response"].as_object().unwrap();
        let keys: Vec<&str> = body.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["response_type", "circuits", "not_collected"]);
        assert_eq!(body["response_type"], "RESP_CIRCUITS");
        assert_eq!(body["circuits"], json!([]));
        assert_eq!(body["not_collected"], json!({"container_sets": []}));
    }

    #[test]
    fn test_error_has_no_other_field() {
        let doc = Response::error().into_document();
        assert_eq!(doc, json!({"response": {"response_type": "ERROR"}}));
        assert_eq!(
            Response::ok().into_document(),
            json!({"response": {"response_type": "OK"}})
        );
    }

    #[test]
    fn test_supervision_state_payload() {
        let policy = ReadinessPolicy::new(0.5).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let state = SupervisionState::new(&[point(1, 90), point(2, 10)], &policy, at);

        let doc = Response::supervision_state(state).into_document();
        let body = &doc["response"];

        assert_eq!(body["response_type"], "RESP_SUPERVISION_STATE");
        assert_eq!(body["supervision_state"]["date_state"], "2024-03-01T08:30:00+00:00");

        let sets = body["supervision_state"]["container_sets"].as_array().unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0]["to_be_collected"], true);
        assert_eq!(sets[0]["containers"][0]["id"], 10);
        assert_eq!(sets[0]["containers"][0]["weight"], 12);
        assert_eq!(sets[0]["containers"][0]["volumemax"], 100);
        assert_eq!(sets[0]["containers"][0]["fillratio"], 0.9);
        assert_eq!(sets[1]["to_be_collected"], false);
        assert_eq!(sets[1]["location"]["longitude"], 1.42);
    }

    #[test]
    fn test_circuit_lists_container_ids_only() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let route = Route::new(1, 4, date).with_stop(point(2, 10)).with_stop(point(1, 90));
        let depot = GeoCoordinate::new(43.602704, 1.441745);

        let circuit = Circuit::new(3, depot, &route);
        let value = serde_json::to_value(&circuit).unwrap();

        assert_eq!(value["index"], 3);
        assert_eq!(value["depot_location"]["latitude"], 43.602704);
        assert_eq!(value["container_sets"][0]["containers"], json!([{"id": 20}]));
        assert_eq!(value["container_sets"][1]["containers"], json!([{"id": 10}]));
        assert!(value["container_sets"][0]["containers"][0].get("weight").is_none());
    }
}
