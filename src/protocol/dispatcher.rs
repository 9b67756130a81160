//! Protocol Dispatcher
//!
//! One decode → handle → encode cycle per request. `handle` is total: every
//! failure ends in an `ERROR` response, with the cause logged but never sent
//! to the client.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use serde_json::Value;

use crate::domain::{GeoCoordinate, SessionContext};
use crate::error::{AppError, AppResult};
use crate::registry::ContainerRegistry;
use crate::store::RouteStore;

use super::request::{ContainerReport, Request, REQ_CIRCUIT};
use super::response::{Circuit, Response, SupervisionState};

/// Toulouse centre
pub const DEFAULT_DEPOT: GeoCoordinate = GeoCoordinate::new(43.602704, 1.441745);

/// Request handler owned by one client session
#[derive(Debug, Clone)]
pub struct Dispatcher {
    session: SessionContext,
    store: RouteStore,
    registry: Arc<ContainerRegistry>,
    depot: GeoCoordinate,
}

impl Dispatcher {
    pub fn new(
        session: SessionContext,
        store: RouteStore,
        registry: Arc<ContainerRegistry>,
        depot: GeoCoordinate,
    ) -> Self {
        Self {
            session,
            store,
            registry,
            depot,
        }
    }

    /// Process a request document and build the response document
    pub async fn handle(&self, document: &Value) -> Value {
        let client = self.session.client_number;

        let response = self.process(document).await.unwrap_or_else(|e| {
            if e.is_client_error() {
                tracing::warn!(client, code = e.code(), error = %e, "Request rejected");
            } else {
                tracing::error!(client, code = e.code(), error = %e, "Request failed");
            }
            Response::error()
        });

        tracing::info!(client, response_type = ?response.response_type, "Client response");
        response.into_document()
    }

    /// The type is logged before its section is decoded
    async fn process(&self, document: &Value) -> AppResult<Response> {
        let request_type = Request::request_type(document)?;
        tracing::info!(
            client = self.session.client_number,
            request_type = %request_type,
            "Client request"
        );

        match Request::decode_as(document, request_type)? {
            Request::ContainerReport(report) => self.handle_container_report(report).await,
            Request::SupervisionState => self.handle_supervision_state().await,
            Request::TrigCircuitComputation => Ok(self.handle_trig_circuit_computation()),
            Request::Circuits => self.handle_circuits().await,
            Request::Circuit => Err(AppError::Unimplemented(REQ_CIRCUIT)),
            Request::Unsupported(request_type) => Err(AppError::MalformedRequest(format!(
                "unsupported request type: {}",
                request_type
            ))),
        }
    }

    async fn handle_container_report(&self, report: ContainerReport) -> AppResult<Response> {
        let container = self
            .registry
            .apply_reading(report.container_id, report.reading)
            .await?;

        tracing::debug!(
            client = self.session.client_number,
            container_id = container.id,
            fill_ratio = container.fill_ratio(),
            "Container report applied"
        );

        Ok(Response::ok())
    }

    async fn handle_supervision_state(&self) -> AppResult<Response> {
        let points = self.registry.current_points().await?;
        let state = SupervisionState::new(&points, &self.registry.policy(), Utc::now());

        Ok(Response::supervision_state(state))
    }

    fn handle_trig_circuit_computation(&self) -> Response {
        // Fire and continue: the outcome is logged by the computation task
        let _ = self.registry.trigger_route_computation();
        Response::ok()
    }

    async fn handle_circuits(&self) -> AppResult<Response> {
        let planning = self.store.find_planning_by_date(today()).await?;

        let circuits = planning
            .routes
            .iter()
            .enumerate()
            .map(|(index, route)| Circuit::new(index, self.depot, route))
            .collect();

        Ok(Response::circuits(circuits))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
