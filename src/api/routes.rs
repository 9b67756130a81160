//! API Routes
//!
//! HTTP carriage of protocol documents: one POST per request document.

use axum::{
    body::Bytes,
    extract::{Extension, State},
    routing::post,
    Json, Router,
};
use serde_json::Value;

use crate::domain::SessionContext;
use crate::state::AppState;

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new().route("/requests", post(handle_request))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

// =========================================================================
// POST /requests
// =========================================================================

/// Decode the body as a request document and answer with the response
/// document. Always 200: failures travel as `ERROR` responses.
async fn handle_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    body: Bytes,
) -> Json<Value> {
    let document = match serde_json::from_slice::<Value>(&body) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(
                client = session.client_number,
                error = %e,
                "Request body is not a JSON document"
            );
            Value::Null
        }
    };

    let dispatcher = state.dispatcher(session);
    Json(dispatcher.handle(&document).await)
}
