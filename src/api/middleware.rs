//! API Middleware
//!
//! Session opening and request logging.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::domain::SessionContext;
use crate::state::AppState;

/// Header carrying the request id set by `SetRequestIdLayer`
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =========================================================================
// Session middleware
// =========================================================================

/// Open a client session and attach its `SessionContext` to the request.
///
/// The correlation id is taken from `x-request-id` when it is a UUID,
/// otherwise a fresh one is generated.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let mut session = state.open_session();
    match correlation_id_from(request.headers()) {
        Some(id) => session = session.with_correlation_id(id),
        None => {
            session.ensure_correlation_id();
        }
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}

fn correlation_id_from(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let (client, correlation_id) = request
        .extensions()
        .get::<SessionContext>()
        .map(|s| (Some(s.client_number), s.correlation_id))
        .unwrap_or((None, None));

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        client = ?client,
        correlation_id = ?correlation_id,
        "Incoming request"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        client = ?client,
        correlation_id = ?correlation_id,
        "Request completed"
    );

    response
}
