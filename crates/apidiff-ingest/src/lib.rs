//! Ingress for apidiff usage telemetry.
//!
//! Accepts envelopes of telemetry events over HTTP, assigns each event a
//! fresh server-side id, and emits the envelope to the log sink. No
//! durable storage lives here; persistence is downstream of the log.

use apidiff_telemetry::{Envelope, KEY_EVENTS};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

/// Builds the application router with all routes.
pub fn app() -> Router {
    Router::new()
        .route(&format!("/{KEY_EVENTS}"), post(ingest_events))
        .route("/health", get(health))
}

/// Health check handler.
///
/// Returns `200 OK` with service status and version. Used by load
/// balancers and CI to verify the service is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for `POST /events`.
///
/// Malformed bodies are ignored rather than rejected: the handler returns
/// without asserting success, and clients treat anything but 201 as a
/// failed send. Envelopes carrying more than one top-level key are
/// rejected outright, before any id assignment or logging.
async fn ingest_events(body: String) -> Response {
    let mut envelope: Envelope = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(_) => return StatusCode::OK.into_response(),
    };

    if envelope.len() > 1 {
        tracing::info!(count = envelope.len(), "client sent more than one envelope key");
        return StatusCode::BAD_REQUEST.into_response();
    }

    assign_ids(&mut envelope);

    match serde_json::to_string_pretty(&envelope) {
        Ok(payload) => {
            tracing::info!("{payload}");
            StatusCode::CREATED.into_response()
        }
        Err(err) => {
            tracing::error!("failed to encode envelope for logging: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Assign every event a freshly generated unique id, unconditionally
/// overwriting any client-supplied value.
fn assign_ids(envelope: &mut Envelope) {
    for event in envelope.get_mut(KEY_EVENTS).into_iter().flatten() {
        event.id = Uuid::new_v4().to_string();
    }
}
