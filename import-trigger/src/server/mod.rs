//! HTTP CloudEvent endpoint.
//!
//! Eventarc delivers each storage event as one `POST /`. A 2xx response
//! acknowledges the event; anything else marks the delivery as failed and
//! leaves redelivery to Eventarc's retry policy. Only import failures are
//! answered with a non-2xx status; events that cannot be decoded would fail
//! the same way on every redelivery and are acknowledged after a warning.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tracing::warn;

use import_trigger_handler::{StorageEvent, TriggerError, TriggerHandler};

/// Content type of structured-mode CloudEvents.
const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

/// Build the router serving the trigger.
pub fn router(handler: Arc<TriggerHandler>) -> Router {
    Router::new()
        .route("/", post(receive_event))
        .route("/healthz", get(health))
        .with_state(handler)
}

async fn health() -> &'static str {
    "ok"
}

async fn receive_event(
    State(handler): State<Arc<TriggerHandler>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let event = match decode_event(&headers, &body) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Skipping undecodable event");
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    match handler.handle(&event).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Decode a CloudEvent delivered in binary or structured content mode.
pub fn decode_event(headers: &HeaderMap, body: &[u8]) -> Result<StorageEvent, TriggerError> {
    let content_type = header_str(headers, header::CONTENT_TYPE.as_str()).unwrap_or_default();
    if content_type.starts_with(STRUCTURED_CONTENT_TYPE) {
        return StorageEvent::from_structured(body);
    }

    let event_type = header_str(headers, "ce-type")
        .ok_or_else(|| TriggerError::invalid_payload("missing ce-type header"))?;
    let id = header_str(headers, "ce-id").map(str::to_string);

    StorageEvent::from_binary(event_type, id, body)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
