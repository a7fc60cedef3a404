use crate::event::http_binding;
use crate::relay::InvocationContext;
use crate::server::state::SinkState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use tracing::{error, info_span, warn, Instrument};

/// Receives one CloudEvent per request and runs it through the relay.
///
/// A relay failure becomes a 500 so the delivering platform can redeliver;
/// a request that is not a CloudEvent at all is rejected with 400.
pub(super) async fn receive_event(
    State(state): State<SinkState>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Result<impl IntoResponse> {
    let event = http_binding::from_http(&headers, body).map_err(|e| {
        warn!("Rejected inbound request: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let span = info_span!(
        "invocation",
        event_id = %event.id,
        event_type = %event.event_type,
        source = %event.source
    );
    // dropped with the request future on disconnect, never cancelled explicitly
    let ctx = InvocationContext::new();

    async {
        state.relay().handle(&ctx, &event).await.map_err(|e| {
            error!(step = e.step(), "Invocation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
    .instrument(span)
    .await?;

    Ok(StatusCode::OK)
}
