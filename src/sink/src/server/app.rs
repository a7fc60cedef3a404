use crate::constants::EVENT_ENDPOINT;
use crate::relay::EventRelay;
use crate::server::handlers::receive_event;
use crate::server::state::SinkState;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

pub fn get_app(relay: Arc<EventRelay>) -> Router {
    Router::new()
        .route(EVENT_ENDPOINT, post(receive_event))
        // Pub/Sub pushes messages up to 10 MB, base64-encoded on top of that;
        // the platform enforces its own request cap
        .layer(DefaultBodyLimit::disable())
        .with_state(SinkState::new(relay))
}
