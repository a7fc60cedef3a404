//! The event relay: one CloudEvent in, one Honeycomb `POST` out.
//!
//! Each invocation runs the same linear pipeline:
//! configuration lookup, envelope decode, forward, response consumption.
//! Any failure aborts the invocation and is returned to the caller; nothing
//! is retried here.
//!
//! # Example
//!
//! ```rust,no_run
//! # use honeycomb_sink::config::ProcessEnv;
//! # use honeycomb_sink::event::CloudEvent;
//! # use honeycomb_sink::relay::{EventRelay, HoneycombClient, InvocationContext};
//! #
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let relay = EventRelay::new(ProcessEnv, HoneycombClient::new());
//! let event = CloudEvent::new("1", "//pubsub.googleapis.com/", "google.cloud.pubsub.topic.v1.messagePublished")
//!     .with_data("application/json", r#"{"message":{"data":"aGVsbG8="},"subscription":"logs"}"#);
//! relay.handle(&InvocationContext::new(), &event).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod honeycomb;

pub use context::InvocationContext;
pub use error::{BoxError, InvocationCancelled, RelayError};
pub use honeycomb::{HoneycombClient, HoneycombResponse};

use crate::config::{ConfigSource, RelayConfig};
use crate::event::{CloudEvent, MessagePublishedData};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Forwards Pub/Sub payloads to Honeycomb.
///
/// Holds no per-invocation state, so one instance can serve any number of
/// concurrent invocations.
#[derive(Clone)]
pub struct EventRelay {
    config_source: Arc<dyn ConfigSource>,
    honeycomb: HoneycombClient,
}

impl EventRelay {
    pub fn new(config_source: impl ConfigSource + 'static, honeycomb: HoneycombClient) -> Self {
        Self {
            config_source: Arc::new(config_source),
            honeycomb,
        }
    }

    pub async fn handle(
        &self,
        ctx: &InvocationContext,
        event: &CloudEvent,
    ) -> Result<(), RelayError> {
        let config = RelayConfig::resolve(self.config_source.as_ref())?;

        // ------------- READ INCOMING PUBSUB EVENT -------------
        let published = read_pubsub_event(event)?;

        // ------------- SEND PAYLOAD TO HONEYCOMB -------------
        self.send_to_honeycomb(ctx, &config, Bytes::from(published.message.data))
            .await
    }

    async fn send_to_honeycomb(
        &self,
        ctx: &InvocationContext,
        config: &RelayConfig,
        payload: Bytes,
    ) -> Result<(), RelayError> {
        let start_time = Instant::now();
        let request = self.honeycomb.build_request(config, payload)?;
        let response = self.honeycomb.send(ctx, request).await?;

        debug!(
            "Honeycomb request completed with status {} in {:?}",
            response.status,
            start_time.elapsed()
        );
        info!("Honeycomb API's response: {}", response.body_text());

        Ok(())
    }
}

fn read_pubsub_event(event: &CloudEvent) -> Result<MessagePublishedData, RelayError> {
    let published: MessagePublishedData = event.data_as()?;

    info!("PubSub Message ID: {}", published.message.message_id);
    info!("PubSub Subscription name: {}", published.subscription);
    info!("PubSub data: {}", published.message.data_text());

    Ok(published)
}
