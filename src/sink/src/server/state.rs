use crate::relay::EventRelay;
use std::sync::Arc;

#[derive(Clone)]
pub(super) struct SinkState {
    relay: Arc<EventRelay>,
}

impl SinkState {
    pub fn new(relay: Arc<EventRelay>) -> Self {
        Self { relay }
    }

    pub fn relay(&self) -> &EventRelay {
        &self.relay
    }
}
