use tokio_util::sync::CancellationToken;

/// Request-scoped context handed to each relay invocation.
///
/// Cancelling it aborts the outbound Honeycomb call if one is in flight.
/// The HTTP front end never calls [`InvocationContext::cancel`]: a client
/// disconnect drops the invocation future instead, and server shutdown lets
/// in-flight invocations finish. `cancel` is for callers embedding
/// [`EventRelay`](super::EventRelay) under their own deadline.
#[derive(Clone, Debug, Default)]
pub struct InvocationContext {
    cancellation_token: CancellationToken,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub async fn cancelled(&self) {
        self.cancellation_token.cancelled().await
    }
}
