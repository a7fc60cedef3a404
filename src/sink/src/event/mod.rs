mod cloud_event;
mod error;
pub mod http_binding;
mod pubsub;

pub use cloud_event::{CloudEvent, SPEC_VERSION};
pub use error::{DataError, EnvelopeError};
pub use pubsub::{MessagePublishedData, PubSubMessage};
