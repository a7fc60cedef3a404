use crate::event::DataError;
use std::fmt;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a single relay invocation.
///
/// Every variant is fatal for the invocation; redelivery is up to whatever
/// delivered the event.
#[derive(Debug)]
pub enum RelayError {
    /// A required environment variable is unset
    ConfigMissing { variable: String },

    /// The event data is not a Pub/Sub `messagePublished` payload
    Decode(DataError),

    /// The Honeycomb request could not be constructed
    RequestBuild(reqwest::Error),

    /// The Honeycomb request did not complete
    Transport(BoxError),

    /// The Honeycomb response body could not be read
    ResponseRead(BoxError),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::ConfigMissing { variable } => {
                write!(f, "{} environment variable is missing", variable)
            }
            RelayError::Decode(e) => write!(f, "failed to decode pubsub event: {}", e),
            RelayError::RequestBuild(e) => {
                write!(f, "failed to initialize honeycomb post request: {}", e)
            }
            RelayError::Transport(e) => {
                write!(f, "failed to send post request to honeycomb: {}", e)
            }
            RelayError::ResponseRead(e) => {
                write!(f, "failed to read honeycomb post request response: {}", e)
            }
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::ConfigMissing { .. } => None,
            RelayError::Decode(e) => Some(e),
            RelayError::RequestBuild(e) => Some(e),
            RelayError::Transport(e) => Some(e.as_ref()),
            RelayError::ResponseRead(e) => Some(e.as_ref()),
        }
    }
}

impl From<DataError> for RelayError {
    fn from(err: DataError) -> Self {
        RelayError::Decode(err)
    }
}

impl RelayError {
    pub fn config_missing(variable: impl Into<String>) -> Self {
        RelayError::ConfigMissing {
            variable: variable.into(),
        }
    }

    /// Name of the pipeline step that failed
    pub fn step(&self) -> &'static str {
        match self {
            RelayError::ConfigMissing { .. } => "configuration",
            RelayError::Decode(_) => "decode",
            RelayError::RequestBuild(_) => "request_build",
            RelayError::Transport(_) => "transport",
            RelayError::ResponseRead(_) => "response_read",
        }
    }
}

/// Raised in place of a transport or read error when the invocation is cancelled mid-call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationCancelled;

impl fmt::Display for InvocationCancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invocation cancelled")
    }
}

impl std::error::Error for InvocationCancelled {}
