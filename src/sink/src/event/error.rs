use std::fmt;

/// Errors raised while reading a CloudEvent out of an HTTP request
#[derive(Debug)]
pub enum EnvelopeError {
    /// A required context attribute was not supplied
    MissingAttribute(&'static str),

    /// An attribute was supplied but could not be interpreted
    InvalidAttribute { name: String, reason: String },

    /// The event declares a spec version this binding does not speak
    UnsupportedSpecVersion(String),

    /// A structured-mode body was not a JSON object
    MalformedBody(serde_json::Error),

    /// `data_base64` was not valid base64
    InvalidBase64(base64::DecodeError),
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::MissingAttribute(name) => {
                write!(f, "missing required cloud event attribute '{}'", name)
            }
            EnvelopeError::InvalidAttribute { name, reason } => {
                write!(f, "invalid cloud event attribute '{}': {}", name, reason)
            }
            EnvelopeError::UnsupportedSpecVersion(version) => {
                write!(f, "unsupported cloud event specversion '{}'", version)
            }
            EnvelopeError::MalformedBody(e) => {
                write!(f, "malformed structured cloud event: {}", e)
            }
            EnvelopeError::InvalidBase64(e) => write!(f, "invalid data_base64: {}", e),
        }
    }
}

impl std::error::Error for EnvelopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnvelopeError::MalformedBody(e) => Some(e),
            EnvelopeError::InvalidBase64(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        EnvelopeError::MalformedBody(err)
    }
}

impl From<base64::DecodeError> for EnvelopeError {
    fn from(err: base64::DecodeError) -> Self {
        EnvelopeError::InvalidBase64(err)
    }
}

impl EnvelopeError {
    pub fn invalid(name: impl Into<String>, reason: impl fmt::Display) -> Self {
        EnvelopeError::InvalidAttribute {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while decoding an event's data into a typed payload
#[derive(Debug)]
pub enum DataError {
    /// The data content type has no decoder
    UnsupportedContentType(String),

    /// The data is not the expected JSON shape
    Json(serde_json::Error),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::UnsupportedContentType(content_type) => {
                write!(f, "cannot decode data with content type '{}'", content_type)
            }
            DataError::Json(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::UnsupportedContentType(_) => None,
            DataError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Json(err)
    }
}
