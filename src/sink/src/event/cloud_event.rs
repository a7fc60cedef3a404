use super::error::DataError;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

pub const SPEC_VERSION: &str = "1.0";

/// A CloudEvents 1.0 envelope as delivered to the sink.
///
/// The envelope is read-only once built; `data` holds the payload exactly as
/// it arrived on the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct CloudEvent {
    pub id: String,
    pub source: String,
    pub spec_version: String,
    pub event_type: String,
    pub subject: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub data_content_type: Option<String>,
    pub data_schema: Option<String>,
    pub extensions: BTreeMap<String, String>,
    pub data: Bytes,
}

impl CloudEvent {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            spec_version: SPEC_VERSION.to_string(),
            event_type: event_type.into(),
            subject: None,
            time: None,
            data_content_type: None,
            data_schema: None,
            extensions: BTreeMap::new(),
            data: Bytes::new(),
        }
    }

    pub fn with_data(mut self, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.data_content_type = Some(content_type.into());
        self.data = data.into();
        self
    }

    /// Decode the event data into `T`.
    ///
    /// Only JSON payloads are understood. An event without a
    /// `datacontenttype` is treated as JSON.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, DataError> {
        if let Some(content_type) = &self.data_content_type {
            if !is_json_content_type(content_type) {
                return Err(DataError::UnsupportedContentType(content_type.clone()));
            }
        }
        Ok(serde_json::from_slice(&self.data)?)
    }
}

pub(crate) fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_json_content_type(content_type: &str) -> bool {
    let media_type = media_type(content_type);
    media_type == "application/json" || media_type == "text/json" || media_type.ends_with("+json")
}
