//! CloudEvents HTTP protocol binding (inbound side only).
//!
//! Binary mode carries attributes in percent-encoded `ce-*` headers with the
//! raw data as the body. Structured mode carries the whole event as a JSON object with the
//! `application/cloudevents+json` content type.

use super::cloud_event::{media_type, CloudEvent, SPEC_VERSION};
use super::error::EnvelopeError;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const HEADER_PREFIX: &str = "ce-";
const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

/// Read a CloudEvent from an inbound HTTP request
pub fn from_http(headers: &HeaderMap, body: Bytes) -> Result<CloudEvent, EnvelopeError> {
    let content_type = header_str(headers, CONTENT_TYPE.as_str())?;

    let structured = content_type
        .as_deref()
        .is_some_and(|ct| media_type(ct) == STRUCTURED_CONTENT_TYPE);
    if structured {
        from_structured(&body)
    } else {
        from_binary(headers, content_type, body)
    }
}

fn from_binary(
    headers: &HeaderMap,
    content_type: Option<String>,
    body: Bytes,
) -> Result<CloudEvent, EnvelopeError> {
    let mut attributes = BTreeMap::new();
    for name in headers.keys() {
        if let Some(attribute) = name.as_str().strip_prefix(HEADER_PREFIX) {
            if let Some(value) = header_str(headers, name.as_str())? {
                let value = percent_decode_str(&value)
                    .decode_utf8()
                    .map_err(|e| EnvelopeError::invalid(name.as_str(), e))?;
                attributes.insert(attribute.to_string(), value.into_owned());
            }
        }
    }

    let mut event = build_event(attributes)?;
    event.data_content_type = content_type;
    event.data = body;
    Ok(event)
}

fn from_structured(body: &[u8]) -> Result<CloudEvent, EnvelopeError> {
    let mut object: Map<String, Value> = serde_json::from_slice(body)?;

    let data = match (object.remove("data_base64"), object.remove("data")) {
        (Some(Value::String(encoded)), _) => Bytes::from(STANDARD.decode(encoded)?),
        (Some(_), _) => return Err(EnvelopeError::invalid("data_base64", "expected a string")),
        (None, Some(Value::String(text))) => Bytes::from(text),
        (None, Some(Value::Null)) | (None, None) => Bytes::new(),
        (None, Some(value)) => Bytes::from(serde_json::to_vec(&value)?),
    };

    let mut attributes = BTreeMap::new();
    for (name, value) in object {
        let value = match value {
            Value::String(s) => s,
            Value::Null => continue,
            other => other.to_string(),
        };
        attributes.insert(name, value);
    }

    let mut event = build_event(attributes)?;
    event.data = data;
    Ok(event)
}

/// Map context attributes onto the event; whatever is left over becomes an extension
fn build_event(mut attributes: BTreeMap<String, String>) -> Result<CloudEvent, EnvelopeError> {
    let spec_version = attributes
        .remove("specversion")
        .ok_or(EnvelopeError::MissingAttribute("specversion"))?;
    if spec_version != SPEC_VERSION {
        return Err(EnvelopeError::UnsupportedSpecVersion(spec_version));
    }

    let id = required(&mut attributes, "id")?;
    let source = required(&mut attributes, "source")?;
    let event_type = required(&mut attributes, "type")?;

    let time = attributes
        .remove("time")
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| EnvelopeError::invalid("time", e))
        })
        .transpose()?;

    let mut event = CloudEvent::new(id, source, event_type);
    event.time = time;
    event.subject = attributes.remove("subject");
    event.data_content_type = attributes.remove("datacontenttype");
    event.data_schema = attributes.remove("dataschema");
    event.extensions = attributes;
    Ok(event)
}

fn required(
    attributes: &mut BTreeMap<String, String>,
    name: &'static str,
) -> Result<String, EnvelopeError> {
    match attributes.remove(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(EnvelopeError::MissingAttribute(name)),
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Result<Option<String>, EnvelopeError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(str::to_string)
                .map_err(|e| EnvelopeError::invalid(name, e))
        })
        .transpose()
}
