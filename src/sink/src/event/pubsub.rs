use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::collections::HashMap;

/// Pub/Sub message as carried by a `google.cloud.pubsub.topic.v1.messagePublished` event.
///
/// https://cloud.google.com/pubsub/docs/reference/rest/v1/PubsubMessage
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PubSubMessage {
    /// Payload, base64 on the wire and decoded here.
    #[serde(default, deserialize_with = "base64_bytes")]
    pub data: Vec<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub publish_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ordering_key: String,
}

impl PubSubMessage {
    pub fn data_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// Event data of a Pub/Sub `messagePublished` CloudEvent.
///
/// https://cloud.google.com/eventarc/docs/cloudevents#pubsub
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MessagePublishedData {
    #[serde(default)]
    pub message: PubSubMessage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn base64_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(encoded) => STANDARD.decode(encoded).map_err(serde::de::Error::custom),
    }
}
