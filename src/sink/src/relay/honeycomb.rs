use super::context::InvocationContext;
use super::error::{InvocationCancelled, RelayError};
use crate::config::RelayConfig;
use crate::constants::{HONEYCOMB_API_HOST, HONEYCOMB_EVENTS_PATH, HONEYCOMB_TEAM_HEADER};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request, StatusCode};

/// Response returned by the Honeycomb events API
#[derive(Debug, Clone)]
pub struct HoneycombResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HoneycombResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Thin client for `POST /1/events/<dataset>`.
///
/// No timeout is configured, so a hung connection stalls the caller until the
/// invocation is cancelled.
#[derive(Clone, Debug)]
pub struct HoneycombClient {
    client: Client,
    api_host: String,
}

impl Default for HoneycombClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HoneycombClient {
    pub fn new() -> Self {
        Self::with_api_host(HONEYCOMB_API_HOST)
    }

    pub fn with_api_host(api_host: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_host: api_host.into(),
        }
    }

    /// The dataset is appended as-is; it comes from trusted configuration.
    pub fn events_url(&self, dataset: &str) -> String {
        format!(
            "{}{}{}",
            self.api_host.trim_end_matches('/'),
            HONEYCOMB_EVENTS_PATH,
            dataset
        )
    }

    pub fn build_request(&self, config: &RelayConfig, body: Bytes) -> Result<Request, RelayError> {
        self.client
            .post(self.events_url(&config.dataset))
            .header(CONTENT_TYPE, "application/json")
            .header(HONEYCOMB_TEAM_HEADER, config.api_key.as_str())
            .body(body)
            .build()
            .map_err(RelayError::RequestBuild)
    }

    /// Execute `request` and read the whole response body. The status code is
    /// returned to the caller but never turned into an error here.
    pub async fn send(
        &self,
        ctx: &InvocationContext,
        request: Request,
    ) -> Result<HoneycombResponse, RelayError> {
        let response = tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                return Err(RelayError::Transport(Box::new(InvocationCancelled)));
            }
            result = self.client.execute(request) => {
                result.map_err(|e| RelayError::Transport(Box::new(e)))?
            }
        };

        let status = response.status();
        let body = tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                return Err(RelayError::ResponseRead(Box::new(InvocationCancelled)));
            }
            result = response.bytes() => {
                result.map_err(|e| RelayError::ResponseRead(Box::new(e)))?
            }
        };

        Ok(HoneycombResponse { status, body })
    }
}
