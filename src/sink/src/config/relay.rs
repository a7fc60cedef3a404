use crate::constants::{HONEYCOMB_API_KEY_ENV, HONEYCOMB_DATASET_ENV};
use crate::relay::RelayError;
use std::collections::HashMap;
use std::fmt;

/// Where the relay reads its per-invocation settings from
pub trait ConfigSource: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Reads the live process environment on every lookup
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl ConfigSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Honeycomb destination and credentials, resolved fresh for each invocation
#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub dataset: String,
    pub api_key: String,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("dataset", &self.dataset)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl RelayConfig {
    /// Resolve both variables, failing on the first one that is absent.
    ///
    /// A variable set to the empty string counts as present.
    pub fn resolve(source: &dyn ConfigSource) -> Result<Self, RelayError> {
        let dataset = required(source, HONEYCOMB_DATASET_ENV)?;
        let api_key = required(source, HONEYCOMB_API_KEY_ENV)?;
        Ok(Self { dataset, api_key })
    }
}

fn required(source: &dyn ConfigSource, key: &str) -> Result<String, RelayError> {
    source
        .lookup(key)
        .ok_or_else(|| RelayError::config_missing(key))
}
