use crate::constants::{DEFAULT_FUNCTION_TARGET, DEFAULT_HOST, DEFAULT_PORT, HONEYCOMB_API_HOST};
use anyhow::{Context, Result};
use config::{Config as RConfig, Environment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Process-wide settings, loaded once at startup
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub function_target: String,
    pub honeycomb_api_host: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Accepts IPv4 and IPv6 literals as well as names such as `localhost`
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("listen host {} did not resolve to an address", self.host))
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_server_config() -> Result<ServerConfig> {
        Self::load_with(Environment::default())
    }

    /// Same as [`ConfigLoader::load_server_config`] but reads overrides from `vars`
    /// instead of the process environment.
    pub fn load_server_config_from(vars: HashMap<String, String>) -> Result<ServerConfig> {
        Self::load_with(Environment::default().source(Some(vars)))
    }

    fn load_with(environment: Environment) -> Result<ServerConfig> {
        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("function_target", DEFAULT_FUNCTION_TARGET)?
            .set_default("honeycomb_api_host", HONEYCOMB_API_HOST)?
            .set_default("log_format", "text")?;

        // PORT, HOST, FUNCTION_TARGET, HONEYCOMB_API_HOST, LOG_FORMAT
        builder = builder.add_source(environment.try_parsing(true));

        let config: ServerConfig = builder
            .build()?
            .try_deserialize()
            .context("failed to parse server settings")?;

        Ok(config)
    }
}
