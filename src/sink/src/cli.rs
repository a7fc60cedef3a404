use crate::config::{LogFormat, ServerConfig};
use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "honeycomb-sink",
    about = "Relays Pub/Sub CloudEvents to the Honeycomb events API",
    version
)]
pub struct Cli {
    /// Address to listen on (overrides HOST)
    #[clap(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[clap(long)]
    pub port: Option<u16>,

    /// Log output format (overrides LOG_FORMAT)
    #[clap(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
    }
}
