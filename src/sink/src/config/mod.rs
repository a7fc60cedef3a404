mod relay;
mod server;

pub use relay::{ConfigSource, ProcessEnv, RelayConfig};
pub use server::{ConfigLoader, LogFormat, ServerConfig};
