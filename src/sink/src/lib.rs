pub mod cli;
pub mod config;
pub mod constants;
pub mod event;
pub mod logging;
pub mod relay;
pub mod server;
