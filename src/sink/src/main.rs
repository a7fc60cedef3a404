use anyhow::Context;
use clap::Parser;
use honeycomb_sink::cli::Cli;
use honeycomb_sink::config::ConfigLoader;
use honeycomb_sink::logging::setup_logging;
use honeycomb_sink::server;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_server_config().context("Can't load server settings")?;
    cli.apply_overrides(&mut config);

    setup_logging(config.log_format)?;

    server::serve(config).await
}
