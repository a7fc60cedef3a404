mod app;
mod handlers;
mod state;

pub use app::get_app;

use crate::config::{ProcessEnv, RelayConfig, ServerConfig};
use crate::relay::{EventRelay, HoneycombClient};
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct SinkServer {
    relay: Arc<EventRelay>,
    listener: TcpListener,
}

impl SinkServer {
    pub async fn bind(addr: SocketAddr, relay: EventRelay) -> anyhow::Result<Self> {
        match TcpListener::bind(addr).await {
            Ok(listener) => Ok(Self {
                relay: Arc::new(relay),
                listener,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                anyhow::bail!(
                    "Failed to start honeycomb sink: port {} is already in use. Set PORT or pass --port to pick another one.",
                    addr.port()
                );
            }
            Err(e) => anyhow::bail!("Failed to bind to address {}: {}", addr, e),
        }
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` is cancelled, then let in-flight invocations finish
    pub async fn run(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let app = get_app(self.relay);

        let shutdown_future = async move {
            shutdown.cancelled().await;
        };

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_future)
            .await?;

        debug!("Honeycomb sink stopped");
        Ok(())
    }
}

/// Build the relay from `config` and serve until Ctrl-C or SIGTERM
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if let Err(e) = RelayConfig::resolve(&ProcessEnv) {
        // not fatal: configuration is read again for every event
        warn!("{}; events will be rejected until it is set", e);
    }

    let relay = EventRelay::new(
        ProcessEnv,
        HoneycombClient::with_api_host(config.honeycomb_api_host.clone()),
    );
    let addr = config.socket_addr()?;
    let server = SinkServer::bind(addr, relay).await?;

    info!(
        "Function target {} listening on {}, forwarding to {}",
        config.function_target,
        server.local_addr()?,
        config.honeycomb_api_host
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            info!("Shutdown signal received, draining in-flight events");
            shutdown.cancel();
        }
    });

    server.run(shutdown).await.context("honeycomb sink server failed")
}

async fn wait_for_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
