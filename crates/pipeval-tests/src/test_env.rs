//! Live server harness for end-to-end tests
//!
//! Binds the real router to an ephemeral loopback port so tests exercise
//! the full TCP and HTTP stack.

use anyhow::{Context, Result};
use pipeval_lib::{AppConfig, ServerError, router, server::serve_with_shutdown};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Running server bound to 127.0.0.1 on an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    /// Start a server with the default configuration
    pub async fn start() -> Result<Self> {
        Self::start_with(AppConfig::default()).await
    }

    /// Start a server with a custom configuration; host and port are ignored
    pub async fn start_with(config: AppConfig) -> Result<Self> {
        let app = router(&config)?;
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("binding ephemeral test port")?;
        let addr = listener.local_addr()?;

        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_with_shutdown(listener, app, async move {
            let _ = signal.await;
        }));

        Ok(Self {
            addr,
            shutdown,
            handle,
        })
    }

    /// Absolute URL for a path on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger graceful shutdown and wait for the server task
    pub async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.handle.await??;
        Ok(())
    }
}
