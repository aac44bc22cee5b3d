//! Integration tests for the Supermarket API.
//!
//! Each test starts its own server on an ephemeral loopback port, backed by
//! the in-memory document store, and talks to it over HTTP with `reqwest`.
//! No database or external service is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p supermarket-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::net::SocketAddr;

use reqwest::Client;
use supermarket_api::config::ApiConfig;
use supermarket_api::db;
use supermarket_api::routes;
use supermarket_api::state::AppState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running API server and a client pointed at it.
///
/// The server task is aborted when this value is dropped.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> io::Result<Self> {
        Self::start_with(ApiConfig::in_memory()).await
    }

    /// Start a server with no document store configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start_without_store() -> io::Result<Self> {
        let mut config = ApiConfig::in_memory();
        config.store = None;
        config.database_url_set = false;
        Self::start_with(config).await
    }

    /// Start a server from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be built or the listener cannot be
    /// bound.
    pub async fn start_with(config: ApiConfig) -> io::Result<Self> {
        let store = config
            .store
            .as_ref()
            .map(db::connect)
            .transpose()
            .map_err(io::Error::other)?;

        let listener = TcpListener::bind(config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        let app = routes::router(AppState::new(config, store));

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            client: Client::new(),
            handle,
        })
    }

    /// Absolute URL for `path` (which must start with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// HTTP client for this server.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
