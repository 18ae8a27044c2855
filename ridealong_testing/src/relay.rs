//! Stand-in for the external form relay.

use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

pub const RELAY_ROUTE: &str = "/f/test";

#[derive(Debug, Clone, Default)]
pub struct StubRelay {
    fail_with: Option<StatusCode>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl StubRelay {
    /// A relay accepting every submission.
    pub fn accepting() -> Self {
        Self::default()
    }

    /// A relay answering every submission with `status`.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    /// Submissions received so far, in arrival order.
    pub fn received(&self) -> Vec<Value> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    pub fn router(self) -> Router<()> {
        Router::new()
            .route(RELAY_ROUTE, routing::post(submit))
            .with_state(self)
    }

    /// Serves the relay on an ephemeral localhost port in the background and
    /// returns its submission endpoint.
    pub async fn spawn(self) -> anyhow::Result<Url> {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .context("Failed to bind stub relay")?;
        let addr = listener.local_addr()?;
        let router = self.router();
        tokio::spawn(async move { axum::serve(listener, router).await });
        endpoint(addr)
    }
}

pub async fn start_server(host: IpAddr, port: u16, relay: StubRelay) -> anyhow::Result<()> {
    info!("Starting relay testing server on {host}:{port}");
    info!("Relay endpoint: {}", endpoint((host, port).into())?);
    match relay.fail_with {
        Some(status) => info!("Every submission is answered with {status}"),
        None => info!("Every submission is accepted"),
    }

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, relay.router())
        .await
        .context("Failed to start HTTP server")
}

fn endpoint(addr: SocketAddr) -> anyhow::Result<Url> {
    format!("http://{addr}{RELAY_ROUTE}")
        .parse()
        .context("Failed to build relay endpoint url")
}

async fn submit(relay: State<StubRelay>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    info!(?body, "received submission");
    if let Ok(mut received) = relay.received.lock() {
        received.push(body);
    }

    match relay.fail_with {
        Some(status) => (status, Json(json!({ "error": "Relay unavailable" }))),
        None => (StatusCode::OK, Json(json!({ "ok": true }))),
    }
}
