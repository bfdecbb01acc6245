//! Integration tests for Farmstand.
//!
//! # Test Setup
//!
//! These tests are hermetic. Each test serves a canned sheet response from an
//! in-process axum server bound to an ephemeral port, points a `SheetClient`
//! at it, and persists carts into per-test temp directories. No network
//! access, no fixed ports, no external services.
//!
//! # Test Categories
//!
//! - `catalog_fetch` - Fetch + normalization through the real client,
//!   including every degraded path (non-200, malformed body, empty sheet,
//!   connection refused)
//! - `cart_flow` - The add/merge/persist flow end to end against the file
//!   repository

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use url::Url;

use farmstand_storefront::config::SheetConfig;
use farmstand_storefront::sheets::SheetClient;

/// Serve a canned sheet response on an ephemeral port.
///
/// Returns the endpoint URL to point a client at. The server task lives until
/// the test process exits; tests are short-lived, so it is never shut down
/// explicitly.
pub async fn serve_sheet(status: StatusCode, body: &'static str) -> Url {
    let app = Router::new().route("/products", get(move || async move { (status, body) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub sheet listener");
    let addr = listener.local_addr().expect("stub sheet listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub sheet");
    });

    Url::parse(&format!("http://{addr}/products")).expect("stub sheet url")
}

/// A client pointed at `endpoint` with the default 5-minute cache.
#[must_use]
pub fn client_for(endpoint: Url) -> SheetClient {
    SheetClient::new(&SheetConfig {
        endpoint,
        cache_ttl: Duration::from_secs(300),
    })
}

/// An endpoint nothing listens on; loopback connections are refused
/// immediately, so tests exercising the network-failure path stay fast.
pub async fn unreachable_endpoint() -> Url {
    // Bind to grab a free port, then drop the listener before anyone connects
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe listener address");
    drop(listener);

    Url::parse(&format!("http://{addr}/products")).expect("unreachable url")
}
