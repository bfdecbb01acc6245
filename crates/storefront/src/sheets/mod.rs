//! Sheet-backed catalog client.
//!
//! The shop's catalog is a spreadsheet tab published through a JSON endpoint.
//! [`SheetClient`] fetches it with `reqwest`, normalizes the rows, and caches
//! the resulting catalog with `moka` so repeated reads (page loads, cart
//! additions) do not refetch the sheet.
//!
//! The public contract is fail-soft: [`SheetClient::catalog`] never returns
//! an error. Transport failures, non-success statuses, and malformed bodies
//! are logged and degrade to an empty catalog so the consuming surface keeps
//! rendering.

mod convert;

use std::sync::Arc;

use moka::future::Cache;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::catalog::Catalog;
use crate::config::SheetConfig;

const CATALOG_CACHE_KEY: &str = "catalog";

/// How much response body to keep in diagnostics.
const BODY_SNIPPET_LEN: usize = 200;

/// Errors that can occur while fetching the sheet.
///
/// Internal taxonomy: `catalog()` converts every variant into an empty
/// catalog plus a log line, so none of these escape the module boundary.
#[derive(Debug, Error)]
pub enum SheetError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("sheet endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not a JSON row array.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the published product sheet.
///
/// Cheaply cloneable; successful fetches are cached (TTL from
/// [`SheetConfig::cache_ttl`]), failures are not, so the next call retries.
#[derive(Clone)]
pub struct SheetClient {
    inner: Arc<SheetClientInner>,
}

struct SheetClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<&'static str, Arc<Catalog>>,
}

impl SheetClient {
    /// Create a new sheet client.
    #[must_use]
    pub fn new(config: &SheetConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(SheetClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                cache,
            }),
        }
    }

    /// Load the normalized catalog, serving from cache when fresh.
    ///
    /// Never errors: an unreachable endpoint, a non-success status, or an
    /// unparsable body yields the empty catalog, with diagnostics emitted via
    /// `tracing`.
    #[instrument(skip(self))]
    pub async fn catalog(&self) -> Arc<Catalog> {
        if let Some(catalog) = self.inner.cache.get(CATALOG_CACHE_KEY).await {
            return catalog;
        }

        match self.fetch_rows().await {
            Ok(rows) => {
                if rows.is_empty() {
                    warn!("sheet returned no product rows");
                }
                let catalog = Arc::new(Catalog::new(convert::products_from_rows(&rows)));
                debug!(products = catalog.len(), "normalized sheet rows");
                self.inner
                    .cache
                    .insert(CATALOG_CACHE_KEY, Arc::clone(&catalog))
                    .await;
                catalog
            }
            Err(e) => {
                error!(error = %e, endpoint = %self.inner.endpoint, "failed to load products");
                Arc::new(Catalog::empty())
            }
        }
    }

    /// One GET against the endpoint, parsed as a row array.
    ///
    /// A JSON `null` body counts as an absent row set, not an error.
    async fn fetch_rows(&self) -> Result<Vec<Value>, SheetError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SheetError::Status {
                status,
                body: body.chars().take(BODY_SNIPPET_LEN).collect(),
            });
        }

        let rows: Option<Vec<Value>> = serde_json::from_str(&body)?;
        Ok(rows.unwrap_or_default())
    }
}
