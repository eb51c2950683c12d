//! Catalog REST client implementation.
//!
//! Plain REST endpoints (`products/{id}`, `stock/{id}`) with `reqwest`,
//! product responses cached via `moka`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use stride_core::ProductId;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;
use crate::types::{Product, StockInfo};

use super::{Catalog, CatalogError};

/// How much of an error response body to keep in logs and errors.
const BODY_SNIPPET_LEN: usize = 200;

/// Client for the catalog REST service.
///
/// Cheaply cloneable. Product details are cached; stock is fetched live on
/// every call.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.product_cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.base_url.as_str().trim_end_matches('/').to_string(),
                timeout: config.timeout,
                cache,
            }),
        }
    }

    /// Execute a GET request and decode the JSON response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        product_id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.endpoint);

        let response = self
            .inner
            .client
            .get(&url)
            .timeout(self.inner.timeout)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(product_id));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&body),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&body),
                "failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, product_id: ProductId) {
        self.inner.cache.invalidate(&product_id).await;
    }

    /// Invalidate all cached products.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    /// Stock is live data and is never cached.
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, CatalogError> {
        self.fetch(&format!("stock/{product_id}"), product_id).await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        // Check cache
        if let Some(product) = self.inner.cache.get(&product_id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self
            .fetch(&format!("products/{product_id}"), product_id)
            .await?;

        // Cache the result
        self.inner.cache.insert(product_id, product.clone()).await;

        Ok(product)
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn config(base: &str) -> CatalogConfig {
        CatalogConfig {
            base_url: Url::parse(base).expect("url"),
            timeout: Duration::from_secs(10),
            product_cache_ttl: Duration::from_secs(300),
        }
    }

    #[test]
    fn test_endpoint_drops_trailing_slash() {
        let client = CatalogClient::new(&config("http://localhost:3333/"));
        assert_eq!(client.inner.endpoint, "http://localhost:3333");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).len(), BODY_SNIPPET_LEN);
        assert_eq!(snippet("short"), "short");
    }
}
