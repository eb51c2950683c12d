//! Catalog service client.
//!
//! # Architecture
//!
//! - [`Catalog`] is the seam consumed by the cart store: live stock lookups
//!   and product detail lookups, both async and fallible
//! - [`CatalogClient`] implements it over the catalog REST service using
//!   `reqwest`, with in-memory caching via `moka` for product details
//!   (5 minute TTL by default)
//! - Stock is mutable data and is never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_cart::catalog::{Catalog, CatalogClient};
//! use stride_cart::config::CatalogConfig;
//! use stride_core::ProductId;
//!
//! let client = CatalogClient::new(&CatalogConfig::from_env()?);
//!
//! let stock = client.stock(ProductId::new(1)).await?;
//! let product = client.product(ProductId::new(1)).await?;
//! ```

mod client;

pub use client::CatalogClient;

use async_trait::async_trait;
use stride_core::ProductId;
use thiserror::Error;

use crate::types::{Product, StockInfo};

/// Errors that can occur when querying the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service responded with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product unknown to the catalog.
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Async lookups against the catalog service.
///
/// The cart store holds this as its only view of the remote side, so tests
/// and alternative backends plug in behind it.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Current purchasable stock for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the service call fails.
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, CatalogError>;

    /// Full product details. The returned product carries no quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the service call fails.
    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError>;
}
