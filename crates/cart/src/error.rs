//! Unified error type for cart mutations.
//!
//! Every mutation on [`crate::store::CartStore`] returns `Result<(), CartError>`.
//! The store additionally dispatches one [`crate::notify::CartNotice`] per
//! rejected mutation, so UI layers can ignore the error value entirely.

use stride_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Reasons a cart mutation can be rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds available stock. The cart is unchanged.
    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Catalog lookup failed. The cart is unchanged.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed. The in-memory cart may already hold the
    /// mutation; the stored blob does not.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_display() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(3),
            requested: 4,
            available: 2,
        };
        assert_eq!(err.to_string(), "requested 4 of product 3, only 2 in stock");
    }

    #[test]
    fn test_catalog_error_wraps_cause() {
        let err = CartError::from(CatalogError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        assert!(err.to_string().starts_with("catalog error:"));
    }
}
