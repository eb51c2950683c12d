//! Wires a `CartStore` against a live catalog service and a file-backed store.
//!
//! Point `STRIDE_CATALOG_URL` at a catalog REST service exposing
//! `products/{id}` and `stock/{id}`, then:
//!
//! ```sh
//! STRIDE_CATALOG_URL=http://localhost:3333 cargo run --example cart_session
//! ```

use std::sync::Arc;

use stride_cart::catalog::CatalogClient;
use stride_cart::config::CatalogConfig;
use stride_cart::notify::TracingNotifier;
use stride_cart::storage::FileStore;
use stride_cart::store::{AmountUpdate, CartStore};
use stride_core::ProductId;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = CatalogConfig::from_env()?;
    let catalog = Arc::new(CatalogClient::new(&config));
    let storage = Box::new(FileStore::open("stride-cart.json")?);
    let mut cart = CartStore::open(catalog, storage, Arc::new(TracingNotifier));

    cart.subscribe(|items| {
        tracing::info!(entries = items.len(), "cart changed");
    });

    cart.add_product(ProductId::new(1)).await?;
    cart.add_product(ProductId::new(1)).await?;
    cart.update_product_amount(AmountUpdate {
        product_id: ProductId::new(1),
        amount: 1,
    })
    .await?;

    for item in cart.items() {
        tracing::info!(
            id = %item.id,
            name = %item.name,
            amount = item.amount,
            line_total = %item.line_total(),
            "cart line"
        );
    }
    tracing::info!(subtotal = %cart.subtotal(), "session done");

    Ok(())
}
