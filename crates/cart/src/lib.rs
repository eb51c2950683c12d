//! Stride Cart - client-side cart state manager.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the in-memory cart and is the only writer
//! - Every accepted mutation is persisted in full to a [`storage::PersistentStore`]
//!   under a single fixed key
//! - Quantity changes are validated against live stock from a [`catalog::Catalog`]
//! - Rejected mutations surface through a [`notify::Notifier`] side-channel,
//!   one notice per rejection
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use stride_cart::catalog::CatalogClient;
//! use stride_cart::config::CatalogConfig;
//! use stride_cart::notify::TracingNotifier;
//! use stride_cart::storage::FileStore;
//! use stride_cart::store::CartStore;
//! use stride_core::ProductId;
//!
//! let catalog = Arc::new(CatalogClient::new(&CatalogConfig::from_env()?));
//! let storage = Box::new(FileStore::open("cart.json")?);
//! let mut cart = CartStore::open(catalog, storage, Arc::new(TracingNotifier));
//!
//! cart.add_product(ProductId::new(1)).await?;
//! for item in cart.items() {
//!     println!("{} x{}", item.name, item.amount);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;
pub mod types;

pub use catalog::{Catalog, CatalogClient, CatalogError};
pub use error::CartError;
pub use notify::{CartNotice, Notifier, TracingNotifier};
pub use storage::{CART_STORAGE_KEY, FileStore, MemoryStore, PersistentStore, StorageError};
pub use store::{AmountUpdate, CartStore, SubscriptionId};
pub use types::{CartItem, Product, StockInfo};
