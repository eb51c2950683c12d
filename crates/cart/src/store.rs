//! The cart store: in-memory cart state, stock-checked mutations, and
//! persistence.
//!
//! One `CartStore` exists per session. It is the only writer of the cart and
//! of the stored blob, and its mutations take `&mut self`, so two in-flight
//! mutations on one store cannot overlap.

use std::sync::Arc;

use stride_core::ProductId;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::error::CartError;
use crate::notify::{CartNotice, Notifier};
use crate::storage::{CART_STORAGE_KEY, PersistentStore, StorageError};
use crate::types::CartItem;

/// Requested quantity change for a product already expected in the cart.
#[derive(Debug, Clone, Copy)]
pub struct AmountUpdate {
    /// Product to update.
    pub product_id: ProductId,
    /// New quantity, stored exactly as supplied when within stock.
    pub amount: i64,
}

/// Handle for a registered cart-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type ChangeCallback = Box<dyn Fn(&[CartItem]) + Send>;

/// Client-side cart state manager.
///
/// Owns the ordered cart collection (unique by product ID, insertion order
/// preserved) and persists the full serialized cart to durable storage after
/// every accepted mutation. Rejected mutations dispatch exactly one
/// [`CartNotice`] and leave both memory and storage untouched.
pub struct CartStore {
    items: Vec<CartItem>,
    catalog: Arc<dyn Catalog>,
    storage: Box<dyn PersistentStore>,
    notifier: Arc<dyn Notifier>,
    subscribers: Vec<(SubscriptionId, ChangeCallback)>,
    next_subscription: u64,
}

impl CartStore {
    /// Open a cart store, adopting any cart previously persisted under
    /// [`CART_STORAGE_KEY`].
    ///
    /// An absent blob yields an empty cart. A blob that cannot be read or
    /// parsed also yields an empty cart, with a warning logged - the stored
    /// value is replaced wholesale on the next accepted mutation.
    #[must_use]
    pub fn open(
        catalog: Arc<dyn Catalog>,
        storage: Box<dyn PersistentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let items = match storage.read(CART_STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!(error = %err, "stored cart is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        Self {
            items,
            catalog,
            storage,
            notifier,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// Current cart entries, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all entry quantities.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> rust_decimal::Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its quantity incremented; a new
    /// product is fetched from the catalog and appended with quantity 1.
    /// Either way the requested quantity is checked against live stock first.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`] if the incremented quantity exceeds stock
    /// - [`CartError::Catalog`] if a catalog lookup fails
    /// - [`CartError::Storage`] if persisting the accepted cart fails
    ///
    /// Every error dispatches one notice: `OutOfStock` for the stock bound,
    /// `AddFailed` otherwise.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        match self.try_add(product_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let notice = match err {
                    CartError::OutOfStock { .. } => CartNotice::OutOfStock,
                    _ => CartNotice::AddFailed,
                };
                self.reject(notice, &err);
                Err(err)
            }
        }
    }

    async fn try_add(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let requested = match self.find(product_id) {
            Some(item) => item.amount + 1,
            None => 1,
        };

        let stock = self.catalog.stock(product_id).await?;
        if requested > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        if let Some(item) = self.find_mut(product_id) {
            item.amount = requested;
        } else {
            let product = self.catalog.product(product_id).await?;
            self.items.push(CartItem::new(product, 1));
        }

        self.commit()
    }

    /// Remove a product from the cart.
    ///
    /// Removing a product that is not in the cart is a no-op, not an error:
    /// no storage write, no notice.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting the shrunk cart fails,
    /// dispatching one `RemoveFailed` notice.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        match self.try_remove(product_id) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.reject(CartNotice::RemoveFailed, &err);
                Err(err)
            }
        }
    }

    fn try_remove(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if self.find(product_id).is_none() {
            return Ok(());
        }

        self.items.retain(|item| item.id != product_id);
        self.commit()
    }

    /// Set a product's quantity to an exact value.
    ///
    /// Stock is checked before the cart is consulted, so an over-stock
    /// request is rejected even for a product that is not in the cart. A
    /// within-stock request for an absent product is a silent no-op. The
    /// supplied amount is stored as-is - there is no lower bound.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`] if the amount exceeds stock
    /// - [`CartError::Catalog`] if the stock lookup fails
    /// - [`CartError::Storage`] if persisting the accepted cart fails
    ///
    /// Every error dispatches one notice: `OutOfStock` for the stock bound,
    /// `UpdateFailed` otherwise.
    #[instrument(skip(self, update), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&mut self, update: AmountUpdate) -> Result<(), CartError> {
        match self.try_update(update).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let notice = match err {
                    CartError::OutOfStock { .. } => CartNotice::OutOfStock,
                    _ => CartNotice::UpdateFailed,
                };
                self.reject(notice, &err);
                Err(err)
            }
        }
    }

    async fn try_update(&mut self, update: AmountUpdate) -> Result<(), CartError> {
        let AmountUpdate { product_id, amount } = update;

        let stock = self.catalog.stock(product_id).await?;
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        if let Some(item) = self.find_mut(product_id) {
            item.amount = amount;
            self.commit()?;
        }

        Ok(())
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback fired with the cart snapshot after every committed
    /// mutation. Rejected and no-op mutations do not fire.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&[CartItem]) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == product_id)
    }

    /// Persist the full cart, then fire change subscribers.
    ///
    /// Called with the in-memory mutation already applied. A failed write
    /// leaves storage on the previous cart; subscribers are not fired.
    fn commit(&mut self) -> Result<(), CartError> {
        let blob = serde_json::to_string(&self.items).map_err(StorageError::Serialize)?;
        self.storage.write(CART_STORAGE_KEY, &blob)?;

        for (_, callback) in &self.subscribers {
            callback(&self.items);
        }

        Ok(())
    }

    fn reject(&self, notice: CartNotice, err: &CartError) {
        tracing::warn!(error = %err, "cart mutation rejected");
        self.notifier.notify(notice);
    }
}
