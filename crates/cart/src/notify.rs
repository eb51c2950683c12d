//! User-facing notification side-channel.
//!
//! Rejected mutations produce exactly one notice; accepted mutations produce
//! none. The `Display` strings are library defaults - a UI layer that needs
//! localized copy matches on the variant instead.

use std::fmt;

/// The four user-visible rejection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartNotice {
    /// Requested quantity exceeds available stock (add or update).
    OutOfStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Updating a product quantity failed.
    UpdateFailed,
}

impl fmt::Display for CartNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AddFailed => "Failed to add product to cart",
            Self::RemoveFailed => "Failed to remove product from cart",
            Self::UpdateFailed => "Failed to update product quantity",
        };
        f.write_str(message)
    }
}

/// Receives one notice per rejected cart mutation.
///
/// Implemented by the presentation layer (toast, banner, etc.).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: CartNotice);
}

/// Default notifier: logs each notice at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: CartNotice) {
        tracing::warn!(%notice, "cart mutation rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            CartNotice::OutOfStock.to_string(),
            "Requested quantity is out of stock"
        );
        assert_eq!(
            CartNotice::AddFailed.to_string(),
            "Failed to add product to cart"
        );
        assert_eq!(
            CartNotice::RemoveFailed.to_string(),
            "Failed to remove product from cart"
        );
        assert_eq!(
            CartNotice::UpdateFailed.to_string(),
            "Failed to update product quantity"
        );
    }
}
