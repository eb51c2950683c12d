//! Domain types for the cart and the catalog wire format.
//!
//! Catalog responses and the persisted cart blob share one JSON dialect:
//! camelCase keys and prices as plain JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stride_core::ProductId;

/// A product as returned by the catalog service.
///
/// Carries no quantity - that is a cart concern, see [`CartItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Product image URL.
    pub image_url: String,
}

/// Available stock for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    /// Catalog product ID.
    pub id: ProductId,
    /// Maximum purchasable quantity currently available.
    pub amount: i64,
}

/// One cart entry: a product plus its in-cart quantity.
///
/// The persisted cart is a JSON array of these, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog product ID. Unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Product image URL.
    pub image_url: String,
    /// Quantity in the cart.
    pub amount: i64,
}

impl CartItem {
    /// Create a cart entry from a catalog product and a quantity.
    #[must_use]
    pub fn new(product: Product, amount: i64) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            amount,
        }
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Trail Runner XT".to_string(),
            price: Decimal::new(1999, 2),
            image_url: "https://cdn.stride.test/trail-runner-xt.jpg".to_string(),
        }
    }

    #[test]
    fn test_product_wire_format_is_camel_case() {
        let json = serde_json::to_string(&sneaker()).expect("serialize");
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"price\":19.99"));
    }

    #[test]
    fn test_product_deserializes_numeric_price() {
        let json = r#"{"id":2,"name":"Court Classic","price":89.5,"imageUrl":"https://cdn.stride.test/court.jpg"}"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.id, ProductId::new(2));
        assert_eq!(product.price, Decimal::new(895, 1));
    }

    #[test]
    fn test_cart_item_round_trip() {
        let item = CartItem::new(sneaker(), 3);
        let json = serde_json::to_string(&item).expect("serialize");
        let back: CartItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, item);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(sneaker(), 3);
        assert_eq!(item.line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_stock_info_deserializes() {
        let stock: StockInfo = serde_json::from_str(r#"{"id":1,"amount":5}"#).expect("deserialize");
        assert_eq!(stock.amount, 5);
    }
}
