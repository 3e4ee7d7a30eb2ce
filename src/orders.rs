//! Completed orders
//!
//! The document written once per completed order, and the storage it is written to.

use std::{fmt, path::PathBuf};

use jiff::Zoned;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Cart,
    items::OrderItem,
    pricing::TotalPriceError,
    prices::to_cents,
};

pub mod store;

pub use store::FileOrderStore;

/// Order identifier derived from the completion time, e.g. `20251019_142501`.
///
/// Identifiers have second granularity; two orders completed in the same second share one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Build the identifier for an order completed at `at`.
    pub fn from_time(at: &Zoned) -> Self {
        OrderId(at.strftime("%Y%m%d_%H%M%S").to_string())
    }

    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the order is stored under
    pub fn file_name(&self) -> String {
        format!("order_{}.json", self.0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        OrderId(value.to_string())
    }
}

/// One drink as recorded in a completed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Session item identifier (`item_<n>`)
    pub order_id: String,

    /// Drink identifier
    pub drink_type: String,

    /// Size identifier
    pub size: String,

    /// Milk identifier
    pub milk: String,

    /// Extras in request order
    pub extras: Vec<String>,

    /// Item price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&OrderItem> for OrderLine {
    fn from(item: &OrderItem) -> Self {
        OrderLine {
            order_id: item.id().to_string(),
            drink_type: item.drink().to_string(),
            size: item.size().to_string(),
            milk: item.milk().to_string(),
            extras: item.extras().to_vec(),
            price: *item.price().amount(),
        }
    }
}

/// A finalised order, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOrder {
    /// Order identifier
    pub order_id: OrderId,

    /// ISO-8601 completion time with offset
    pub timestamp: String,

    /// Name the order is called out for
    pub customer_name: String,

    /// Snapshot of the cart items
    pub items: Vec<OrderLine>,

    /// Sum of item prices, rounded to two decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Number of items
    pub item_count: usize,
}

impl CompletedOrder {
    /// Snapshot a cart completed at `at`.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the item prices cannot be summed.
    pub fn from_cart(
        cart: &Cart,
        customer_name: &str,
        at: &Zoned,
    ) -> Result<Self, TotalPriceError> {
        let total = cart.subtotal()?;

        Ok(CompletedOrder {
            order_id: OrderId::from_time(at),
            timestamp: at.timestamp().display_with_offset(at.offset()).to_string(),
            customer_name: customer_name.to_string(),
            items: cart.items().iter().map(OrderLine::from).collect(),
            total: to_cents(&total),
            item_count: cart.len(),
        })
    }
}

/// Order storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing an order document
    #[error("Order storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished document could not be moved into place
    #[error("Failed to persist order document: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// JSON encoding or decoding error
    #[error("Invalid order document: {0}")]
    Json(#[from] serde_json::Error),

    /// No stored order has the identifier
    #[error("Order {0} not found")]
    NotFound(OrderId),
}

/// Durable sink for completed orders.
pub trait OrderStore {
    /// Write an order document, returning where it was written.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the document cannot be written.
    fn save(&self, order: &CompletedOrder) -> Result<PathBuf, StoreError>;
}
