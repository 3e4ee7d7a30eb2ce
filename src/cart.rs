//! Cart

use rusty_money::iso::Currency;

use crate::{
    items::{ItemId, OrderItem},
    pricing::{TotalPriceError, total_price},
    prices::{Price, zero},
};

/// Where a cart is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// No items.
    Empty,

    /// At least one item, but no customer name yet.
    HasItems,

    /// Items and a customer name, so the order can be completed.
    ReadyForReview,
}

/// Items and customer name for one in-progress order.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<OrderItem>,
    customer_name: Option<String>,
    next_id: ItemId,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            customer_name: None,
            next_id: ItemId::FIRST,
            currency,
        }
    }

    /// Reserve the next item identifier.
    ///
    /// Identifiers are never handed out twice until the cart is cleared.
    pub fn allocate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// The identifier the next added item will receive.
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    /// Append an item.
    pub fn push(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Remove the item with the given identifier, returning it if it was in the cart.
    pub fn remove(&mut self, id: ItemId) -> Option<OrderItem> {
        let idx = self.items.iter().position(|item| item.id() == id)?;

        Some(self.items.remove(idx))
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Customer name, if one has been given.
    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    /// Set or replace the customer name.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = Some(name.into());
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or currency mismatch error.
    pub fn subtotal(&self) -> Result<Price, TotalPriceError> {
        if self.is_empty() {
            return Ok(zero(self.currency));
        }

        total_price(&self.items)
    }

    /// Get the number of items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CartState {
        match (self.is_empty(), self.customer_name().is_some_and(|name| !name.is_empty())) {
            (true, _) => CartState::Empty,
            (false, false) => CartState::HasItems,
            (false, true) => CartState::ReadyForReview,
        }
    }

    /// Drop all items, the customer name and restart identifiers at `item_1`.
    pub fn clear(&mut self) {
        self.items.clear();
        self.customer_name = None;
        self.next_id = ItemId::FIRST;
    }
}
