//! Order sessions
//!
//! One [`OrderManager`] serves one conversation: it owns the cart, prices
//! items against the shared catalog and persists the order on completion.
//! Every operation validates before it mutates, so a failed call leaves the
//! cart exactly as it was.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartState},
    catalog::Catalog,
    clock::{Clock, SystemClock},
    items::{Extras, ItemId, OrderItem, ParseSizeError, Size, normalize},
    orders::{CompletedOrder, FileOrderStore, OrderStore, StoreError},
    pricing::{TotalPriceError, calculate_price},
    prices::spoken,
    render::{ItemAdded, ItemRemoved, Menu, NameSet, OrderConfirmation, OrderReview},
};

/// Errors returned by order operations.
///
/// Messages are phrased to be relayed to the customer as-is.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The drink is not on the menu.
    #[error("Sorry, we don't have {drink}. Available drinks: {available}")]
    InvalidDrink {
        /// Normalised drink that was requested
        drink: String,
        /// Comma-separated drinks on the menu
        available: String,
    },

    /// The size is not small, medium or large.
    #[error("Size must be small, medium, or large, not {0}")]
    InvalidSize(String),

    /// No item in the cart has the identifier.
    #[error("Item {0} not found. Use review_order to see all items.")]
    ItemNotFound(String),

    /// Completion was attempted with nothing in the cart.
    #[error("Cannot complete order - no items in the order. Please add items first.")]
    EmptyOrder,

    /// Completion was attempted before the customer gave a name.
    #[error("Cannot complete order - customer name is missing. Please ask for their name.")]
    MissingCustomerName,

    /// Prices could not be summed.
    #[error(transparent)]
    Pricing(#[from] TotalPriceError),

    /// The completed order could not be written.
    #[error("Failed to save order: {0}")]
    Persist(#[from] StoreError),
}

impl OrderError {
    /// Stable machine-readable kind, used as the tool error tag.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::InvalidDrink { .. } => "invalid_drink",
            OrderError::InvalidSize(_) => "invalid_size",
            OrderError::ItemNotFound(_) => "item_not_found",
            OrderError::EmptyOrder => "empty_order",
            OrderError::MissingCustomerName => "missing_customer_name",
            OrderError::Pricing(_) => "pricing",
            OrderError::Persist(_) => "persist",
        }
    }
}

/// Cart, catalog and storage for a single ordering conversation.
#[derive(Debug)]
pub struct OrderManager<S = FileOrderStore, C = SystemClock> {
    catalog: Arc<Catalog>,
    cart: Cart,
    store: S,
    clock: C,
}

impl<S: OrderStore, C: Clock> OrderManager<S, C> {
    /// Start a session with an empty cart.
    pub fn new(catalog: Arc<Catalog>, store: S, clock: C) -> Self {
        let cart = Cart::new(catalog.currency());

        Self {
            catalog,
            cart,
            store,
            clock,
        }
    }

    /// The catalog items are priced against
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The in-progress cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Where completed orders are written
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lifecycle state of the cart
    pub fn state(&self) -> CartState {
        self.cart.state()
    }

    /// Add a drink to the cart.
    ///
    /// Identifiers are normalised first. Milks and extras that the catalog does not
    /// list are accepted and cost nothing.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidDrink`] if the drink is not on the menu.
    /// - [`OrderError::InvalidSize`] if the size is not small, medium or large.
    pub fn add_item(
        &mut self,
        drink: &str,
        size: &str,
        milk: &str,
        extras: &[String],
    ) -> Result<ItemAdded, OrderError> {
        let drink_id = normalize(drink);

        let drink = self
            .catalog
            .drink(&drink_id)
            .ok_or_else(|| OrderError::InvalidDrink {
                available: self.catalog.drink_ids().collect::<Vec<_>>().join(", "),
                drink: drink_id.clone(),
            })?;

        let size: Size = size
            .parse()
            .map_err(|ParseSizeError(size)| OrderError::InvalidSize(size))?;

        let milk = match normalize(milk) {
            milk if milk.is_empty() => "none".to_string(),
            milk => milk,
        };

        let extras: Extras = extras
            .iter()
            .map(|extra| normalize(extra))
            .filter(|extra| !extra.is_empty())
            .collect();

        let price = calculate_price(&self.catalog, drink, size, &milk, &extras)
            .map_err(TotalPriceError::from)?;

        let id = self.cart.allocate_id();
        let item = OrderItem::new(id, drink.id(), size, milk, extras, price);

        info!(
            item_id = %id,
            drink = item.drink(),
            size = %size,
            milk = item.milk(),
            extras = ?item.extras(),
            price = %spoken(&price),
            "added item"
        );

        let added = ItemAdded::from(&item);
        self.cart.push(item);

        Ok(added)
    }

    /// Remove an item by its identifier (`item_3` or `3`).
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::ItemNotFound`] if no item in the cart has the identifier.
    pub fn remove_item(&mut self, item_id: &str) -> Result<ItemRemoved, OrderError> {
        let id: ItemId = item_id
            .parse()
            .map_err(|_err| OrderError::ItemNotFound(item_id.to_string()))?;

        let removed = self
            .cart
            .remove(id)
            .ok_or_else(|| OrderError::ItemNotFound(id.to_string()))?;

        info!(
            item_id = %id,
            drink = removed.drink(),
            size = %removed.size(),
            remaining = self.cart.len(),
            "removed item"
        );

        Ok(ItemRemoved(removed))
    }

    /// Summarise the cart with its running total. Never changes the cart.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Pricing`] if item prices cannot be summed.
    pub fn review_order(&self) -> Result<OrderReview<'_>, OrderError> {
        let total = self.cart.subtotal()?;

        debug!(
            items = self.cart.len(),
            total = %spoken(&total),
            customer_name = self.cart.customer_name(),
            "reviewed order"
        );

        Ok(OrderReview::new(
            self.cart.items(),
            total,
            self.cart.customer_name(),
        ))
    }

    /// The menu with prices.
    pub fn show_menu(&self) -> Menu<'_> {
        debug!("displayed menu");

        Menu(&self.catalog)
    }

    /// Set or replace the name the order is called out for.
    pub fn set_customer_name(&mut self, name: &str) -> NameSet {
        self.cart.set_customer_name(name);

        info!(customer_name = name, "customer name set");

        NameSet(name.to_string())
    }

    /// Persist the order and clear the cart for the next customer.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyOrder`] if the cart has no items.
    /// - [`OrderError::MissingCustomerName`] if no name has been given.
    /// - [`OrderError::Persist`] if the order could not be written; the cart is kept.
    pub fn complete_order(&mut self) -> Result<OrderConfirmation, OrderError> {
        if self.cart.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let customer_name = match self.cart.customer_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(OrderError::MissingCustomerName),
        };

        let completed_at = self.clock.now();
        let order = CompletedOrder::from_cart(&self.cart, &customer_name, &completed_at)?;
        let path = self.store.save(&order)?;

        self.cart.clear();

        info!(
            order_id = %order.order_id,
            customer_name = %order.customer_name,
            item_count = order.item_count,
            total = %order.total,
            "order completed"
        );

        Ok(OrderConfirmation {
            order,
            path,
            shop: self.catalog.name().to_string(),
            currency_symbol: self.catalog.currency().symbol,
        })
    }
}
