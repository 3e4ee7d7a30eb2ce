//! Pricing

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    catalog::{Catalog, Drink},
    items::{OrderItem, Size},
    prices::Price,
};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of a single drink: base price for the size, plus the milk upcharge, plus every extra.
///
/// Milks and extras missing from the catalog add nothing. Repeated extras are charged each time.
///
/// # Errors
///
/// Returns a [`MoneyError`] if a catalog price is in a different currency from the drink.
pub fn calculate_price(
    catalog: &Catalog,
    drink: &Drink,
    size: Size,
    milk: &str,
    extras: &[String],
) -> Result<Price, MoneyError> {
    let base = *drink.price(size);

    let with_milk = match catalog.milk_upcharge(milk) {
        Some(upcharge) => base.add(*upcharge)?,
        None => base,
    };

    extras
        .iter()
        .filter_map(|extra| catalog.extra_price(extra))
        .try_fold(with_milk, |acc, charge| acc.add(*charge))
}

/// Calculates the total price of a list of items
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price(items: &[OrderItem]) -> Result<Price, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    let total = items
        .iter()
        .skip(1)
        .try_fold(*first.price(), |acc, item| acc.add(*item.price()))?;

    Ok(total)
}
