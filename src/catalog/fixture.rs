//! Catalog documents
//!
//! The YAML shape of a price catalog, before prices are parsed and identifiers normalised.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, INR, USD};
use serde::Deserialize;

use crate::catalog::CatalogError;

/// Top-level catalog document
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Shop name used in confirmations
    pub name: String,

    /// ISO currency code every price must use (e.g. `INR`)
    pub currency: String,

    /// Drinks in menu order
    pub drinks: Vec<DrinkFixture>,

    /// Milk options
    #[serde(default)]
    pub milk: MilkFixture,

    /// Extras in menu order
    #[serde(default)]
    pub extras: Vec<ChargeFixture>,
}

/// Drink with a price per size
#[derive(Debug, Deserialize)]
pub struct DrinkFixture {
    /// Drink identifier
    pub id: String,

    /// Small price (e.g. `"245 INR"`)
    pub small: String,

    /// Medium price
    pub medium: String,

    /// Large price
    pub large: String,
}

/// Milk options
#[derive(Debug, Default, Deserialize)]
pub struct MilkFixture {
    /// Milks served at no extra cost
    #[serde(default)]
    pub included: Vec<String>,

    /// Milks with a flat upcharge
    #[serde(default)]
    pub upcharges: Vec<ChargeFixture>,
}

/// A flat charge for a milk or extra
#[derive(Debug, Deserialize)]
pub struct ChargeFixture {
    /// Milk or extra identifier
    pub id: String,

    /// Charge (e.g. `"60 INR"`)
    pub price: String,
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .ok()
        .and_then(|value| value.checked_mul(Decimal::new(100, 0)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    if minor_units < 0 {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    Ok((minor_units, parse_currency(code)?))
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for codes the catalog does not support.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    match code.trim().to_uppercase().as_str() {
        "INR" => Ok(INR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}
