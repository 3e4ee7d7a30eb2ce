//! Price catalog
//!
//! Drink, milk and extra prices. A catalog is loaded once at startup and
//! shared read-only between sessions.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::fixture::{CatalogFixture, ChargeFixture, parse_currency, parse_price},
    items::{Size, normalize},
    prices::Price,
};

pub mod fixture;

const BUILTIN: &str = include_str!("../catalogs/default.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price used a different currency from the catalog
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The same identifier was declared twice
    #[error("Duplicate catalog entry: {0}")]
    DuplicateEntry(String),

    /// The catalog has no drinks
    #[error("Catalog has no drinks")]
    NoDrinks,
}

/// A drink and its price per size
#[derive(Debug, Clone)]
pub struct Drink {
    id: String,
    small: Price,
    medium: Price,
    large: Price,
}

impl Drink {
    /// Drink identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Base price of the drink in the given size
    pub fn price(&self, size: Size) -> &Price {
        match size {
            Size::Small => &self.small,
            Size::Medium => &self.medium,
            Size::Large => &self.large,
        }
    }
}

/// A flat charge for a milk or an extra
#[derive(Debug, Clone)]
pub struct Charge {
    id: String,
    price: Price,
}

impl Charge {
    /// Milk or extra identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Flat charge
    pub fn price(&self) -> &Price {
        &self.price
    }
}

/// Ordered list of charges with lookup by identifier.
#[derive(Debug, Clone, Default)]
struct Charges {
    entries: Vec<Charge>,
    index: FxHashMap<String, usize>,
}

impl Charges {
    fn push(&mut self, charge: Charge) -> Result<(), CatalogError> {
        if self.index.contains_key(&charge.id) {
            return Err(CatalogError::DuplicateEntry(charge.id));
        }

        self.index.insert(charge.id.clone(), self.entries.len());
        self.entries.push(charge);

        Ok(())
    }

    fn get(&self, id: &str) -> Option<&Charge> {
        self.index.get(id).and_then(|&idx| self.entries.get(idx))
    }
}

/// Price catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    currency: &'static Currency,
    drinks: Vec<Drink>,
    drink_index: FxHashMap<String, usize>,
    included_milks: Vec<String>,
    milk_upcharges: Charges,
    extras: Charges,
}

impl Catalog {
    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog document is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any price is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, a price is malformed or in
    /// another currency, or an identifier is declared twice.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        Self::try_from(fixture)
    }

    /// Shop name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currency every price in the catalog uses
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Drinks in menu order
    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    /// Look up a drink by its normalised identifier.
    pub fn drink(&self, id: &str) -> Option<&Drink> {
        self.drink_index
            .get(id)
            .and_then(|&idx| self.drinks.get(idx))
    }

    /// Drink identifiers in menu order
    pub fn drink_ids(&self) -> impl Iterator<Item = &str> {
        self.drinks.iter().map(Drink::id)
    }

    /// Milks served at no extra cost
    pub fn included_milks(&self) -> &[String] {
        &self.included_milks
    }

    /// Milks with an upcharge, in menu order
    pub fn milk_upcharges(&self) -> &[Charge] {
        &self.milk_upcharges.entries
    }

    /// Upcharge for a milk; milks without an upcharge cost nothing extra.
    pub fn milk_upcharge(&self, milk: &str) -> Option<&Price> {
        self.milk_upcharges.get(milk).map(Charge::price)
    }

    /// Extras in menu order
    pub fn extras(&self) -> &[Charge] {
        &self.extras.entries
    }

    /// Charge for an extra, if the catalog lists it.
    pub fn extra_price(&self, extra: &str) -> Option<&Price> {
        self.extras.get(extra).map(Charge::price)
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = CatalogError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;

        if fixture.drinks.is_empty() {
            return Err(CatalogError::NoDrinks);
        }

        let mut drinks = Vec::with_capacity(fixture.drinks.len());
        let mut drink_index = FxHashMap::default();

        for drink in fixture.drinks {
            let id = normalize(&drink.id);

            if drink_index.contains_key(&id) {
                return Err(CatalogError::DuplicateEntry(id));
            }

            drink_index.insert(id.clone(), drinks.len());
            drinks.push(Drink {
                id,
                small: price_in(&drink.small, currency)?,
                medium: price_in(&drink.medium, currency)?,
                large: price_in(&drink.large, currency)?,
            });
        }

        let included_milks = fixture
            .milk
            .included
            .iter()
            .map(|milk| normalize(milk))
            .collect();

        Ok(Self {
            name: fixture.name,
            currency,
            drinks,
            drink_index,
            included_milks,
            milk_upcharges: charges(fixture.milk.upcharges, currency)?,
            extras: charges(fixture.extras, currency)?,
        })
    }
}

fn charges(
    fixtures: Vec<ChargeFixture>,
    currency: &'static Currency,
) -> Result<Charges, CatalogError> {
    let mut charges = Charges::default();

    for charge in fixtures {
        charges.push(Charge {
            id: normalize(&charge.id),
            price: price_in(&charge.price, currency)?,
        })?;
    }

    Ok(charges)
}

fn price_in(s: &str, currency: &'static Currency) -> Result<Price, CatalogError> {
    let (minor_units, price_currency) = parse_price(s)?;

    if price_currency != currency {
        return Err(CatalogError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            price_currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}
