//! Items

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::prices::Price;

/// Extras attached to a single drink. Most drinks carry none or one.
pub type Extras = SmallVec<[String; 4]>;

/// Normalises a spoken or typed identifier to its catalog form.
///
/// Lowercases and joins whitespace-separated words with underscores, so
/// `"Cold  Brew "` becomes `"cold_brew"`.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Drink size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    /// Small
    Small,

    /// Medium
    Medium,

    /// Large
    Large,
}

impl Size {
    /// Every recognised size, smallest first.
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    /// Catalog identifier for the size.
    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size was not one of small, medium or large.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Size must be small, medium, or large, not {0}")]
pub struct ParseSizeError(pub String);

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            other => Err(ParseSizeError(other.to_string())),
        }
    }
}

/// Session-scoped item identifier, rendered as `item_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u32);

impl ItemId {
    /// The first identifier handed out in a session.
    pub const FIRST: ItemId = ItemId(1);

    /// Creates an identifier from its sequence number.
    pub fn new(value: u32) -> Self {
        ItemId(value)
    }

    /// Sequence number of the identifier.
    pub fn value(self) -> u32 {
        self.0
    }

    /// The identifier issued after this one.
    #[must_use]
    pub fn next(self) -> Self {
        ItemId(self.0.saturating_add(1))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Identifier was neither `item_<n>` nor a bare number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid item identifier: {0}")]
pub struct ParseItemIdError(pub String);

impl FromStr for ItemId {
    type Err = ParseItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        let digits = normalized.strip_prefix("item_").unwrap_or(&normalized);

        digits
            .parse::<u32>()
            .map(ItemId)
            .map_err(|_err| ParseItemIdError(s.to_string()))
    }
}

/// A single drink in a cart.
///
/// The price is fixed when the item is built. Changing a drink means removing it and adding
/// a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    id: ItemId,
    drink: String,
    size: Size,
    milk: String,
    extras: Extras,
    price: Price,
}

impl OrderItem {
    /// Creates an item with an already calculated price.
    pub fn new(
        id: ItemId,
        drink: impl Into<String>,
        size: Size,
        milk: impl Into<String>,
        extras: Extras,
        price: Price,
    ) -> Self {
        Self {
            id,
            drink: drink.into(),
            size,
            milk: milk.into(),
            extras,
            price,
        }
    }

    /// Session identifier of the item
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Catalog identifier of the drink
    pub fn drink(&self) -> &str {
        &self.drink
    }

    /// Drink size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Milk identifier, `none` for black drinks
    pub fn milk(&self) -> &str {
        &self.milk
    }

    /// Extras in the order they were requested
    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Price of the item including milk and extras
    pub fn price(&self) -> &Price {
        &self.price
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn normalize_lowercases_and_joins_words() {
        assert_eq!(normalize("Cold Brew"), "cold_brew");
        assert_eq!(normalize("  FLAT   white "), "flat_white");
        assert_eq!(normalize("extra_shot"), "extra_shot");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn size_parses_case_insensitively() -> TestResult {
        assert_eq!("Medium".parse::<Size>()?, Size::Medium);
        assert_eq!(" large".parse::<Size>()?, Size::Large);

        Ok(())
    }

    #[test]
    fn size_rejects_unknown_values() {
        assert_eq!(
            "venti".parse::<Size>(),
            Err(ParseSizeError("venti".to_string()))
        );
    }

    #[test]
    fn item_id_round_trips_through_display() -> TestResult {
        let id = ItemId::new(3);

        assert_eq!(id.to_string(), "item_3");
        assert_eq!("item_3".parse::<ItemId>()?, id);
        assert_eq!("3".parse::<ItemId>()?, id);
        assert_eq!("Item 3".parse::<ItemId>()?, id);

        Ok(())
    }

    #[test]
    fn item_id_rejects_garbage() {
        assert!("item_".parse::<ItemId>().is_err());
        assert!("latte".parse::<ItemId>().is_err());
    }

    #[test]
    fn item_ids_increase() {
        assert_eq!(ItemId::FIRST.next(), ItemId::new(2));
    }
}
