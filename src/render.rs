//! Spoken responses
//!
//! Plain-text replies returned to the voice agent. They are read aloud, so
//! they avoid tables and symbols other than the currency sign.

use std::{
    fmt::{self, Display},
    path::PathBuf,
};

use crate::{
    catalog::{Catalog, Charge},
    items::{ItemId, OrderItem, Size},
    orders::CompletedOrder,
    prices::{Price, spoken},
};

pub mod table;

/// `cold_brew` → `cold brew`
pub fn spoken_id(id: &str) -> String {
    id.replace('_', " ")
}

/// `cold_brew` → `Cold Brew`
pub fn title_case(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter: `medium` → `Medium`
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join words the way they are spoken: `a`, `a or b`, `a, b, or c`.
pub fn spoken_list<S: AsRef<str>>(words: &[S], conjunction: &str) -> String {
    match words {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {conjunction} {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let init = init
                .iter()
                .map(|word| word.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");

            format!("{init}, {conjunction} {}", last.as_ref())
        }
    }
}

/// Reply to a successful `add_item`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAdded {
    /// Identifier of the new item
    pub id: ItemId,

    /// Drink identifier
    pub drink: String,

    /// Drink size
    pub size: Size,

    /// Item price
    pub price: Price,
}

impl From<&OrderItem> for ItemAdded {
    fn from(item: &OrderItem) -> Self {
        ItemAdded {
            id: item.id(),
            drink: item.drink().to_string(),
            size: item.size(),
            price: *item.price(),
        }
    }
}

impl Display for ItemAdded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added {} {} to your order! Price: {}. Order ID: {}",
            self.size,
            spoken_id(&self.drink),
            spoken(&self.price),
            self.id
        )
    }
}

/// Reply to a successful `remove_item`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRemoved(pub OrderItem);

impl Display for ItemRemoved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Removed {} {} from your order.",
            self.0.size(),
            spoken_id(self.0.drink())
        )
    }
}

/// Summary of the cart read back before completion.
#[derive(Debug, Clone)]
pub struct OrderReview<'a> {
    items: &'a [OrderItem],
    total: Price,
    customer_name: Option<&'a str>,
}

impl<'a> OrderReview<'a> {
    /// Review of the given items, with their precomputed total.
    pub fn new(items: &'a [OrderItem], total: Price, customer_name: Option<&'a str>) -> Self {
        Self {
            items,
            total,
            customer_name,
        }
    }

    /// Sum of the item prices
    pub fn total(&self) -> &Price {
        &self.total
    }
}

impl Display for OrderReview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return f.write_str("Your order is currently empty.");
        }

        writeln!(f, "Here's your current order:")?;

        for item in self.items {
            writeln!(
                f,
                "- {}: {} {}{}{} - {}",
                item.id(),
                capitalize(item.size().as_str()),
                spoken_id(item.drink()),
                milk_phrase(item.milk()),
                extras_phrase(item.extras()),
                spoken(item.price())
            )?;
        }

        write!(f, "\nTotal: {}", spoken(&self.total))?;

        if let Some(name) = self.customer_name.filter(|name| !name.is_empty()) {
            write!(f, "\nName: {name}")?;
        }

        Ok(())
    }
}

fn milk_phrase(milk: &str) -> String {
    if milk == "none" {
        String::new()
    } else {
        format!(" with {} milk", spoken_id(milk))
    }
}

fn extras_phrase(extras: &[String]) -> String {
    if extras.is_empty() {
        return String::new();
    }

    let extras = extras
        .iter()
        .map(|extra| spoken_id(extra))
        .collect::<Vec<_>>()
        .join(", ");

    format!(" with {extras}")
}

/// The full menu with prices.
#[derive(Debug, Clone, Copy)]
pub struct Menu<'a>(pub &'a Catalog);

impl Display for Menu<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self.0;

        writeln!(f, "Here's our menu at {}:", catalog.name())?;
        writeln!(f)?;
        writeln!(f, "SPECIALTY DRINKS (Small/Medium/Large):")?;

        for drink in catalog.drinks() {
            let prices = Size::ALL
                .iter()
                .map(|&size| spoken(drink.price(size)))
                .collect::<Vec<_>>()
                .join(" / ");

            writeln!(f, "  • {}: {prices}", title_case(drink.id()))?;
        }

        writeln!(f)?;
        writeln!(f, "MILK OPTIONS:")?;

        if !catalog.included_milks().is_empty() {
            let included = catalog
                .included_milks()
                .iter()
                .map(|milk| title_case(milk))
                .collect::<Vec<_>>();

            writeln!(f, "  • {} - included", spoken_list(&included, "or"))?;
        }

        for (price, milks) in group_by_price(catalog.milk_upcharges()) {
            writeln!(f, "  • {} - add {}", spoken_list(&milks, "or"), spoken(&price))?;
        }

        if !catalog.extras().is_empty() {
            writeln!(f)?;
            writeln!(f, "EXTRAS:")?;

            for extra in catalog.extras() {
                writeln!(
                    f,
                    "  • {} - add {}",
                    title_case(extra.id()),
                    spoken(extra.price())
                )?;
            }
        }

        Ok(())
    }
}

/// Groups charges with equal prices, keeping first-seen order.
fn group_by_price(charges: &[Charge]) -> Vec<(Price, Vec<String>)> {
    let mut groups: Vec<(Price, Vec<String>)> = Vec::new();

    for charge in charges {
        match groups.iter_mut().find(|(price, _)| price == charge.price()) {
            Some((_, ids)) => ids.push(title_case(charge.id())),
            None => groups.push((*charge.price(), vec![title_case(charge.id())])),
        }
    }

    groups
}

/// Reply to `set_customer_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet(pub String);

impl Display for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Perfect! I have your name as {}.", self.0)
    }
}

/// Reply to a successful `complete_order`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// The persisted order
    pub order: CompletedOrder,

    /// Where the order document was written
    pub path: PathBuf,

    /// Shop name to thank the customer from
    pub shop: String,

    /// Currency symbol for the total
    pub currency_symbol: &'static str,
}

impl Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = format!("{}{}", self.currency_symbol, self.order.total.round_dp(0));

        write!(
            f,
            "Order completed! Order ID: {}. Total: {total}. Your {} item(s) will be ready shortly, {}! Thank you for choosing {}!",
            self.order.order_id, self.order.item_count, self.order.customer_name, self.shop
        )
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::prices::whole;

    use super::*;

    fn espresso() -> OrderItem {
        OrderItem::new(
            ItemId::new(1),
            "espresso",
            Size::Medium,
            "oat",
            smallvec![],
            whole(345, iso::INR),
        )
    }

    fn mocha() -> OrderItem {
        OrderItem::new(
            ItemId::new(2),
            "mocha",
            Size::Large,
            "none",
            smallvec!["whipped_cream".to_string(), "extra_shot".to_string()],
            whole(620, iso::INR),
        )
    }

    #[test]
    fn text_helpers() {
        assert_eq!(spoken_id("cold_brew"), "cold brew");
        assert_eq!(title_case("flat_white"), "Flat White");
        assert_eq!(capitalize("medium"), "Medium");
        assert_eq!(capitalize(""), "");
        assert_eq!(spoken_list(&["Oat"], "or"), "Oat");
        assert_eq!(spoken_list(&["Oat", "Soy"], "or"), "Oat or Soy");
        assert_eq!(
            spoken_list(&["Whole", "Skim", "None"], "or"),
            "Whole, Skim, or None"
        );
    }

    #[test]
    fn item_added_reads_price_and_id() {
        let added = ItemAdded::from(&espresso());

        assert_eq!(
            added.to_string(),
            "Added medium espresso to your order! Price: ₹345. Order ID: item_1"
        );
    }

    #[test]
    fn item_removed_names_the_drink() {
        assert_eq!(
            ItemRemoved(mocha()).to_string(),
            "Removed large mocha from your order."
        );
    }

    #[test]
    fn review_of_empty_cart() {
        let review = OrderReview::new(&[], whole(0, iso::INR), Some("Asha"));

        assert_eq!(review.to_string(), "Your order is currently empty.");
    }

    #[test]
    fn review_lists_items_total_and_name() {
        let items = [espresso(), mocha()];
        let review = OrderReview::new(&items, whole(965, iso::INR), Some("Asha"));

        assert_eq!(
            review.to_string(),
            "Here's your current order:\n\
             - item_1: Medium espresso with oat milk - ₹345\n\
             - item_2: Large mocha with whipped cream, extra shot - ₹620\n\
             \n\
             Total: ₹965\n\
             Name: Asha"
        );
    }

    #[test]
    fn review_omits_missing_name() {
        let items = [espresso()];
        let review = OrderReview::new(&items, whole(345, iso::INR), None);

        assert!(review.to_string().ends_with("Total: ₹345"));
    }

    #[test]
    fn menu_lists_drinks_milks_and_extras() -> TestResult {
        let catalog = Catalog::builtin()?;
        let menu = Menu(&catalog).to_string();

        assert!(menu.starts_with("Here's our menu at Starbucks:\n"));
        assert!(menu.contains("  • Espresso: ₹245 / ₹285 / ₹330\n"));
        assert!(menu.contains("  • Cold Brew: ₹330 / ₹370 / ₹410\n"));
        assert!(menu.contains("  • Whole, Skim, or None - included\n"));
        assert!(menu.contains("  • Oat, Almond, or Soy - add ₹60\n"));
        assert!(menu.contains("  • Extra Shot - add ₹65\n"));
        assert!(menu.contains("  • Chocolate Chips - add ₹60\n"));

        Ok(())
    }

    #[test]
    fn name_set_confirms_name() {
        assert_eq!(
            NameSet("Asha".to_string()).to_string(),
            "Perfect! I have your name as Asha."
        );
    }
}
