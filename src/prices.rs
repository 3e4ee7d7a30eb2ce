//! Prices

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

/// A catalog or order price.
///
/// Currencies come from the static ISO table, so prices never borrow from anything shorter lived.
pub type Price = Money<'static, Currency>;

/// Creates a price from a whole number of major units (e.g. rupees).
pub fn whole(amount: i64, currency: &'static Currency) -> Price {
    Money::from_decimal(Decimal::from(amount), currency)
}

/// Zero in the given currency.
pub fn zero(currency: &'static Currency) -> Price {
    Money::from_minor(0, currency)
}

/// Rounds a price to two decimal places, the precision persisted in order documents.
pub fn to_cents(price: &Price) -> Decimal {
    price.amount().round_dp(2)
}

/// Formats a price the way it is read aloud: currency symbol and whole units, e.g. `₹345`.
pub fn spoken(price: &Price) -> String {
    format!("{}{}", price.currency().symbol, price.amount().round_dp(0))
}
