//! Terminal tables for the menu and stored orders.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    catalog::Catalog,
    items::Size,
    orders::CompletedOrder,
    prices::spoken,
    render::title_case,
};

/// Write the catalog as drink and add-on tables.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_menu(mut out: impl io::Write, catalog: &Catalog) -> io::Result<()> {
    let mut drinks = Builder::default();
    drinks.push_record(["Drink", "Small", "Medium", "Large"]);

    for drink in catalog.drinks() {
        let mut row = vec![title_case(drink.id())];
        row.extend(Size::ALL.iter().map(|&size| spoken(drink.price(size))));

        drinks.push_record(row);
    }

    let mut add_ons = Builder::default();
    add_ons.push_record(["Add-on", "Kind", "Price"]);

    for milk in catalog.included_milks() {
        add_ons.push_record([title_case(milk), "milk".to_string(), "included".to_string()]);
    }

    for charge in catalog.milk_upcharges() {
        add_ons.push_record([
            title_case(charge.id()),
            "milk".to_string(),
            spoken(charge.price()),
        ]);
    }

    for charge in catalog.extras() {
        add_ons.push_record([
            title_case(charge.id()),
            "extra".to_string(),
            spoken(charge.price()),
        ]);
    }

    writeln!(out, "{}\n", catalog.name())?;
    writeln!(out, "{}\n", styled(drinks, 1..4))?;
    writeln!(out, "{}", styled(add_ons, 2..3))
}

/// Write a one-line-per-order summary of stored orders.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_orders(mut out: impl io::Write, orders: &[CompletedOrder]) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "No orders yet.");
    }

    let mut builder = Builder::default();
    builder.push_record(["Order", "Completed", "Customer", "Items", "Total"]);

    for order in orders {
        builder.push_record([
            order.order_id.to_string(),
            order.timestamp.clone(),
            order.customer_name.clone(),
            order.item_count.to_string(),
            cents(order.total),
        ]);
    }

    writeln!(out, "{}", styled(builder, 3..5))
}

/// Write every line of one stored order with its total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_order(mut out: impl io::Write, order: &CompletedOrder) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Item", "Drink", "Size", "Milk", "Extras", "Price"]);

    for line in &order.items {
        builder.push_record([
            line.order_id.clone(),
            title_case(&line.drink_type),
            line.size.clone(),
            line.milk.clone(),
            line.extras.join(", "),
            cents(line.price),
        ]);
    }

    builder.push_record([
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        "Total".to_string(),
        cents(order.total),
    ]);

    writeln!(
        out,
        "Order {} for {} ({})\n",
        order.order_id, order.customer_name, order.timestamp
    )?;
    writeln!(out, "{}", styled(builder, 5..6))
}

fn styled(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());

    table.to_string()
}

fn cents(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::orders::{OrderId, OrderLine};

    use super::*;

    fn order() -> CompletedOrder {
        CompletedOrder {
            order_id: OrderId::from("20251019_142501"),
            timestamp: "2025-10-19T14:25:01+05:30".to_string(),
            customer_name: "Asha".to_string(),
            items: vec![OrderLine {
                order_id: "item_1".to_string(),
                drink_type: "cold_brew".to_string(),
                size: "large".to_string(),
                milk: "oat".to_string(),
                extras: vec!["vanilla_syrup".to_string()],
                price: Decimal::new(520, 0),
            }],
            total: Decimal::new(520, 0),
            item_count: 1,
        }
    }

    #[test]
    fn menu_table_lists_every_drink() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut out = Vec::new();

        write_menu(&mut out, &catalog)?;

        let text = String::from_utf8(out)?;
        for drink in catalog.drinks() {
            assert!(text.contains(&title_case(drink.id())), "{}", drink.id());
        }
        assert!(text.contains("₹495"));
        assert!(text.contains("included"));

        Ok(())
    }

    #[test]
    fn orders_table_handles_no_orders() -> TestResult {
        let mut out = Vec::new();

        write_orders(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "No orders yet.\n");

        Ok(())
    }

    #[test]
    fn order_table_shows_lines_and_total() -> TestResult {
        let mut out = Vec::new();

        write_order(&mut out, &order())?;

        let text = String::from_utf8(out)?;
        assert!(text.starts_with("Order 20251019_142501 for Asha"));
        assert!(text.contains("Cold Brew"));
        assert!(text.contains("vanilla_syrup"));
        assert!(text.contains("520.00"));

        Ok(())
    }
}
