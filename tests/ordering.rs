//! End-to-end ordering sessions against a file-backed order store.
//!
//! An espresso (medium, oat) at ₹345 and a mocha (large, whole milk, whipped cream, extra
//! shot) at ₹620 make a ₹965 order. Completing it writes one JSON document named after the
//! completion second and leaves the session ready for the next customer.

use std::{fs, sync::Arc};

use jiff::{
    civil::date,
    tz::{self, TimeZone},
};
use serde_json::{Value, json};
use tempfile::tempdir;
use testresult::TestResult;

use brewline::{
    cart::CartState,
    catalog::Catalog,
    clock::FixedClock,
    orders::{FileOrderStore, OrderId},
    session::{OrderError, OrderManager},
    tools::{Tool, adapter, dispatch},
};

fn clock_at(hour: i8, minute: i8, second: i8) -> TestResult<FixedClock> {
    let at = date(2025, 10, 19)
        .at(hour, minute, second, 0)
        .to_zoned(TimeZone::fixed(tz::offset(5)))?;

    Ok(FixedClock::new(at))
}

#[test]
fn two_drink_order_is_written_and_session_resets() -> TestResult {
    let dir = tempdir()?;
    let mut manager = OrderManager::new(
        Arc::new(Catalog::builtin()?),
        FileOrderStore::open(dir.path())?,
        clock_at(14, 25, 1)?,
    );

    let espresso = manager.add_item("espresso", "medium", "oat", &[])?;
    assert_eq!(
        espresso.to_string(),
        "Added medium espresso to your order! Price: ₹345. Order ID: item_1"
    );

    let toppings = vec!["whipped_cream".to_string(), "extra_shot".to_string()];
    let mocha = manager.add_item("mocha", "large", "whole", &toppings)?;
    assert_eq!(
        mocha.to_string(),
        "Added large mocha to your order! Price: ₹620. Order ID: item_2"
    );

    assert_eq!(manager.state(), CartState::HasItems);

    manager.set_customer_name("Asha");
    assert_eq!(manager.state(), CartState::ReadyForReview);

    let review = manager.review_order()?.to_string();
    assert!(review.contains("Total: ₹965"), "{review}");
    assert!(review.ends_with("Name: Asha"), "{review}");

    let confirmation = manager.complete_order()?;
    assert_eq!(
        confirmation.to_string(),
        "Order completed! Order ID: 20251019_142501. Total: ₹965. \
         Your 2 item(s) will be ready shortly, Asha! Thank you for choosing Starbucks!"
    );

    let path = dir.path().join("order_20251019_142501.json");
    assert_eq!(confirmation.path, path);

    let document: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(document["orderId"], "20251019_142501");
    assert_eq!(document["customerName"], "Asha");
    assert_eq!(document["itemCount"], 2);
    assert_eq!(document["total"], json!(965.0));
    assert_eq!(
        document["timestamp"]
            .as_str()
            .ok_or("timestamp is not a string")?,
        "2025-10-19T14:25:01+05:00"
    );
    assert_eq!(
        document["items"][1],
        json!({
            "order_id": "item_2",
            "drink_type": "mocha",
            "size": "large",
            "milk": "whole",
            "extras": ["whipped_cream", "extra_shot"],
            "price": 620.0
        })
    );

    assert_eq!(manager.state(), CartState::Empty);
    assert!(manager.cart().customer_name().is_none());

    let next = manager.add_item("latte", "small", "none", &[])?;
    assert_eq!(next.id.to_string(), "item_1");

    Ok(())
}

#[test]
fn completion_requires_items_and_a_name() -> TestResult {
    let dir = tempdir()?;
    let mut manager = OrderManager::new(
        Arc::new(Catalog::builtin()?),
        FileOrderStore::open(dir.path())?,
        clock_at(9, 0, 0)?,
    );

    let empty = manager.complete_order().err().ok_or("expected an error")?;
    assert!(matches!(empty, OrderError::EmptyOrder));

    manager.add_item("americano", "large", "none", &[])?;

    let nameless = manager.complete_order().err().ok_or("expected an error")?;
    assert!(matches!(nameless, OrderError::MissingCustomerName));

    manager.set_customer_name("");
    let blank = manager.complete_order().err().ok_or("expected an error")?;
    assert!(matches!(blank, OrderError::MissingCustomerName));

    assert_eq!(manager.cart().len(), 1);
    assert_eq!(fs::read_dir(dir.path())?.count(), 0);

    Ok(())
}

#[test]
fn stored_orders_can_be_listed_and_loaded() -> TestResult {
    let dir = tempdir()?;
    let catalog = Arc::new(Catalog::builtin()?);

    for (second, name) in [(30, "Ravi"), (10, "Meera")] {
        let mut manager = OrderManager::new(
            Arc::clone(&catalog),
            FileOrderStore::open(dir.path())?,
            clock_at(11, 0, second)?,
        );

        manager.add_item("cappuccino", "small", "almond", &[])?;
        manager.set_customer_name(name);
        manager.complete_order()?;
    }

    let store = FileOrderStore::open(dir.path())?;
    let orders = store.list()?;

    let names = orders
        .iter()
        .map(|order| order.customer_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Meera", "Ravi"]);

    let ravi = store.load(&OrderId::from("20251019_110030"))?;
    assert_eq!(ravi.items.len(), 1);
    assert_eq!(ravi.total, rust_decimal::Decimal::new(410, 0));

    Ok(())
}

#[test]
fn custom_catalog_prices_orders() -> TestResult {
    let dir = tempdir()?;
    let catalog_path = dir.path().join("menu.yml");
    fs::write(
        &catalog_path,
        r#"
name: Corner Cafe
currency: INR
drinks:
  - id: Chai Latte
    small: "180 INR"
    medium: "210 INR"
    large: "240 INR"
milk:
  included: [whole]
  upcharges:
    - id: oat
      price: "40 INR"
extras:
  - id: cinnamon
    price: "20 INR"
"#,
    )?;

    let mut manager = OrderManager::new(
        Arc::new(Catalog::from_path(&catalog_path)?),
        FileOrderStore::open(dir.path().join("orders"))?,
        clock_at(8, 30, 0)?,
    );

    let added = manager.add_item("chai latte", "large", "oat", &["cinnamon".to_string()])?;
    assert_eq!(added.price.to_minor_units(), 30_000);

    let err = manager
        .add_item("espresso", "small", "none", &[])
        .err()
        .ok_or("expected an error")?;
    assert_eq!(
        err.to_string(),
        "Sorry, we don't have espresso. Available drinks: chai_latte"
    );

    manager.set_customer_name("Ira");
    let confirmation = manager.complete_order()?;
    assert!(
        confirmation
            .to_string()
            .ends_with("Thank you for choosing Corner Cafe!")
    );

    Ok(())
}

#[test]
fn tool_calls_drive_a_session() -> TestResult {
    let dir = tempdir()?;
    let mut manager = OrderManager::new(
        Arc::new(Catalog::builtin()?),
        FileOrderStore::open(dir.path())?,
        clock_at(16, 45, 12)?,
    );

    let menu = dispatch(&mut manager, Tool::ShowMenu, Value::Null)?;
    assert!(menu.contains("SPECIALTY DRINKS"));

    let input = [
        json!({"id": 1, "name": "add_item", "arguments": {"drink_type": "flat white", "size": "small", "milk": "skim", "extras": ["vanilla syrup"]}}),
        json!({"id": 2, "name": "remove_item", "arguments": {"order_id": "item_1"}}),
        json!({"id": 3, "name": "review_order", "arguments": {}}),
        json!({"id": 4, "name": "set_customer_name", "arguments": {"name": "Dev"}}),
        json!({"id": 5, "name": "complete_order", "arguments": {}}),
    ]
    .iter()
    .map(Value::to_string)
    .collect::<Vec<_>>()
    .join("\n");

    let mut output = Vec::new();
    adapter::serve(&mut manager, input.as_bytes(), &mut output)?;

    let responses = String::from_utf8(output)?
        .lines()
        .map(serde_json::from_str::<Value>)
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(
        responses,
        [
            json!({"id": 1, "ok": true, "output": "Added small flat white to your order! Price: ₹420. Order ID: item_1"}),
            json!({"id": 2, "ok": true, "output": "Removed small flat white from your order."}),
            json!({"id": 3, "ok": true, "output": "Your order is currently empty."}),
            json!({"id": 4, "ok": true, "output": "Perfect! I have your name as Dev."}),
            json!({
                "id": 5,
                "ok": false,
                "error": {
                    "kind": "empty_order",
                    "message": "Cannot complete order - no items in the order. Please add items first."
                }
            }),
        ]
    );
    assert_eq!(fs::read_dir(dir.path())?.count(), 0);

    Ok(())
}
