//! Brewline command line

use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::Context;
use tracing::info;

use brewline::{
    config::{Command, Config, OrdersCommand},
    observability,
    orders::{FileOrderStore, OrderId},
    render::table,
    session::OrderManager,
    tools::{adapter, definitions},
};

fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    observability::init(&config.logging)?;

    let catalog = Arc::new(
        config
            .store
            .load_catalog()
            .context("failed to load the price catalog")?,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Serve => {
            let store = FileOrderStore::open(config.store.orders_dir.clone())
                .context("failed to open the orders directory")?;
            let clock = config.store.clock().context("unknown time zone")?;

            info!(
                shop = catalog.name(),
                orders_dir = %store.dir().display(),
                "ready for orders"
            );

            let mut manager = OrderManager::new(catalog, store, clock);

            adapter::serve(&mut manager, io::stdin().lock(), &mut out)?;
        }
        Command::Menu => table::write_menu(&mut out, &catalog)?,
        Command::Tools => {
            serde_json::to_writer_pretty(&mut out, &definitions(&catalog))?;
            writeln!(out)?;
        }
        Command::Orders { command } => {
            let store = FileOrderStore::open(config.store.orders_dir.clone())
                .context("failed to open the orders directory")?;

            match command {
                OrdersCommand::List => table::write_orders(&mut out, &store.list()?)?,
                OrdersCommand::Show { order_id } => {
                    let order = store.load(&OrderId::from(order_id.as_str()))?;

                    table::write_order(&mut out, &order)?;
                }
            }
        }
    }

    Ok(())
}
