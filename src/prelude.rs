//! Brewline prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartState},
    catalog::{Catalog, CatalogError, Charge, Drink},
    clock::{Clock, FixedClock, SystemClock},
    items::{ItemId, OrderItem, Size},
    orders::{CompletedOrder, FileOrderStore, OrderId, OrderLine, OrderStore, StoreError},
    prices::Price,
    pricing::{TotalPriceError, calculate_price, total_price},
    session::{OrderError, OrderManager},
    tools::{Tool, ToolDefinition, ToolError, dispatch},
};
