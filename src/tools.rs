//! Agent tools
//!
//! The six operations exposed to the hosting agent's LLM, with the JSON
//! schemas it needs to call them and a dispatcher that turns a call into
//! either reply text or a tagged [`ToolError`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    clock::Clock,
    items::Size,
    orders::OrderStore,
    session::{OrderError, OrderManager},
};

pub mod adapter;

/// A callable tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Add a drink to the order
    AddItem,

    /// Remove a drink by item identifier
    RemoveItem,

    /// Read back the order with prices
    ReviewOrder,

    /// Read the menu
    ShowMenu,

    /// Record the customer's name
    SetCustomerName,

    /// Save the order and start a new one
    CompleteOrder,
}

impl Tool {
    /// Every tool, in registration order.
    pub const ALL: [Tool; 6] = [
        Tool::AddItem,
        Tool::RemoveItem,
        Tool::ReviewOrder,
        Tool::ShowMenu,
        Tool::SetCustomerName,
        Tool::CompleteOrder,
    ];

    /// Name the LLM calls the tool by
    pub fn name(self) -> &'static str {
        match self {
            Tool::AddItem => "add_item",
            Tool::RemoveItem => "remove_item",
            Tool::ReviewOrder => "review_order",
            Tool::ShowMenu => "show_menu",
            Tool::SetCustomerName => "set_customer_name",
            Tool::CompleteOrder => "complete_order",
        }
    }

    /// Definition to register with the LLM runtime.
    ///
    /// Parameter descriptions enumerate the catalog so the model can only pick listed values.
    pub fn definition(self, catalog: &Catalog) -> ToolDefinition {
        let (description, parameters) = match self {
            Tool::AddItem => (
                "Add a complete item to the order. Call this when you have all details for one drink.",
                add_item_schema(catalog),
            ),
            Tool::RemoveItem => (
                "Remove an item from the order by its order_id. Use review_order first to see the order_ids of all items.",
                json!({
                    "type": "object",
                    "properties": {
                        "order_id": {
                            "type": "string",
                            "description": "The order_id of the item to remove (e.g., 'item_1'). Use review_order to see all order_ids."
                        }
                    },
                    "required": ["order_id"]
                }),
            ),
            Tool::ReviewOrder => (
                "Review the current order with all items and total price. Always call this before asking the customer to confirm their order.",
                no_parameters(),
            ),
            Tool::ShowMenu => (
                "Show the complete menu with prices. Call this when the customer asks what is available or seems unsure about what to order.",
                no_parameters(),
            ),
            Tool::SetCustomerName => (
                "Set or update the customer's name for the order.",
                json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "The customer's name"
                        }
                    },
                    "required": ["name"]
                }),
            ),
            Tool::CompleteOrder => (
                "Complete and save the order. Only call this after at least one item has been added, the customer's name has been collected, the order has been reviewed with review_order and the customer has confirmed it.",
                no_parameters(),
            ),
        };

        ToolDefinition {
            name: self.name(),
            description: description.to_string(),
            parameters,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ToolError::new("unknown_tool", format!("Unknown tool: {s}")))
    }
}

fn no_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

fn add_item_schema(catalog: &Catalog) -> Value {
    let drinks: Vec<&str> = catalog.drink_ids().collect();
    let sizes: Vec<&str> = Size::ALL.iter().map(|size| size.as_str()).collect();

    let milks: Vec<&str> = catalog
        .included_milks()
        .iter()
        .map(String::as_str)
        .chain(catalog.milk_upcharges().iter().map(|charge| charge.id()))
        .collect();

    let extras: Vec<&str> = catalog.extras().iter().map(|charge| charge.id()).collect();

    json!({
        "type": "object",
        "properties": {
            "drink_type": {
                "type": "string",
                "description": format!("The type of drink: {}", drinks.join(", ")),
                "enum": drinks
            },
            "size": {
                "type": "string",
                "description": "The size: small, medium, or large",
                "enum": sizes
            },
            "milk": {
                "type": "string",
                "description": format!("Milk type: {}", milks.join(", "))
            },
            "extras": {
                "type": "array",
                "items": { "type": "string" },
                "description": format!("List of extras like {}", extras.join(", "))
            }
        },
        "required": ["drink_type", "size", "milk"]
    })
}

/// Tool registration for an LLM runtime
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: &'static str,

    /// What the tool does and when to call it
    pub description: String,

    /// JSON schema of the arguments
    pub parameters: Value,
}

/// Definitions for every tool.
pub fn definitions(catalog: &Catalog) -> Vec<ToolDefinition> {
    Tool::ALL
        .into_iter()
        .map(|tool| tool.definition(catalog))
        .collect()
}

/// A failed tool call, relayed to the host as an error rather than reply text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ToolError {
    /// Machine-readable error kind (e.g. `invalid_drink`)
    pub kind: String,

    /// Message to read back to the customer
    pub message: String,
}

impl ToolError {
    /// Create a tool error
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<OrderError> for ToolError {
    fn from(error: OrderError) -> Self {
        ToolError::new(error.kind(), error.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct AddItemArgs {
    drink_type: String,
    size: String,
    milk: String,
    #[serde(default)]
    extras: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RemoveItemArgs {
    order_id: String,
}

#[derive(Debug, Deserialize)]
struct SetCustomerNameArgs {
    name: String,
}

/// Decode tool arguments.
///
/// Some runtimes send arguments as a JSON-encoded string rather than an object.
fn arguments<T: DeserializeOwned>(tool: Tool, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::String(encoded) => serde_json::from_str(&encoded),
        other => serde_json::from_value(other),
    };

    arguments.map_err(|err| {
        ToolError::new(
            "invalid_arguments",
            format!("Invalid arguments for {tool}: {err}"),
        )
    })
}

/// Run a tool call against a session.
///
/// # Errors
///
/// Returns a [`ToolError`] if the arguments cannot be decoded or the operation fails.
pub fn dispatch<S: OrderStore, C: Clock>(
    manager: &mut OrderManager<S, C>,
    tool: Tool,
    args: Value,
) -> Result<String, ToolError> {
    debug!(%tool, "tool called");

    let result = match tool {
        Tool::AddItem => {
            let args: AddItemArgs = arguments(tool, args)?;

            manager
                .add_item(
                    &args.drink_type,
                    &args.size,
                    &args.milk,
                    &args.extras.unwrap_or_default(),
                )
                .map(|added| added.to_string())
        }
        Tool::RemoveItem => {
            let args: RemoveItemArgs = arguments(tool, args)?;

            manager
                .remove_item(&args.order_id)
                .map(|removed| removed.to_string())
        }
        Tool::ReviewOrder => manager.review_order().map(|review| review.to_string()),
        Tool::ShowMenu => Ok(manager.show_menu().to_string()),
        Tool::SetCustomerName => {
            let args: SetCustomerNameArgs = arguments(tool, args)?;

            Ok(manager.set_customer_name(&args.name).to_string())
        }
        Tool::CompleteOrder => manager
            .complete_order()
            .map(|confirmation| confirmation.to_string()),
    };

    result.map_err(|err| {
        warn!(%tool, kind = err.kind(), "tool call failed: {err}");

        ToolError::from(err)
    })
}
