//! Line-delimited JSON transport between the hosting agent and a session.
//!
//! Each input line is one tool invocation; each output line is its result.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    orders::OrderStore,
    session::OrderManager,
    tools::{Tool, ToolError, dispatch},
};

/// A tool call from the host
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInvocation {
    /// Correlation identifier echoed in the response
    #[serde(default)]
    pub id: Option<Value>,

    /// Tool name
    pub name: String,

    /// Tool arguments, as an object or a JSON-encoded string
    #[serde(default)]
    pub arguments: Value,
}

/// Result of a tool call, sent back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    /// Correlation identifier from the invocation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Whether the call succeeded
    pub ok: bool,

    /// Reply text on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Error on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResponse {
    fn from_result(id: Option<Value>, result: Result<String, ToolError>) -> Self {
        match result {
            Ok(output) => Self {
                id,
                ok: true,
                output: Some(output),
                error: None,
            },
            Err(error) => Self {
                id,
                ok: false,
                output: None,
                error: Some(error),
            },
        }
    }
}

/// Handle a single invocation line.
pub fn handle_line<S: OrderStore, C: Clock>(
    manager: &mut OrderManager<S, C>,
    line: &str,
) -> ToolResponse {
    let invocation = match serde_json::from_str::<ToolInvocation>(line) {
        Ok(invocation) => invocation,
        Err(err) => {
            warn!("unparseable tool invocation: {err}");

            return ToolResponse::from_result(
                None,
                Err(ToolError::new(
                    "invalid_request",
                    format!("Invalid tool invocation: {err}"),
                )),
            );
        }
    };

    let result = match invocation.name.parse::<Tool>() {
        Ok(tool) => dispatch(manager, tool, invocation.arguments),
        Err(err) => {
            warn!(name = %invocation.name, "unknown tool");

            Err(err)
        }
    };

    ToolResponse::from_result(invocation.id, result)
}

/// Serve tool calls until the input closes.
///
/// # Errors
///
/// Returns an error if reading input or writing a response fails.
pub fn serve<S: OrderStore, C: Clock>(
    manager: &mut OrderManager<S, C>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    info!("session started");

    for line in input.lines() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(manager, &line);

        if let Some(err) = &response.error {
            debug!(kind = %err.kind, "responding with tool error");
        }

        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }

    info!("session ended");

    Ok(())
}
