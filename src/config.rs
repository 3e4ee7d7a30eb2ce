//! Configuration
//!
//! Command-line arguments with environment fallbacks. `.env.local` and `.env`
//! are read first when present.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jiff::tz::TimeZone;

use crate::{
    catalog::{Catalog, CatalogError},
    clock::SystemClock,
};

/// Brewline configuration
#[derive(Debug, Parser)]
#[command(
    name = "brewline",
    about = "Coffee order tools for voice ordering agents",
    long_about = None
)]
pub struct Config {
    /// Order storage and pricing settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env files if present (ignore if missing); earlier files win
        _ = dotenvy::from_filename(".env.local");
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Order storage and pricing settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory completed orders are written to
    #[arg(long, env = "ORDERS_DIR", default_value = "orders")]
    pub orders_dir: PathBuf,

    /// YAML price catalog (defaults to the bundled menu)
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog: Option<PathBuf>,

    /// IANA time zone for order identifiers (defaults to the system zone)
    #[arg(long, env = "TZ_NAME")]
    pub time_zone: Option<String>,
}

impl StoreConfig {
    /// Load the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or is invalid.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }

    /// Clock for the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone name is not known to the tz database.
    pub fn clock(&self) -> Result<SystemClock, jiff::Error> {
        match &self.time_zone {
            Some(name) => Ok(SystemClock::with_time_zone(TimeZone::get(name)?)),
            None => Ok(SystemClock::new()),
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one ordering session, reading JSON tool calls from stdin
    Serve,

    /// Print the menu
    Menu,

    /// Print the tool definitions as JSON
    Tools,

    /// Inspect completed orders
    Orders {
        /// Orders action
        #[command(subcommand)]
        command: OrdersCommand,
    },
}

/// Completed-order subcommands
#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List every stored order
    List,

    /// Show one order in full
    Show {
        /// Order identifier, e.g. 20251019_142501
        order_id: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Config::command().debug_assert();
    }

    #[test]
    fn parses_subcommands_and_flags() -> TestResult {
        let config = Config::try_parse_from([
            "brewline",
            "--orders-dir",
            "/tmp/orders",
            "--log-format",
            "json",
            "orders",
            "show",
            "20251019_142501",
        ])?;

        assert_eq!(config.store.orders_dir, PathBuf::from("/tmp/orders"));
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert!(matches!(
            config.command,
            Command::Orders {
                command: OrdersCommand::Show { ref order_id }
            } if order_id == "20251019_142501"
        ));

        Ok(())
    }

    #[test]
    fn missing_catalog_path_uses_builtin() -> TestResult {
        let store = StoreConfig {
            orders_dir: PathBuf::from("orders"),
            catalog: None,
            time_zone: None,
        };
        assert_eq!(store.load_catalog()?.name(), "Starbucks");

        Ok(())
    }

    #[test]
    fn unknown_time_zone_is_an_error() {
        let store = StoreConfig {
            orders_dir: PathBuf::from("orders"),
            catalog: None,
            time_zone: Some("Mars/Olympus_Mons".to_string()),
        };

        assert!(store.clock().is_err());
    }
}
