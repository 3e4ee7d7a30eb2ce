//! Brewline
//!
//! Brewline is the order desk behind a voice ordering agent for a coffee shop. It prices drinks
//! against a catalog, keeps one cart per conversation and writes completed orders to disk.

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod items;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod render;
pub mod session;
pub mod tools;
