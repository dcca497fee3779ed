//! `stockwatch-client`
//!
//! **Responsibility:** the inventory screen's logic without the screen.
//!
//! This crate provides:
//! - The inventory controller (store writes, in-memory list, low-stock alerts)
//! - The list-display boundary and a console implementation
//! - Environment configuration and wiring for the `stockwatch` binary

pub mod app;
pub mod commands;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod types;

pub use config::{ClientConfig, StoreLocation};
pub use controller::InventoryController;
pub use display::{ConsoleDisplay, ListDisplay};
pub use error::ControllerError;
pub use types::{AlertOutcome, Severity, UserMessage};
