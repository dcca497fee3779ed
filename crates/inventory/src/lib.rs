//! Inventory domain module.
//!
//! This crate contains business rules for inventory records, implemented purely
//! as deterministic domain logic (no IO, no storage, no transport).

pub mod intent;
pub mod policy;
pub mod record;

pub use intent::InventoryIntent;
pub use policy::{DEFAULT_THRESHOLD, LowStockPolicy, alert_message, should_alert};
pub use record::{InventoryRecord, NewRecord};
