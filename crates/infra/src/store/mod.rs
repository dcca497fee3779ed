//! Inventory record store boundary.
//!
//! Durable, keyed storage of inventory records. The controller keeps an
//! in-memory copy; the store is the authority.

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryRecordStore;
pub use r#trait::{RecordStore, StoreError};
pub use sqlite::SqliteRecordStore;
