use std::sync::Arc;

use thiserror::Error;

use stockwatch_core::PartNumber;
use stockwatch_inventory::InventoryRecord;

/// Record store operation error.
///
/// These are **infrastructure errors** (storage, corruption) as opposed to
/// domain errors (validation, duplicates, missing keys). Missing and duplicate
/// keys are reported through the `bool` results of the store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    #[error("store io failure: {0}")]
    Io(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Keyed storage of inventory records.
///
/// ## Semantics
///
/// - `get_all()` returns records in insertion order.
/// - `add()` returns `false` (and writes nothing) when the part number exists.
/// - `delete()` / `update_quantity()` return `false` when the part number is absent.
///
/// `update_quantity()` does not apply any business rule; callers decide the
/// new quantity.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<InventoryRecord>, StoreError>;

    async fn get(&self, part_number: &PartNumber) -> Result<Option<InventoryRecord>, StoreError>;

    async fn add(&self, record: &InventoryRecord) -> Result<bool, StoreError>;

    async fn delete(&self, part_number: &PartNumber) -> Result<bool, StoreError>;

    async fn update_quantity(
        &self,
        part_number: &PartNumber,
        quantity: u32,
    ) -> Result<bool, StoreError>;
}

#[async_trait::async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        (**self).get_all().await
    }

    async fn get(&self, part_number: &PartNumber) -> Result<Option<InventoryRecord>, StoreError> {
        (**self).get(part_number).await
    }

    async fn add(&self, record: &InventoryRecord) -> Result<bool, StoreError> {
        (**self).add(record).await
    }

    async fn delete(&self, part_number: &PartNumber) -> Result<bool, StoreError> {
        (**self).delete(part_number).await
    }

    async fn update_quantity(
        &self,
        part_number: &PartNumber,
        quantity: u32,
    ) -> Result<bool, StoreError> {
        (**self).update_quantity(part_number, quantity).await
    }
}
