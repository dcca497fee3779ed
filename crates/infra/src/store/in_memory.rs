use std::sync::RwLock;

use stockwatch_core::{Entity, PartNumber};
use stockwatch_inventory::InventoryRecord;

use super::r#trait::{RecordStore, StoreError};

/// In-memory record store.
///
/// Intended for tests/dev. Keeps records in a `Vec` so that insertion order
/// is the natural order.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<InventoryRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = InventoryRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.records.write() {
            for record in records {
                if !guard.iter().any(|r| r.is_identified_by(record.id())) {
                    guard.push(record);
                }
            }
        }
        store
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get_all(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.clone())
    }

    async fn get(&self, part_number: &PartNumber) -> Result<Option<InventoryRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records
            .iter()
            .find(|r| r.is_identified_by(part_number))
            .cloned())
    }

    async fn add(&self, record: &InventoryRecord) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        if records.iter().any(|r| r.is_identified_by(record.id())) {
            return Ok(false);
        }
        records.push(record.clone());
        Ok(true)
    }

    async fn delete(&self, part_number: &PartNumber) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        match records.iter().position(|r| r.is_identified_by(part_number)) {
            Some(idx) => {
                records.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_quantity(
        &self,
        part_number: &PartNumber,
        quantity: u32,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        match records.iter_mut().find(|r| r.is_identified_by(part_number)) {
            Some(record) => {
                record.set_quantity(quantity);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pn(s: &str) -> PartNumber {
        PartNumber::new(s).unwrap()
    }

    fn rec(part: &str, quantity: u32) -> InventoryRecord {
        InventoryRecord::new(pn(part), format!("Part {part}"), "A1", quantity).unwrap()
    }

    #[tokio::test]
    async fn add_then_get_all_contains_exactly_one() {
        let store = InMemoryRecordStore::new();
        let r = rec("P100", 5);

        assert!(store.add(&r).await.unwrap());
        assert!(!store.add(&rec("P100", 9)).await.unwrap());

        let all = store.get_all().await.unwrap();
        assert_eq!(all, vec![r]);
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let store = InMemoryRecordStore::new();
        for part in ["Z9", "A1", "M5"] {
            store.add(&rec(part, 1)).await.unwrap();
        }
        let order: Vec<_> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.part_number().to_string())
            .collect();
        assert_eq!(order, ["Z9", "A1", "M5"]);
    }

    #[tokio::test]
    async fn delete_missing_key_is_a_no_op() {
        let store = InMemoryRecordStore::with_records([rec("P1", 1)]);
        assert!(!store.delete(&pn("P2")).await.unwrap());
        assert_eq!(store.get_all().await.unwrap().len(), 1);

        assert!(store.delete(&pn("P1")).await.unwrap());
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_quantity_overwrites_existing_only() {
        let store = InMemoryRecordStore::with_records([rec("P1", 4)]);
        assert!(store.update_quantity(&pn("P1"), 0).await.unwrap());
        assert_eq!(store.get(&pn("P1")).await.unwrap().unwrap().quantity(), 0);
        assert!(!store.update_quantity(&pn("nope"), 3).await.unwrap());
    }

    #[test]
    fn with_records_skips_duplicates() {
        let store = InMemoryRecordStore::with_records([rec("P1", 1), rec("P1", 2)]);
        let rt = tokio::runtime::Runtime::new().unwrap();
        let all = rt.block_on(store.get_all()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].quantity(), 1);
    }
}
