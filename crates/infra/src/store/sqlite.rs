//! SQLite-backed record store.
//!
//! One table keyed by part number. The schema is fixed and created on open;
//! there are no migrations.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use stockwatch_core::PartNumber;
use stockwatch_inventory::InventoryRecord;

use super::r#trait::{RecordStore, StoreError};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Record store persisted in a local SQLite database.
///
/// `SqlitePool` is `Send + Sync` and cheap to clone, so this handle is as well.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Open (or create) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("failed to create store directory {parent:?}: {e}"))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %path.display(), "opened sqlite record store");
        Self::from_pool(pool).await
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the pool
    /// is pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the table if needed.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                part_number TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                bin         TEXT NOT NULL,
                quantity    INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_record(row: &SqliteRow) -> Result<InventoryRecord, StoreError> {
    let part_number: String = row.try_get("part_number")?;
    let name: String = row.try_get("name")?;
    let bin: String = row.try_get("bin")?;
    let quantity: i64 = row.try_get("quantity")?;

    let part_number = PartNumber::new(part_number)
        .map_err(|e| StoreError::Corrupt(format!("bad part_number: {e}")))?;
    let quantity = u32::try_from(quantity).map_err(|_| {
        StoreError::Corrupt(format!("{part_number} has invalid quantity {quantity}"))
    })?;

    InventoryRecord::new(part_number, name, bin, quantity)
        .map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait::async_trait]
impl RecordStore for SqliteRecordStore {
    async fn get_all(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT part_number, name, bin, quantity
            FROM inventory
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }

    async fn get(&self, part_number: &PartNumber) -> Result<Option<InventoryRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT part_number, name, bin, quantity
            FROM inventory
            WHERE part_number = ?1
            "#,
        )
        .bind(part_number.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn add(&self, record: &InventoryRecord) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO inventory (part_number, name, bin, quantity)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(part_number) DO NOTHING
            "#,
        )
        .bind(record.part_number().as_str())
        .bind(record.name())
        .bind(record.bin())
        .bind(i64::from(record.quantity()))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, part_number: &PartNumber) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM inventory
            WHERE part_number = ?1
            "#,
        )
        .bind(part_number.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_quantity(
        &self,
        part_number: &PartNumber,
        quantity: u32,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET quantity = ?1
            WHERE part_number = ?2
            "#,
        )
        .bind(i64::from(quantity))
        .bind(part_number.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
