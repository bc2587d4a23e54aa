//! redb-based persistence for the report collections
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `reports` | `"dailyReport"` / `"monthlyReport"` | JSON bucket array | Full report snapshot |
//!
//! # Atomicity
//!
//! Both keys are written (or removed) inside one write transaction, so the
//! stored daily and monthly collections always reflect the same saves.

use redb::{Database, ReadableDatabase, TableDefinition};
use shared::report::ReportKind;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::aggregator::ReportStore;
use super::codec::{DecodeError, decode_buckets, encode_buckets};

/// Table for report snapshots: key = storage key, value = JSON-serialized bucket array
const REPORTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("reports");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Result of reading the persisted snapshot
///
/// A collection that failed to decode is left empty and reported in
/// `rejected`; loading itself still succeeds.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub store: ReportStore,
    pub rejected: Vec<(ReportKind, DecodeError)>,
}

/// Report storage backed by redb
#[derive(Clone)]
pub struct ReportStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for ReportStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStorage")
            .field("db", &"<redb::Database>")
            .finish()
    }
}

impl ReportStorage {
    /// Open or create the database at the given path
    ///
    /// Parent directories are created as needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open_with_backend(redb::backends::InMemoryBackend::new())
    }

    #[cfg(test)]
    pub(crate) fn open_with_backend(backend: impl redb::StorageBackend) -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(backend)?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create the table if it doesn't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(REPORTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Raw stored bytes for one collection
    pub fn raw(&self, kind: ReportKind) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REPORTS_TABLE)?;
        Ok(table.get(kind.storage_key())?.map(|v| v.value().to_vec()))
    }

    /// Read both collections
    ///
    /// Missing keys yield empty collections. Malformed values are rejected
    /// per collection and logged; they never fail the load.
    pub fn load(&self) -> StorageResult<LoadOutcome> {
        let mut outcome = LoadOutcome::default();

        for kind in ReportKind::ALL {
            let Some(bytes) = self.raw(kind)? else {
                continue;
            };
            match decode_buckets(&bytes) {
                Ok(buckets) => *outcome.store.buckets_mut(kind) = buckets,
                Err(e) => {
                    tracing::warn!(
                        report = kind.label(),
                        key = kind.storage_key(),
                        error = %e,
                        "Stored report is malformed, starting with an empty collection"
                    );
                    outcome.rejected.push((kind, e));
                }
            }
        }

        tracing::debug!(
            daily_buckets = outcome.store.daily.len(),
            monthly_buckets = outcome.store.monthly.len(),
            "Reports loaded"
        );
        Ok(outcome)
    }

    /// Overwrite both collections with a full snapshot
    pub fn save(&self, store: &ReportStore) -> StorageResult<()> {
        let daily = encode_buckets(&store.daily)?;
        let monthly = encode_buckets(&store.monthly)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(REPORTS_TABLE)?;
            table.insert(ReportKind::Daily.storage_key(), daily.as_slice())?;
            table.insert(ReportKind::Monthly.storage_key(), monthly.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Erase both collections
    pub fn clear(&self) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(REPORTS_TABLE)?;
            for kind in ReportKind::ALL {
                table.remove(kind.storage_key())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Write raw bytes under a collection key
    ///
    /// Used to import snapshots produced elsewhere; the bytes are not checked
    /// here, `load` validates them.
    pub fn put_raw(&self, kind: ReportKind, bytes: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(REPORTS_TABLE)?;
            table.insert(kind.storage_key(), bytes)?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// In-memory redb backend whose writes can be switched off
///
/// Clones share the same bytes, so a database can be reopened over what the
/// previous handle left behind.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct SwitchableBackend {
    inner: Arc<redb::backends::InMemoryBackend>,
    fail_writes: Arc<std::sync::atomic::AtomicBool>,
}

#[cfg(test)]
impl SwitchableBackend {
    pub(crate) fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), std::io::Error> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(std::io::Error::other("disk unavailable"));
        }
        Ok(())
    }
}

#[cfg(test)]
impl redb::StorageBackend for SwitchableBackend {
    fn len(&self) -> Result<u64, std::io::Error> {
        redb::StorageBackend::len(&*self.inner)
    }

    fn read(&self, offset: u64, out: &mut [u8]) -> Result<(), std::io::Error> {
        redb::StorageBackend::read(&*self.inner, offset, out)
    }

    fn set_len(&self, len: u64) -> Result<(), std::io::Error> {
        self.check_writable()?;
        redb::StorageBackend::set_len(&*self.inner, len)
    }

    fn sync_data(&self) -> Result<(), std::io::Error> {
        self.check_writable()?;
        redb::StorageBackend::sync_data(&*self.inner)
    }

    fn write(&self, offset: u64, data: &[u8]) -> Result<(), std::io::Error> {
        self.check_writable()?;
        redb::StorageBackend::write(&*self.inner, offset, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PeriodKeys;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::order::LineItem;

    fn sample_store() -> ReportStore {
        let keys = PeriodKeys::for_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let mut store = ReportStore::new();
        store.merge(
            &keys,
            &[
                LineItem::new("Tea", Decimal::from(10)),
                LineItem::new("Momo", "120.50".parse().unwrap()),
            ],
        )
        .unwrap();
        store
    }

    #[test]
    fn test_load_empty_database() {
        let storage = ReportStorage::open_in_memory().unwrap();
        let outcome = storage.load().unwrap();
        assert!(outcome.store.is_empty());
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = ReportStorage::open_in_memory().unwrap();
        let store = sample_store();
        storage.save(&store).unwrap();

        let outcome = storage.load().unwrap();
        assert_eq!(outcome.store, store);
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let storage = ReportStorage::open_in_memory().unwrap();
        storage.save(&sample_store()).unwrap();
        storage.save(&ReportStore::new()).unwrap();

        assert_eq!(storage.raw(ReportKind::Daily).unwrap().unwrap(), b"[]");
        assert!(storage.load().unwrap().store.is_empty());
    }

    #[test]
    fn test_clear_removes_keys() {
        let storage = ReportStorage::open_in_memory().unwrap();
        storage.save(&sample_store()).unwrap();
        storage.clear().unwrap();

        assert!(storage.raw(ReportKind::Daily).unwrap().is_none());
        assert!(storage.raw(ReportKind::Monthly).unwrap().is_none());
        assert!(storage.load().unwrap().store.is_empty());
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let backend = SwitchableBackend::default();
        let storage = ReportStorage::open_with_backend(backend.clone()).unwrap();
        storage.save(&sample_store()).unwrap();
        let daily_before = storage.raw(ReportKind::Daily).unwrap();

        backend.set_failing(true);
        assert!(storage.save(&ReportStore::new()).is_err());
        drop(storage);

        backend.set_failing(false);
        let reopened = ReportStorage::open_with_backend(backend).unwrap();
        assert_eq!(reopened.raw(ReportKind::Daily).unwrap(), daily_before);
        assert_eq!(reopened.load().unwrap().store, sample_store());
    }

    #[test]
    fn test_malformed_collection_fails_soft() {
        let storage = ReportStorage::open_in_memory().unwrap();
        storage.save(&sample_store()).unwrap();
        storage.put_raw(ReportKind::Daily, b"{broken").unwrap();

        let outcome = storage.load().unwrap();
        assert!(outcome.store.daily.is_empty());
        // the other collection is unaffected
        assert_eq!(outcome.store.monthly, sample_store().monthly);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].0, ReportKind::Daily);
    }
}
