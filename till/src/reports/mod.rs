//! Daily / monthly reports
//!
//! - **aggregator**: merges flushed table rows into period buckets
//! - **codec**: JSON encoding and schema-checked decoding of bucket arrays
//! - **storage**: redb persistence of the full snapshot
//! - **export**: the downloadable `{ daily, monthly }` document
//!
//! ```text
//! table rows → ReportStore::merge (daily + monthly) → ReportStorage::save (one txn)
//! ```

pub mod aggregator;
pub mod codec;
pub mod export;
pub mod storage;

pub use aggregator::{MergeError, ReportStore, merge_into};
pub use codec::DecodeError;
pub use export::ExportError;
pub use storage::{LoadOutcome, ReportStorage, StorageError, StorageResult};
