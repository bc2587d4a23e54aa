//! TillManager - the single controller of the till
//!
//! Owns the in-progress order, the table ledgers, the in-memory reports and
//! the report storage. Every user action goes through one `&mut self` call
//! that runs to completion.
//!
//! # Save Flow
//!
//! ```text
//! save_and_clear_table(id)
//!     ├─ 1. Read ledger rows (EmptyTable if none)
//!     ├─ 2. Compute daily / monthly period keys (business timezone)
//!     ├─ 3. Merge rows into a copy of the reports (daily + monthly)
//!     ├─ 4. Persist the full snapshot (one redb transaction)
//!     ├─ 5. Swap the merged copy in
//!     ├─ 6. Flush the table ledger
//!     └─ 7. Deselect the table
//! ```
//!
//! A failed write stops at step 4 and leaves reports and ledger untouched.

mod error;
pub use error::*;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::order::LineItem;
use shared::report::{ReportKind, ReportRow, ReportSnapshot};
use std::path::{Path, PathBuf};

use crate::core::Config;
use crate::orders::{OrderBuilder, OrderError, TableLedger, TableLedgers};
use crate::reports::{ReportStorage, ReportStore, export};
use crate::utils::PeriodKeys;

/// Order summary for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub table_id: Option<String>,
    pub lines: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
}

/// Outcome of a successful table save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSummary {
    pub table_id: String,
    pub keys: PeriodKeys,
    pub rows: usize,
    pub total: Decimal,
}

pub struct TillManager {
    storage: ReportStorage,
    builder: OrderBuilder,
    ledgers: TableLedgers,
    reports: ReportStore,
    /// 业务时区
    tz: Tz,
    /// Problems found while loading, shown to the operator once
    notices: Vec<AppError>,
}

impl std::fmt::Debug for TillManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TillManager")
            .field("storage", &self.storage)
            .field("active_table", &self.builder.active_table())
            .field("tables", &self.ledgers.tables().len())
            .field("tz", &self.tz)
            .finish()
    }
}

impl TillManager {
    /// Open the report database named by `config` and load the reports
    pub fn open(config: &Config) -> ManagerResult<Self> {
        let storage = ReportStorage::open(config.report_db_path())?;
        Self::from_storage(storage, config)
    }

    /// Build a manager over existing storage
    ///
    /// Malformed stored collections do not fail startup; they start empty and
    /// are reported through [`TillManager::startup_notices`].
    pub fn from_storage(storage: ReportStorage, config: &Config) -> ManagerResult<Self> {
        let outcome = storage.load()?;
        let notices = outcome
            .rejected
            .iter()
            .map(|(kind, e)| {
                AppError::with_message(
                    ErrorCode::SnapshotCorrupted,
                    format!("Stored {} report was unreadable and has been reset", kind.label()),
                )
                .with_detail("key", kind.storage_key())
                .with_detail("reason", e.to_string())
            })
            .collect();

        let ledgers = TableLedgers::with_tables(config.max_tables, config.initial_tables);
        tracing::info!(
            tables = ledgers.tables().len(),
            max_tables = ledgers.max_tables(),
            daily_buckets = outcome.store.daily.len(),
            monthly_buckets = outcome.store.monthly.len(),
            timezone = %config.timezone,
            "TillManager started"
        );

        Ok(Self {
            storage,
            builder: OrderBuilder::new(),
            ledgers,
            reports: outcome.store,
            tz: config.timezone,
            notices,
        })
    }

    pub fn startup_notices(&self) -> &[AppError] {
        &self.notices
    }

    // ========== Tables ==========

    /// Create the next table
    pub fn add_table(&mut self) -> ManagerResult<String> {
        let id = self.ledgers.add_table()?;
        tracing::info!(table_id = %id, "Table added");
        Ok(id)
    }

    pub fn tables(&self) -> &[TableLedger] {
        self.ledgers.tables()
    }

    pub fn active_table(&self) -> Option<&str> {
        self.builder.active_table()
    }

    /// Make `table_id` the active table
    pub fn select_table(&mut self, table_id: &str) -> ManagerResult<()> {
        if !self.ledgers.contains(table_id) {
            return Err(OrderError::UnknownTable(table_id.to_string()).into());
        }
        self.builder.select_table(table_id);
        tracing::debug!(table_id = %table_id, "Table selected");
        Ok(())
    }

    /// Rows confirmed for a table since its last save
    pub fn table_rows(&self, table_id: &str) -> ManagerResult<&[LineItem]> {
        Ok(self.ledgers.rows(table_id)?)
    }

    // ========== Order ==========

    /// Add one unit of an item to the pending order
    pub fn add_item(&mut self, name: &str, unit_price: Decimal) -> ManagerResult<LineItem> {
        let line = self.builder.add_item(name, unit_price)?.clone();
        tracing::debug!(
            table_id = ?self.builder.active_table(),
            item = %line.name,
            qty = line.qty,
            "Item added"
        );
        Ok(line)
    }

    /// Remove an item line; absent names are ignored
    pub fn remove_item(&mut self, name: &str) -> bool {
        self.builder.remove_item(name)
    }

    pub fn clear_order(&mut self) {
        self.builder.clear();
    }

    pub fn order_snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            table_id: self.builder.active_table().map(str::to_string),
            lines: self.builder.items().to_vec(),
            total: self.builder.total(),
        }
    }

    /// Move the pending order into the active table's ledger
    ///
    /// Returns the number of rows appended; an empty order appends nothing.
    pub fn confirm_order(&mut self) -> ManagerResult<usize> {
        let table_id = self
            .builder
            .active_table()
            .ok_or(OrderError::NoTableSelected)?
            .to_string();
        // validate before the order is taken
        self.ledgers.check_append(&table_id, self.builder.items())?;

        let (table_id, lines) = self.builder.take_for_confirm()?;
        if lines.is_empty() {
            tracing::debug!(table_id = %table_id, "Empty order confirmed, nothing to append");
            return Ok(0);
        }

        let appended = lines.len();
        let row_count = self.ledgers.append(&table_id, lines)?;
        tracing::info!(
            table_id = %table_id,
            appended,
            row_count,
            "Order confirmed"
        );
        Ok(appended)
    }

    // ========== Save ==========

    /// Flush a table into today's daily and monthly buckets
    pub fn save_and_clear_table(&mut self, table_id: &str) -> ManagerResult<SaveSummary> {
        self.save_and_clear_table_at(table_id, Utc::now())
    }

    /// Same as [`TillManager::save_and_clear_table`] with an explicit clock
    pub fn save_and_clear_table_at(
        &mut self,
        table_id: &str,
        now: DateTime<Utc>,
    ) -> ManagerResult<SaveSummary> {
        let rows = self.ledgers.rows(table_id)?;
        if rows.is_empty() {
            return Err(OrderError::EmptyTable(table_id.to_string()).into());
        }

        let keys = PeriodKeys::at(now, self.tz);
        let total = shared::order::lines_total(rows);
        let row_count = rows.len();

        let mut merged = self.reports.clone();
        merged.merge(&keys, rows)?;
        self.storage.save(&merged)?;
        self.reports = merged;

        self.ledgers.take_rows(table_id)?;
        self.builder.deselect();

        tracing::info!(
            target: "audit",
            table_id = %table_id,
            daily_key = %keys.daily,
            monthly_key = %keys.monthly,
            rows = row_count,
            total = %total,
            "Table saved to reports"
        );

        Ok(SaveSummary {
            table_id: table_id.to_string(),
            keys,
            rows: row_count,
            total,
        })
    }

    // ========== Reports ==========

    pub fn reports(&self) -> &ReportStore {
        &self.reports
    }

    /// Flattened display rows for one collection
    pub fn report_rows(&self, kind: ReportKind) -> Vec<ReportRow> {
        self.reports.rows(kind)
    }

    /// Erase persisted and in-memory reports
    pub fn clear_all_reports(&mut self) -> ManagerResult<()> {
        self.storage.clear()?;
        let daily = self.reports.daily.len();
        let monthly = self.reports.monthly.len();
        self.reports.clear();
        tracing::warn!(
            target: "audit",
            daily_buckets = daily,
            monthly_buckets = monthly,
            "All reports cleared"
        );
        Ok(())
    }

    pub fn export_snapshot(&self) -> ReportSnapshot {
        self.reports.snapshot()
    }

    /// Write the export document to `path`
    pub fn export_to_file(&self, path: &Path) -> ManagerResult<PathBuf> {
        let written = export::write_export(path, &self.export_snapshot())?;
        tracing::info!(
            target: "audit",
            path = %written.display(),
            daily_buckets = self.reports.daily.len(),
            monthly_buckets = self.reports.monthly.len(),
            "Reports exported"
        );
        Ok(written)
    }

    /// Create a manager over in-memory storage (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Self {
        let storage = ReportStorage::open_in_memory().expect("in-memory redb");
        Self::from_storage(storage, &Config::with_work_dir("unused")).expect("load empty storage")
    }
}

#[cfg(test)]
mod tests;
