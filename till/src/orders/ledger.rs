//! Table registry and per-table ledgers
//!
//! Each table keeps the rows confirmed since its last save. Rows are stored
//! exactly as confirmed: confirming the same item twice yields two rows, they
//! are only summed when the table is saved into the reports.

use rust_decimal::Decimal;
use shared::order::{LineItem, checked_lines_total, lines_total};

use super::error::{OrderError, OrderResult};

/// Confirmed rows of one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableLedger {
    pub id: String,
    pub rows: Vec<LineItem>,
}

impl TableLedger {
    fn new(id: String) -> Self {
        Self {
            id,
            rows: Vec::new(),
        }
    }

    /// Running bill of the table
    pub fn total(&self) -> Decimal {
        lines_total(&self.rows)
    }
}

/// All tables, in creation order
#[derive(Debug, Clone)]
pub struct TableLedgers {
    max_tables: usize,
    tables: Vec<TableLedger>,
}

impl TableLedgers {
    /// An empty registry capped at `max_tables`
    pub fn new(max_tables: usize) -> Self {
        Self {
            max_tables,
            tables: Vec::new(),
        }
    }

    /// A registry with `initial` tables already created (clamped to the cap)
    pub fn with_tables(max_tables: usize, initial: usize) -> Self {
        let mut ledgers = Self::new(max_tables);
        for _ in 0..initial.min(max_tables) {
            // cannot hit the cap inside the clamped range
            let _ = ledgers.add_table();
        }
        ledgers
    }

    pub fn max_tables(&self) -> usize {
        self.max_tables
    }

    /// Create the next table (`table-1`, `table-2`, ...)
    pub fn add_table(&mut self) -> OrderResult<String> {
        if self.tables.len() >= self.max_tables {
            return Err(OrderError::TableLimitReached(self.max_tables));
        }
        let id = format!("table-{}", self.tables.len() + 1);
        self.tables.push(TableLedger::new(id.clone()));
        Ok(id)
    }

    pub fn contains(&self, table_id: &str) -> bool {
        self.tables.iter().any(|t| t.id == table_id)
    }

    pub fn tables(&self) -> &[TableLedger] {
        &self.tables
    }

    pub fn table(&self, table_id: &str) -> OrderResult<&TableLedger> {
        self.tables
            .iter()
            .find(|t| t.id == table_id)
            .ok_or_else(|| OrderError::UnknownTable(table_id.to_string()))
    }

    fn table_mut(&mut self, table_id: &str) -> OrderResult<&mut TableLedger> {
        self.tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or_else(|| OrderError::UnknownTable(table_id.to_string()))
    }

    /// Rows confirmed for `table_id` since its last save
    pub fn rows(&self, table_id: &str) -> OrderResult<&[LineItem]> {
        Ok(&self.table(table_id)?.rows)
    }

    /// Check that `lines` could be appended to `table_id`
    ///
    /// The table must exist and its running bill must stay representable.
    pub fn check_append(&self, table_id: &str, lines: &[LineItem]) -> OrderResult<()> {
        let table = self.table(table_id)?;
        if checked_lines_total(table.rows.iter().chain(lines)).is_none() {
            return Err(OrderError::AmountOverflow(format!("bill of {}", table_id)));
        }
        Ok(())
    }

    /// Append confirmed lines as raw rows; returns the new row count
    pub fn append(&mut self, table_id: &str, lines: Vec<LineItem>) -> OrderResult<usize> {
        self.check_append(table_id, &lines)?;
        let table = self.table_mut(table_id)?;
        table.rows.extend(lines);
        Ok(table.rows.len())
    }

    /// Flush the table, returning its rows
    pub fn take_rows(&mut self, table_id: &str) -> OrderResult<Vec<LineItem>> {
        Ok(std::mem::take(&mut self.table_mut(table_id)?.rows))
    }
}
