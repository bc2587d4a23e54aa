//! Order Builder - the in-progress order of the selected table
//!
//! Lines are unique by name: adding a name that is already present bumps its
//! quantity instead of appending a second line.

use rust_decimal::Decimal;
use shared::order::{LineItem, checked_lines_total, lines_total};

use super::error::{OrderError, OrderResult};

/// In-progress order, scoped to at most one selected table
#[derive(Debug, Default, Clone)]
pub struct OrderBuilder {
    active_table: Option<String>,
    items: Vec<LineItem>,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected table
    pub fn active_table(&self) -> Option<&str> {
        self.active_table.as_deref()
    }

    /// Make `table_id` the active table
    ///
    /// Switching to a different table drops the pending order; selecting the
    /// active table again keeps it.
    pub fn select_table(&mut self, table_id: &str) {
        if self.active_table.as_deref() != Some(table_id) {
            if !self.items.is_empty() {
                tracing::debug!(
                    from = ?self.active_table,
                    to = %table_id,
                    dropped = self.items.len(),
                    "Table switched, pending order dropped"
                );
            }
            self.items.clear();
            self.active_table = Some(table_id.to_string());
        }
    }

    /// Clear the selection (and with it the pending order)
    pub fn deselect(&mut self) {
        self.active_table = None;
        self.items.clear();
    }

    /// Add one unit of `name` at `unit_price`
    pub fn add_item(&mut self, name: &str, unit_price: Decimal) -> OrderResult<&LineItem> {
        if self.active_table.is_none() {
            return Err(OrderError::NoTableSelected);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(OrderError::InvalidItem("item name cannot be empty".into()));
        }
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(OrderError::InvalidItem(format!(
                "price of {} cannot be negative",
                name
            )));
        }

        let overflow = || OrderError::AmountOverflow(format!("line {}", name));
        let existing = self.items.iter().position(|i| i.name == name);
        let line = match existing {
            Some(idx) => self.items[idx].incremented(unit_price).ok_or_else(overflow)?,
            None => LineItem::new(name, unit_price),
        };

        // the order total must stay representable too
        let others = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != existing)
            .map(|(_, l)| l);
        if checked_lines_total(others.chain(std::iter::once(&line))).is_none() {
            return Err(OrderError::AmountOverflow("order total".into()));
        }

        let idx = match existing {
            Some(idx) => {
                self.items[idx] = line;
                idx
            }
            None => {
                self.items.push(line);
                self.items.len() - 1
            }
        };
        Ok(&self.items[idx])
    }

    /// Remove the line named `name`; returns whether a line was removed
    pub fn remove_item(&mut self, name: &str) -> bool {
        let name = name.trim();
        let before = self.items.len();
        self.items.retain(|i| i.name != name);
        before != self.items.len()
    }

    /// Empty the order unconditionally
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Hand the order over for confirmation, leaving it empty
    ///
    /// Returns the active table id together with the lines.
    pub fn take_for_confirm(&mut self) -> OrderResult<(String, Vec<LineItem>)> {
        let table_id = self
            .active_table
            .clone()
            .ok_or(OrderError::NoTableSelected)?;
        Ok((table_id, std::mem::take(&mut self.items)))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Order total
    pub fn total(&self) -> Decimal {
        lines_total(&self.items)
    }
}
