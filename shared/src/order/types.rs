//! Order line types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::ReportItem;

/// 订单行 - one menu item in an order or a confirmed ledger row
///
/// `total_price` is always `qty × unit_price` for a line built by the order
/// builder. Ledger rows are copied verbatim from confirmed order lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Menu item name (unique within its container)
    pub name: String,
    /// Quantity, at least 1
    pub qty: u32,
    /// Price of a single unit
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    /// Line total
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_price: Decimal,
}

impl LineItem {
    /// A fresh line with quantity 1
    pub fn new(name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            qty: 1,
            unit_price,
            total_price: unit_price,
        }
    }

    /// The line with one more unit, repriced at `unit_price`
    ///
    /// `None` when the quantity or the total leaves the representable range.
    pub fn incremented(&self, unit_price: Decimal) -> Option<Self> {
        let qty = self.qty.checked_add(1)?;
        let total_price = unit_price.checked_mul(Decimal::from(qty))?;
        Some(Self {
            name: self.name.clone(),
            qty,
            unit_price,
            total_price,
        })
    }

    /// Report contribution of this line (name, qty, total)
    pub fn to_report_item(&self) -> ReportItem {
        ReportItem {
            name: self.name.clone(),
            qty: self.qty,
            total_price: self.total_price,
        }
    }
}

/// Sum of line totals, `None` on overflow
pub fn checked_lines_total<'a>(lines: impl IntoIterator<Item = &'a LineItem>) -> Option<Decimal> {
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.total_price))
}

/// Sum of line totals for display, saturating at `Decimal::MAX`
pub fn lines_total(lines: &[LineItem]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.total_price))
}
