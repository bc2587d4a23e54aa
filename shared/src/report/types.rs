//! Report bucket types (daily / monthly aggregates)
//!
//! Persisted shape of one bucket:
//!
//! ```json
//! { "periodKey": "2026-10-16", "items": [ { "name": "Tea", "qty": 3, "totalPrice": 30 } ] }
//! ```
//!
//! Snapshots written by the older page used `date` / `month` for the period
//! key; both are accepted on decode.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Which bucket collection a report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Keyed by calendar date
    Daily,
    /// Keyed by "Month Year"
    Monthly,
}

impl ReportKind {
    /// Both kinds, in persistence order
    pub const ALL: [ReportKind; 2] = [ReportKind::Daily, ReportKind::Monthly];

    /// Fixed key the collection is persisted under
    pub const fn storage_key(&self) -> &'static str {
        match self {
            ReportKind::Daily => "dailyReport",
            ReportKind::Monthly => "monthlyReport",
        }
    }

    /// Display label
    pub const fn label(&self) -> &'static str {
        match self {
            ReportKind::Daily => "daily",
            ReportKind::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(ReportKind::Daily),
            "monthly" | "month" => Ok(ReportKind::Monthly),
            other => Err(format!("unknown report kind: {}", other)),
        }
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

/// Aggregated total for one item name within a bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    #[validate(length(min = 1, message = "Item name cannot be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub qty: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[validate(custom(function = "non_negative"))]
    pub total_price: Decimal,
}

/// 报表桶 - item totals for one period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportBucket {
    /// Date (daily) or "Month Year" (monthly)
    #[serde(alias = "date", alias = "month")]
    #[validate(length(min = 1, message = "Period key cannot be empty"))]
    pub period_key: String,
    /// Items in first-seen order
    #[validate(nested)]
    pub items: Vec<ReportItem>,
}

impl ReportBucket {
    /// An empty bucket for `period_key`
    pub fn new(period_key: impl Into<String>) -> Self {
        Self {
            period_key: period_key.into(),
            items: Vec::new(),
        }
    }

    /// Look up the item aggregated under `name`
    pub fn item(&self, name: &str) -> Option<&ReportItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

/// Combined export artifact: `{ "daily": [...], "monthly": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSnapshot {
    pub daily: Vec<ReportBucket>,
    pub monthly: Vec<ReportBucket>,
}

/// One flattened display row of a report view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub period_key: String,
    pub name: String,
    pub qty: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_price: Decimal,
}

/// Flatten buckets into display rows (bucket order, then item order)
pub fn flatten_rows(buckets: &[ReportBucket]) -> Vec<ReportRow> {
    buckets
        .iter()
        .flat_map(|bucket| {
            bucket.items.iter().map(move |item| ReportRow {
                period_key: bucket.period_key.clone(),
                name: item.name.clone(),
                qty: item.qty,
                total_price: item.total_price,
            })
        })
        .collect()
}
