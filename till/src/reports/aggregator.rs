//! Report Aggregator - merges flushed table rows into period buckets
//!
//! Within a bucket, items are unique by name. Quantities and totals only
//! grow; the first time a name is seen fixes its position in the bucket.

use shared::order::LineItem;
use shared::report::{
    ReportBucket, ReportItem, ReportKind, ReportRow, ReportSnapshot, flatten_rows,
};
use thiserror::Error;

use crate::utils::PeriodKeys;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("Totals for {name} in {period_key} are out of range")]
    Overflow { period_key: String, name: String },
}

/// Merge `rows` into the bucket for `period_key`, creating it if absent
///
/// The bucket is updated as a whole: on overflow `buckets` is left as it was.
pub fn merge_into(
    buckets: &mut Vec<ReportBucket>,
    period_key: &str,
    rows: &[ReportItem],
) -> Result<(), MergeError> {
    let idx = buckets.iter().position(|b| b.period_key == period_key);
    let mut bucket = match idx {
        Some(idx) => buckets[idx].clone(),
        None => ReportBucket::new(period_key),
    };

    for row in rows {
        match bucket.items.iter_mut().find(|i| i.name == row.name) {
            Some(existing) => {
                let overflow = || MergeError::Overflow {
                    period_key: period_key.to_string(),
                    name: row.name.clone(),
                };
                existing.qty = existing.qty.checked_add(row.qty).ok_or_else(overflow)?;
                existing.total_price = existing
                    .total_price
                    .checked_add(row.total_price)
                    .ok_or_else(overflow)?;
            }
            None => bucket.items.push(row.clone()),
        }
    }

    match idx {
        Some(idx) => buckets[idx] = bucket,
        None => buckets.push(bucket),
    }
    Ok(())
}

/// Daily and monthly bucket collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportStore {
    pub daily: Vec<ReportBucket>,
    pub monthly: Vec<ReportBucket>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one flushed table into both collections
    ///
    /// Daily and monthly see the same row list. Callers merge into a copy, a
    /// failed merge may have updated the daily collection already.
    pub fn merge(&mut self, keys: &PeriodKeys, rows: &[LineItem]) -> Result<(), MergeError> {
        let items: Vec<ReportItem> = rows.iter().map(LineItem::to_report_item).collect();
        merge_into(&mut self.daily, &keys.daily, &items)?;
        merge_into(&mut self.monthly, &keys.monthly, &items)
    }

    pub fn buckets(&self, kind: ReportKind) -> &[ReportBucket] {
        match kind {
            ReportKind::Daily => &self.daily,
            ReportKind::Monthly => &self.monthly,
        }
    }

    pub fn buckets_mut(&mut self, kind: ReportKind) -> &mut Vec<ReportBucket> {
        match kind {
            ReportKind::Daily => &mut self.daily,
            ReportKind::Monthly => &mut self.monthly,
        }
    }

    /// Bucket for a period key, if any
    pub fn bucket(&self, kind: ReportKind, period_key: &str) -> Option<&ReportBucket> {
        self.buckets(kind).iter().find(|b| b.period_key == period_key)
    }

    /// Flattened display rows
    pub fn rows(&self, kind: ReportKind) -> Vec<ReportRow> {
        flatten_rows(self.buckets(kind))
    }

    /// Export artifact; no mutation
    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            daily: self.daily.clone(),
            monthly: self.monthly.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.daily.clear();
        self.monthly.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.monthly.is_empty()
    }
}

impl From<ReportSnapshot> for ReportStore {
    fn from(snapshot: ReportSnapshot) -> Self {
        Self {
            daily: snapshot.daily,
            monthly: snapshot.monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn row(name: &str, qty: u32, total: &str) -> ReportItem {
        ReportItem {
            name: name.to_string(),
            qty,
            total_price: d(total),
        }
    }

    fn keys() -> PeriodKeys {
        PeriodKeys::for_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn test_merge_sums_same_name() {
        let mut buckets = Vec::new();
        merge_into(
            &mut buckets,
            "2026-10-16",
            &[row("Tea", 2, "20"), row("Tea", 1, "10")],
        )
        .unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].items, vec![row("Tea", 3, "30")]);

        merge_into(&mut buckets, "2026-10-16", &[row("Tea", 1, "10")]).unwrap();
        assert_eq!(buckets[0].item("Tea"), Some(&row("Tea", 4, "40")));
    }

    #[test]
    fn test_new_period_gets_new_bucket() {
        let mut buckets = Vec::new();
        merge_into(&mut buckets, "2026-10-16", &[row("Tea", 1, "10")]).unwrap();
        merge_into(&mut buckets, "2026-10-17", &[row("Tea", 1, "10")]).unwrap();
        let keys: Vec<_> = buckets.iter().map(|b| b.period_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-10-16", "2026-10-17"]);
    }

    #[test]
    fn test_merge_empty_rows_creates_empty_bucket() {
        let mut buckets = Vec::new();
        merge_into(&mut buckets, "2026-10-16", &[]).unwrap();
        assert_eq!(buckets.len(), 1);
        assert!(buckets[0].items.is_empty());
    }

    #[test]
    fn test_merge_is_commutative_in_totals() {
        let a = row("Tea", 2, "20");
        let b = row("Momo", 1, "120");
        let c = row("Tea", 1, "10");

        let mut first = Vec::new();
        merge_into(&mut first, "k", &[a.clone(), b.clone()]).unwrap();
        merge_into(&mut first, "k", &[c.clone()]).unwrap();

        let mut second = Vec::new();
        merge_into(&mut second, "k", &[c, a]).unwrap();
        merge_into(&mut second, "k", &[b]).unwrap();

        for name in ["Tea", "Momo"] {
            assert_eq!(first[0].item(name), second[0].item(name));
        }
        assert_eq!(first[0].item("Tea"), Some(&row("Tea", 3, "30")));
    }

    #[test]
    fn test_first_seen_order_is_stable() {
        let mut buckets = Vec::new();
        merge_into(&mut buckets, "k", &[row("Tea", 1, "10"), row("Momo", 1, "120")]).unwrap();
        merge_into(&mut buckets, "k", &[row("Coffee", 1, "15"), row("Tea", 1, "10")]).unwrap();
        let names: Vec<_> = buckets[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Momo", "Coffee"]);
    }

    #[test]
    fn test_overflow_leaves_bucket_untouched() {
        let mut buckets = Vec::new();
        merge_into(&mut buckets, "k", &[row("Tea", u32::MAX, "10")]).unwrap();
        let before = buckets.clone();

        let err = merge_into(
            &mut buckets,
            "k",
            &[row("Momo", 1, "120"), row("Tea", 1, "10")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MergeError::Overflow {
                period_key: "k".into(),
                name: "Tea".into()
            }
        );
        assert_eq!(buckets, before);

        let mut buckets = vec![ReportBucket {
            period_key: "k".into(),
            items: vec![ReportItem {
                name: "Gold".into(),
                qty: 1,
                total_price: Decimal::MAX,
            }],
        }];
        assert!(merge_into(&mut buckets, "k", &[row("Gold", 1, "1")]).is_err());
        assert_eq!(buckets[0].items[0].qty, 1);
    }

    #[test]
    fn test_store_merges_daily_and_monthly() {
        let mut store = ReportStore::new();
        let tea = LineItem::new("Tea", d("10")).incremented(d("10")).unwrap();
        store.merge(&keys(), &[tea, LineItem::new("Tea", d("10"))]).unwrap();

        let daily = store.bucket(ReportKind::Daily, "2026-10-16").unwrap();
        assert_eq!(daily.item("Tea"), Some(&row("Tea", 3, "30")));
        let monthly = store.bucket(ReportKind::Monthly, "October 2026").unwrap();
        assert_eq!(monthly.item("Tea"), Some(&row("Tea", 3, "30")));
    }

    #[test]
    fn test_snapshot_and_clear() {
        let mut store = ReportStore::new();
        store.merge(&keys(), &[LineItem::new("Tea", d("10"))]).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.daily.len(), 1);
        assert_eq!(snapshot.monthly.len(), 1);
        assert_eq!(ReportStore::from(snapshot.clone()), store);

        store.clear();
        assert!(store.is_empty());
        // snapshot is a copy
        assert!(!snapshot.is_empty());
    }
}
