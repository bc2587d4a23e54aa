use super::*;
use crate::reports::storage::SwitchableBackend;
use chrono::TimeZone;
use shared::report::ReportBucket;

fn create_test_manager() -> TillManager {
    TillManager::in_memory()
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn at(y: i32, m: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, day, hour, 0, 0).unwrap()
}

// ========================================================================
// Helper: select a table, add items one by one, confirm
// ========================================================================

fn confirm_items(manager: &mut TillManager, table_id: &str, items: &[(&str, &str)]) {
    manager.select_table(table_id).unwrap();
    for (name, price) in items {
        manager.add_item(name, d(price)).unwrap();
    }
    manager.confirm_order().unwrap();
}

/// Item `(qty, totalPrice)` in a bucket
fn item_totals(bucket: &ReportBucket, name: &str) -> (u32, Decimal) {
    let item = bucket
        .item(name)
        .unwrap_or_else(|| panic!("{} missing from {}", name, bucket.period_key));
    (item.qty, item.total_price)
}

mod test_flows;
