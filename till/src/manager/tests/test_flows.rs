use super::*;

// ========================================================================
//  Order entry: select → add → confirm
// ========================================================================

#[test]
fn test_startup_tables() {
    let manager = create_test_manager();
    let ids: Vec<_> = manager.tables().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["table-1", "table-2", "table-3", "table-4"]);
    assert!(manager.active_table().is_none());
    assert!(manager.startup_notices().is_empty());
}

#[test]
fn test_add_item_without_table() {
    let mut manager = create_test_manager();
    let err = manager.add_item("Tea", d("10")).unwrap_err();
    assert!(matches!(err, ManagerError::Order(OrderError::NoTableSelected)));
    assert!(manager.order_snapshot().lines.is_empty());
}

#[test]
fn test_same_item_twice_gives_qty_two() {
    let mut manager = create_test_manager();
    manager.select_table("table-1").unwrap();
    manager.add_item("Tea", d("10")).unwrap();
    let line = manager.add_item("Tea", d("10")).unwrap();
    assert_eq!(line.qty, 2);
    assert_eq!(line.total_price, d("20"));

    let order = manager.order_snapshot();
    assert_eq!(order.table_id.as_deref(), Some("table-1"));
    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.total, d("20"));
}

#[test]
fn test_remove_and_clear_order() {
    let mut manager = create_test_manager();
    manager.select_table("table-1").unwrap();
    manager.add_item("Tea", d("10")).unwrap();
    manager.add_item("Momo", d("150")).unwrap();

    assert!(!manager.remove_item("Coffee"));
    assert!(manager.remove_item("Tea"));
    assert_eq!(manager.order_snapshot().total, d("150"));

    manager.clear_order();
    assert!(manager.order_snapshot().lines.is_empty());
    // the table stays selected
    assert_eq!(manager.active_table(), Some("table-1"));
}

#[test]
fn test_confirm_without_table() {
    let mut manager = create_test_manager();
    let err = manager.confirm_order().unwrap_err();
    assert!(matches!(err, ManagerError::Order(OrderError::NoTableSelected)));
}

#[test]
fn test_confirm_empty_order_leaves_ledger_unchanged() {
    let mut manager = create_test_manager();
    confirm_items(&mut manager, "table-2", &[("Tea", "10")]);
    let before = manager.table_rows("table-2").unwrap().to_vec();

    manager.select_table("table-2").unwrap();
    assert_eq!(manager.confirm_order().unwrap(), 0);
    assert_eq!(manager.table_rows("table-2").unwrap(), before.as_slice());
}

#[test]
fn test_confirm_twice_keeps_separate_rows() {
    let mut manager = create_test_manager();
    confirm_items(&mut manager, "table-1", &[("Tea", "10"), ("Tea", "10")]);
    confirm_items(&mut manager, "table-1", &[("Tea", "10")]);

    let rows = manager.table_rows("table-1").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].qty, rows[0].total_price), (2, d("20")));
    assert_eq!((rows[1].qty, rows[1].total_price), (1, d("10")));
    // order is emptied, table stays selected
    assert!(manager.order_snapshot().lines.is_empty());
    assert_eq!(manager.active_table(), Some("table-1"));
}

#[test]
fn test_unknown_table() {
    let mut manager = create_test_manager();
    let err = manager.select_table("table-99").unwrap_err();
    assert!(matches!(err, ManagerError::Order(OrderError::UnknownTable(ref id)) if id == "table-99"));
    assert!(manager.table_rows("table-99").is_err());
    assert!(matches!(
        manager.save_and_clear_table("table-99"),
        Err(ManagerError::Order(OrderError::UnknownTable(_)))
    ));

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::TableNotFound);
}

#[test]
fn test_table_cap() {
    let mut manager = create_test_manager();
    for n in 5..=10 {
        assert_eq!(manager.add_table().unwrap(), format!("table-{}", n));
    }
    let err = manager.add_table().unwrap_err();
    assert!(matches!(
        err,
        ManagerError::Order(OrderError::TableLimitReached(10))
    ));
    assert_eq!(manager.tables().len(), 10);
}

#[test]
fn test_switching_tables_drops_pending_order() {
    let mut manager = create_test_manager();
    manager.select_table("table-1").unwrap();
    manager.add_item("Tea", d("10")).unwrap();
    manager.select_table("table-2").unwrap();
    assert!(manager.order_snapshot().lines.is_empty());
    assert!(manager.table_rows("table-1").unwrap().is_empty());
}

// ========================================================================
//  Save: ledger → reports
// ========================================================================

#[test]
fn test_save_empty_table() {
    let mut manager = create_test_manager();
    let err = manager
        .save_and_clear_table_at("table-1", at(2026, 10, 16, 12))
        .unwrap_err();
    assert!(matches!(err, ManagerError::Order(OrderError::EmptyTable(_))));
    assert!(manager.reports().is_empty());

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::TableEmpty);
}

#[test]
fn test_save_flushes_ledger_and_deselects() {
    let mut manager = create_test_manager();
    confirm_items(&mut manager, "table-3", &[("Tea", "10"), ("Momo", "150")]);
    manager.add_item("Coffee", d("90")).unwrap();

    let summary = manager
        .save_and_clear_table_at("table-3", at(2026, 10, 16, 12))
        .unwrap();
    assert_eq!(summary.table_id, "table-3");
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.total, d("160"));
    assert_eq!(summary.keys.daily, "2026-10-16");
    assert_eq!(summary.keys.monthly, "October 2026");

    assert!(manager.table_rows("table-3").unwrap().is_empty());
    assert!(manager.active_table().is_none());
    // pending order goes with the selection
    assert!(manager.order_snapshot().lines.is_empty());
    assert!(matches!(
        manager.add_item("Tea", d("10")),
        Err(ManagerError::Order(OrderError::NoTableSelected))
    ));
}

#[test]
fn test_other_tables_untouched_by_save() {
    let mut manager = create_test_manager();
    confirm_items(&mut manager, "table-1", &[("Tea", "10")]);
    confirm_items(&mut manager, "table-2", &[("Momo", "150")]);

    manager
        .save_and_clear_table_at("table-1", at(2026, 10, 16, 12))
        .unwrap();
    assert_eq!(manager.table_rows("table-2").unwrap().len(), 1);
}
