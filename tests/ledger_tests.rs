// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use smart_ledger::db::{init_schema, kv_get, kv_set};
use smart_ledger::ledger::{self, Ledger, MAX_AMOUNT, STORAGE_KEY};
use smart_ledger::models::{Transaction, TransactionDraft, TxType};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn draft(amount: &str, kind: &str, category: &str) -> TransactionDraft {
    TransactionDraft {
        date: Some("2024-03-10".into()),
        amount: Some(amount.into()),
        category: Some(category.into()),
        r#type: Some(kind.into()),
        note: Some(format!("{} note", category)),
    }
}

#[test]
fn add_prepends_newest_first() {
    let mut ledger = Ledger::default();
    ledger.add(draft("10", "expense", "Food"), today());
    ledger.add(draft("2000", "income", "Salary"), today());
    let cats: Vec<_> = ledger.transactions().iter().map(|t| t.category.as_str()).collect();
    assert_eq!(cats, ["Salary", "Food"]);
    assert_eq!(ledger.transactions()[0].r#type, TxType::Income);
}

#[test]
fn delete_removes_only_matching_id() {
    let mut ledger = Ledger::default();
    let keep = ledger.add(draft("1", "expense", "A"), today()).id.clone();
    let gone = ledger.add(draft("2", "expense", "B"), today()).id.clone();
    assert!(ledger.delete(&gone));
    assert_eq!(ledger.len(), 1);
    assert!(ledger.get(&keep).is_some());
    assert!(ledger.get(&gone).is_none());
}

#[test]
fn delete_unknown_id_is_noop() {
    let mut ledger = Ledger::default();
    ledger.add(draft("1", "expense", "A"), today());
    let before = ledger.clone();
    assert!(!ledger.delete("no-such-id"));
    assert_eq!(ledger, before);
}

#[test]
fn recent_is_capped() {
    let mut ledger = Ledger::default();
    for i in 0..5 {
        ledger.add(draft(&i.to_string(), "expense", "X"), today());
    }
    assert_eq!(ledger.recent(3).len(), 3);
    assert_eq!(ledger.recent(3)[0].amount, Decimal::from(4));
    assert_eq!(ledger.recent(10).len(), 5);
}

#[test]
fn load_without_data_is_empty() {
    let conn = setup();
    assert!(ledger::load(&conn).unwrap().is_empty());
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let conn = setup();
    let mut original = Ledger::default();
    original.add(draft("12.5", "expense", "Food"), today());
    original.add(draft("2000", "income", "Salary"), today());
    original.add(TransactionDraft::default(), today());
    ledger::save(&conn, &original).unwrap();

    let loaded = ledger::load(&conn).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn save_overwrites_previous_slot() {
    let conn = setup();
    let mut l = Ledger::default();
    l.add(draft("1", "expense", "A"), today());
    ledger::save(&conn, &l).unwrap();
    l.add(draft("2", "expense", "B"), today());
    ledger::save(&conn, &l).unwrap();
    assert_eq!(ledger::load(&conn).unwrap().len(), 2);
}

#[test]
fn stored_slot_is_json_array_with_numeric_amounts() {
    let conn = setup();
    let mut l = Ledger::default();
    l.add(draft("40", "expense", "Food"), today());
    ledger::save(&conn, &l).unwrap();

    let raw = kv_get(&conn, STORAGE_KEY).unwrap().unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &v.as_array().unwrap()[0];
    assert_eq!(first["date"], "2024-03-10");
    assert_eq!(first["type"], "expense");
    assert_eq!(first["category"], "Food");
    assert!(first["amount"].is_number());
    assert_eq!(first["amount"].as_f64(), Some(40.0));
}

#[test]
fn hand_written_slot_is_readable() {
    let conn = setup();
    kv_set(
        &conn,
        STORAGE_KEY,
        r#"[{"id":"abc","date":"2024-03-05","amount":100,"category":"Salary","type":"income","note":""},
            {"id":"def","date":"2024-03-10","amount":40.25,"category":"Food","type":"expense"}]"#,
    )
    .unwrap();
    let l = ledger::load(&conn).unwrap();
    assert_eq!(l.len(), 2);
    let food: &Transaction = l.get("def").unwrap();
    assert_eq!(food.amount, Decimal::new(4025, 2));
    assert_eq!(food.note, "");
}

#[test]
fn malformed_slot_loads_as_empty() {
    let conn = setup();
    kv_set(&conn, STORAGE_KEY, "{not json").unwrap();
    assert!(ledger::load(&conn).unwrap().is_empty());

    kv_set(&conn, STORAGE_KEY, r#"[{"id":"x","date":"yesterday"}]"#).unwrap();
    assert!(ledger::load(&conn).unwrap().is_empty());
}

fn store_blob(conn: &Connection, raw: &str) {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)",
        params![STORAGE_KEY, raw.as_bytes()],
    )
    .unwrap();
}

fn stored_blob(conn: &Connection) -> Vec<u8> {
    conn.query_row("SELECT value FROM kv WHERE key=?1", params![STORAGE_KEY], |r| r.get(0))
        .unwrap()
}

#[test]
fn missing_table_is_an_error() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(ledger::load(&conn).is_err());
}

#[test]
fn unreadable_slot_is_an_error_and_left_alone() {
    let conn = setup();
    let raw = r#"[{"id":"a","date":"2024-03-05","amount":100,"category":"Salary","type":"income"}]"#;
    store_blob(&conn, raw);

    assert!(ledger::load(&conn).is_err());
    assert_eq!(stored_blob(&conn), raw.as_bytes());
}

#[test]
fn amount_above_max_becomes_zero() {
    let mut l = Ledger::default();
    let tx = l.add(draft("50000000000000000000000000000", "expense", "Huge"), today());
    assert_eq!(tx.amount, Decimal::ZERO);
    let tx = l.add(draft("1000000000000.01", "income", "Huge"), today());
    assert_eq!(tx.amount, Decimal::ZERO);
}

#[test]
fn amount_at_max_is_kept() {
    let mut l = Ledger::default();
    let tx = l.add(draft("1000000000000", "income", "Windfall"), today());
    assert_eq!(tx.amount, MAX_AMOUNT);
}

#[test]
fn large_amounts_survive_save_and_load() {
    let conn = setup();
    let mut original = Ledger::default();
    for amount in ["1000000000000", "999999999999.99", "1234567890.12", "0.01", "123456789012.3"] {
        original.add(draft(amount, "expense", "Big"), today());
    }
    ledger::save(&conn, &original).unwrap();

    let loaded = ledger::load(&conn).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.transactions()[3].amount, Decimal::new(99_999_999_999_999, 2));
}

#[test]
fn extra_digits_are_rounded_to_cents_before_storage() {
    let conn = setup();
    let mut original = Ledger::default();
    let tx = original.add(draft("1234567890123.456", "expense", "X"), today());
    // above the bound once rounded, so coerced
    assert_eq!(tx.amount, Decimal::ZERO);
    let tx = original.add(draft("123456789.125", "expense", "Y"), today());
    assert_eq!(tx.amount, Decimal::new(12_345_678_913, 2));
    ledger::save(&conn, &original).unwrap();
    assert_eq!(ledger::load(&conn).unwrap(), original);
}
