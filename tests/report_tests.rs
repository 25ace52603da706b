// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use smart_ledger::commands::{dashboard, report};
use smart_ledger::ledger::{self, Ledger};
use smart_ledger::models::TransactionDraft;
use smart_ledger::{cli, db};

fn seeded() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let mut l = Ledger::default();
    for (date, amount, kind, cat) in [
        ("2024-03-05", "100", "income", "Salary"),
        ("2024-03-10", "40", "expense", "Food"),
        ("2024-07-01", "20", "expense", "Transport"),
        ("2024-07-02", "20", "expense", "Food"),
        ("2023-07-02", "999", "expense", "Food"),
    ] {
        l.add(
            TransactionDraft {
                date: Some(date.into()),
                amount: Some(amount.into()),
                category: Some(cat.into()),
                r#type: Some(kind.into()),
                note: None,
            },
            today,
        );
    }
    ledger::save(&conn, &l).unwrap();
    conn
}

#[test]
fn dashboard_uses_month_flag() {
    let conn = seeded();
    let matches = cli::build_cli().get_matches_from(["smart-ledger", "dashboard", "--month", "2024-03"]);
    let (_, sub) = matches.subcommand().unwrap();
    let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let reference = dashboard::reference_month(sub, today).unwrap();
    let stats = dashboard::compute(&conn, reference).unwrap();
    assert_eq!(stats.income, Decimal::from(100));
    assert_eq!(stats.expense, Decimal::from(40));
    assert_eq!(stats.balance, Decimal::from(60));
    assert_eq!(stats.category_data.len(), 1);
}

#[test]
fn dashboard_defaults_to_current_month() {
    let conn = seeded();
    let matches = cli::build_cli().get_matches_from(["smart-ledger", "dashboard"]);
    let (_, sub) = matches.subcommand().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
    let reference = dashboard::reference_month(sub, today).unwrap();
    let stats = dashboard::compute(&conn, reference).unwrap();
    assert_eq!(stats.expense, Decimal::from(40));
    assert_eq!(stats.income, Decimal::ZERO);
}

#[test]
fn year_report_derives_balance_rate_and_shares() {
    let conn = seeded();
    let r = report::compute(&conn, 2024).unwrap();
    assert_eq!(r.balance, Decimal::from(20));
    assert_eq!(r.savings_rate, 20);
    let shares: Vec<(&str, i64)> = r
        .category_shares
        .iter()
        .map(|s| (s.name.as_str(), s.percent))
        .collect();
    assert_eq!(shares, vec![("Food", 75), ("Transport", 25)]);
}

#[test]
fn year_report_json_shape() {
    let conn = seeded();
    let v = serde_json::to_value(report::compute(&conn, 2024).unwrap()).unwrap();
    assert_eq!(v["year"], 2024);
    assert_eq!(v["monthlyData"].as_array().unwrap().len(), 12);
    assert_eq!(v["monthlyData"][2]["income"].as_f64(), Some(100.0));
    assert_eq!(v["yearlyCategoryData"][0]["name"], "Food");
    assert_eq!(v["totalYearExpense"].as_f64(), Some(80.0));
    assert_eq!(v["savingsRate"], 20);
}

#[test]
fn empty_year_has_zero_rates() {
    let conn = seeded();
    let r = report::compute(&conn, 2019).unwrap();
    assert_eq!(r.savings_rate, 0);
    assert!(r.category_shares.is_empty());
    assert_eq!(r.stats.monthly_data.len(), 12);
}
