// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::DashboardStats;
use crate::stats::dashboard_stats;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let reference = reference_month(m, today())?;
    let stats = compute(conn, reference)?;
    if maybe_print_json(json_flag, jsonl_flag, &stats)? {
        return Ok(());
    }

    println!("{}", reference.format("%B %Y"));
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&stats.income),
                fmt_money(&stats.expense),
                fmt_money(&stats.balance),
            ]],
        )
    );
    if stats.category_data.is_empty() {
        println!("No expenses recorded this month.");
    } else {
        let rows = stats
            .category_data
            .iter()
            .map(|c| vec![c.name.clone(), fmt_money(&c.value)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

/// `--month` if given, otherwise the month containing `today`.
pub fn reference_month(m: &clap::ArgMatches, today: NaiveDate) -> Result<NaiveDate> {
    match m.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => Ok(today),
    }
}

pub fn compute(conn: &Connection, reference: NaiveDate) -> Result<DashboardStats> {
    let ledger = ledger::load(conn)?;
    Ok(dashboard_stats(ledger.transactions(), reference))
}
