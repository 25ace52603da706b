// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{CategoryAggregate, MonthlyAggregate, ReportStats};
use crate::stats::report_stats;
use crate::utils::{fmt_money, maybe_print_json, parse_year, pretty_table, today};
use anyhow::Result;
use chrono::{Datelike, Month};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

/// Report statistics plus the values a reader derives from them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearReport {
    #[serde(flatten)]
    pub stats: ReportStats,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub savings_rate: i64,
    pub category_shares: Vec<CategoryShare>,
}

#[derive(Debug, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub percent: i64,
}

impl From<ReportStats> for YearReport {
    fn from(stats: ReportStats) -> Self {
        let category_shares = stats
            .yearly_category_data
            .iter()
            .map(|c| CategoryShare {
                name: c.name.clone(),
                percent: stats.category_share(c.value),
            })
            .collect();
        YearReport {
            balance: stats.balance(),
            savings_rate: stats.savings_rate(),
            category_shares,
            stats,
        }
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let year = match m.get_one::<String>("year") {
        Some(s) => parse_year(s)?,
        None => today().year(),
    };
    let report = compute(conn, year)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!("Report for {}", year);
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense"], monthly_rows(&report.stats.monthly_data))
    );
    println!(
        "{}",
        pretty_table(
            &["Category", "Spent", "Share"],
            category_rows(&report.stats, &report.stats.yearly_category_data),
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Total income", "Total expense", "Balance", "Savings rate"],
            vec![vec![
                fmt_money(&report.stats.total_year_income),
                fmt_money(&report.stats.total_year_expense),
                fmt_money(&report.balance),
                format!("{}%", report.savings_rate),
            ]],
        )
    );
    Ok(())
}

pub fn compute(conn: &Connection, year: i32) -> Result<YearReport> {
    let ledger = ledger::load(conn)?;
    Ok(report_stats(ledger.transactions(), year).into())
}

fn monthly_rows(months: &[MonthlyAggregate]) -> Vec<Vec<String>> {
    months
        .iter()
        .map(|m| {
            let name = u8::try_from(m.month)
                .ok()
                .and_then(|n| Month::try_from(n).ok())
                .map(|mo| mo.name().to_string())
                .unwrap_or_else(|| m.month.to_string());
            vec![name, fmt_money(&m.income), fmt_money(&m.expense)]
        })
        .collect()
}

fn category_rows(stats: &ReportStats, cats: &[CategoryAggregate]) -> Vec<Vec<String>> {
    cats.iter()
        .map(|c| {
            vec![
                c.name.clone(),
                fmt_money(&c.value),
                format!("{}%", stats.category_share(c.value)),
            ]
        })
        .collect()
}
