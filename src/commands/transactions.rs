// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{TransactionDraft, TxType};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table, today};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, sub, today())?;
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Records the transaction described by `sub` and returns its id.
pub fn add(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<String> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => Some(parse_date(s)?.to_string()),
        None => None,
    };
    let draft = TransactionDraft {
        date,
        amount: sub.get_one::<String>("amount").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        r#type: sub.get_one::<String>("type").cloned(),
        note: sub.get_one::<String>("note").cloned(),
    };

    let mut ledger = ledger::load(conn)?;
    let tx = ledger.add(draft, today).clone();
    ledger::save(conn, &ledger)?;
    println!(
        "Recorded {} {} on {} ({}) [{}]",
        tx.r#type,
        fmt_money(&tx.amount),
        tx.date,
        tx.category,
        tx.id
    );
    Ok(tx.id)
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut ledger = ledger::load(conn)?;
    if ledger.delete(id) {
        ledger::save(conn, &ledger)?;
        println!("Deleted transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Category", "Note", "ID"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub note: String,
}

/// Stored order (newest added first), filtered by `--month` / `--type`, capped by `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s)?),
        None => None,
    };
    let kind = sub.get_one::<String>("type").map(|s| TxType::coerce(s));
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let ledger = ledger::load(conn)?;
    let data = ledger
        .transactions()
        .iter()
        .filter(|t| month.is_none_or(|m| t.in_month(m.year(), m.month())))
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            r#type: t.r#type.to_string(),
            amount: fmt_money(&t.amount),
            category: t.category.clone(),
            note: t.note.clone(),
        })
        .collect();
    Ok(data)
}
