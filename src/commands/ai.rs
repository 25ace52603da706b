// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ai::{self, TextGenerator};
use crate::ledger;
use crate::models::{Analysis, Transaction};
use crate::utils::{fmt_money, parse_date, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(
    conn: &Connection,
    m: &clap::ArgMatches,
    generator: &impl TextGenerator,
) -> Result<()> {
    match m.subcommand() {
        Some(("parse", sub)) => {
            let text = sub
                .get_many::<String>("text")
                .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let date = match sub.get_one::<String>("date") {
                Some(s) => Some(parse_date(s)?),
                None => None,
            };
            match parse_and_record(conn, generator, &text, date, today())? {
                Some(tx) => println!(
                    "Recorded {} {} on {} ({}) [{}]",
                    tx.r#type,
                    fmt_money(&tx.amount),
                    tx.date,
                    tx.category,
                    tx.id
                ),
                None => println!("Could not understand that; nothing was recorded."),
            }
        }
        Some(("analyze", _)) => match run_analysis(conn, generator)? {
            Some(analysis) => print_analysis(&analysis),
            None => {
                println!("No analysis available. Add some transactions or check the AI settings.")
            }
        },
        _ => {}
    }
    Ok(())
}

/// Parses `text` and, when something came back, stores it like a manual entry.
pub fn parse_and_record(
    conn: &Connection,
    generator: &impl TextGenerator,
    text: &str,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Option<Transaction>> {
    let Some(mut draft) = ai::parse_free_text(generator, text) else {
        return Ok(None);
    };
    draft.date = date.map(|d| d.to_string());

    let mut ledger = ledger::load(conn)?;
    let tx = ledger.add(draft, today).clone();
    ledger::save(conn, &ledger)?;
    Ok(Some(tx))
}

pub fn run_analysis(
    conn: &Connection,
    generator: &impl TextGenerator,
) -> Result<Option<Analysis>> {
    let ledger = ledger::load(conn)?;
    Ok(ai::analyze(generator, ledger.transactions()))
}

fn print_analysis(analysis: &Analysis) {
    println!("{}", analysis.summary.trim());
    if !analysis.recommendations.is_empty() {
        println!();
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            println!("{}. {}", i + 1, rec.trim());
        }
    }
}
