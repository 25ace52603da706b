// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use serde_json::{json, Value};

pub fn parse_prompt(text: &str) -> String {
    format!(
        "Extract a single personal finance transaction from the text below.\n\
         Return JSON with:\n\
         - amount: the money amount as a positive number (required)\n\
         - type: \"expense\" or \"income\" (required)\n\
         - category: a short label such as Food, Transport, Shopping, Salary (optional)\n\
         - note: a brief description (optional)\n\
         \n\
         Text: \"{}\"",
        text
    )
}

pub fn parse_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "amount": { "type": "NUMBER" },
            "category": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["expense", "income"] },
            "note": { "type": "STRING" }
        },
        "required": ["amount", "type"]
    })
}

/// One `date: ±amount (category) - note` line per transaction, in iteration order.
pub fn transaction_lines<'a>(rows: impl IntoIterator<Item = &'a Transaction>) -> String {
    rows.into_iter()
        .map(|t| {
            format!(
                "{}: {}{} ({}) - {}",
                t.date,
                t.r#type.sign(),
                t.amount,
                t.category,
                t.note
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn analysis_prompt(lines: &str) -> String {
    format!(
        "You are a personal finance assistant. Review these recent transactions \
         (income is +, expense is -):\n\
         {}\n\
         \n\
         Write a short summary of the spending pattern and a list of concrete, \
         actionable recommendations to improve savings.",
        lines
    )
}

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "recommendations"]
    })
}
