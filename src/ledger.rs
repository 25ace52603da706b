// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transaction store: an in-memory, newest-first list that round-trips
//! through a single key-value slot as a JSON array.

use crate::db::{kv_get, kv_set};
use crate::models::{Transaction, TransactionDraft, TxType};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

pub const STORAGE_KEY: &str = "smart_ledger_data";
pub const FALLBACK_CATEGORY: &str = "Other";

/// Largest accepted amount. Together with cent precision this keeps every stored
/// amount at 15 significant digits or fewer, which an `f64` JSON number holds exactly.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// The `n` most recently added records, newest first.
    pub fn recent(&self, n: usize) -> &[Transaction] {
        &self.transactions[..n.min(self.transactions.len())]
    }

    pub fn add(&mut self, draft: TransactionDraft, today: NaiveDate) -> &Transaction {
        let tx = draft.normalize(today);
        tracing::debug!(id = %tx.id, date = %tx.date, amount = %tx.amount, "adding transaction");
        self.transactions.insert(0, tx);
        &self.transactions[0]
    }

    /// Removes the record with `id`. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        before != self.transactions.len()
    }
}

impl TransactionDraft {
    /// Fill every gap with a default instead of rejecting the candidate.
    ///
    /// - date: `YYYY-MM-DD`, else `today`
    /// - amount: decimal magnitude rounded to cents, else 0 (also when above [`MAX_AMOUNT`])
    /// - category: trimmed, else [`FALLBACK_CATEGORY`]
    /// - type: `income` or, for anything else, `expense`
    /// - note: empty when absent
    pub fn normalize(self, today: NaiveDate) -> Transaction {
        let date = match self.date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|_| {
                    tracing::warn!(input = s, "unparsable date, using today");
                    today
                })
            }
            _ => today,
        };
        let amount = self
            .amount
            .as_deref()
            .and_then(|s| Decimal::from_str(s.trim()).ok())
            .map(|d| d.abs().round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|d| {
                if d > MAX_AMOUNT {
                    tracing::warn!(amount = %d, "amount out of range, using 0");
                    return None;
                }
                Some(d)
            })
            .unwrap_or(Decimal::ZERO);
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
        let r#type = self
            .r#type
            .as_deref()
            .map(TxType::coerce)
            .unwrap_or(TxType::Expense);

        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            amount,
            category,
            r#type,
            note: self.note.unwrap_or_default(),
        }
    }
}

/// Reads the slot. An absent or malformed value yields an empty ledger; a failed
/// read is an error, so callers never save over data they could not see.
pub fn load(conn: &Connection) -> Result<Ledger> {
    let Some(raw) = kv_get(conn, STORAGE_KEY).context("Read stored transactions")? else {
        return Ok(Ledger::default());
    };
    match serde_json::from_str::<Vec<Transaction>>(&raw) {
        Ok(list) => {
            tracing::debug!(count = list.len(), "loaded transactions");
            Ok(Ledger::new(list))
        }
        Err(err) => {
            tracing::warn!("stored transactions are malformed, starting empty: {err}");
            Ok(Ledger::default())
        }
    }
}

pub fn save(conn: &Connection, ledger: &Ledger) -> Result<()> {
    let raw = serde_json::to_string(ledger.transactions()).context("Serialize transactions")?;
    kv_set(conn, STORAGE_KEY, &raw)?;
    tracing::debug!(count = ledger.len(), "saved transactions");
    Ok(())
}
