// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    /// Lenient parse: only `income` (any case) is income, everything else is an expense.
    pub fn coerce(s: &str) -> TxType {
        if s.trim().eq_ignore_ascii_case("income") {
            TxType::Income
        } else {
            TxType::Expense
        }
    }

    pub fn sign(self) -> char {
        match self {
            TxType::Income => '+',
            TxType::Expense => '-',
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Income => f.write_str("income"),
            TxType::Expense => f.write_str("expense"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal, // magnitude; sign lives in `r#type`
    pub category: String,
    #[serde(rename = "type")]
    pub r#type: TxType,
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TxType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TxType::Expense
    }

    pub fn in_month(&self, year: i32, month: u32) -> bool {
        use chrono::Datelike;
        self.date.year() == year && self.date.month() == month
    }

    pub fn in_year(&self, year: i32) -> bool {
        use chrono::Datelike;
        self.date.year() == year
    }
}

/// Candidate record as typed by a user or returned by the AI bridge.
/// Nothing is validated here; see `TransactionDraft::normalize` in `ledger`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub category_data: Vec<CategoryAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub year: i32,
    pub monthly_data: Vec<MonthlyAggregate>,
    pub yearly_category_data: Vec<CategoryAggregate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_year_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_year_expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
