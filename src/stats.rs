// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard and report aggregation over a transaction snapshot.
//!
//! Everything here is a pure function of its inputs. Callers recompute on every
//! read; nothing is cached between calls.

use crate::models::{
    CategoryAggregate, DashboardStats, MonthlyAggregate, ReportStats, Transaction, TxType,
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Month-to-date view for the year-month of `reference`.
pub fn dashboard_stats(transactions: &[Transaction], reference: NaiveDate) -> DashboardStats {
    let (year, month) = (reference.year(), reference.month());
    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.in_month(year, month))
        .collect();

    let income = sum_by_type(in_month.iter().copied(), TxType::Income);
    let expense = sum_by_type(in_month.iter().copied(), TxType::Expense);

    DashboardStats {
        income,
        expense,
        balance: income - expense,
        category_data: category_breakdown(in_month.iter().copied()),
    }
}

/// Full-year view: twelve monthly buckets plus a ranked expense breakdown.
pub fn report_stats(transactions: &[Transaction], year: i32) -> ReportStats {
    let in_year: Vec<&Transaction> = transactions.iter().filter(|t| t.in_year(year)).collect();

    let monthly_data = (1..=12)
        .map(|month| {
            let rows = in_year.iter().copied().filter(|t| t.date.month() == month);
            let (income, expense) = rows.fold((Decimal::ZERO, Decimal::ZERO), |acc, t| {
                match t.r#type {
                    TxType::Income => (accumulate(acc.0, t.amount), acc.1),
                    TxType::Expense => (acc.0, accumulate(acc.1, t.amount)),
                }
            });
            MonthlyAggregate {
                month,
                income,
                expense,
            }
        })
        .collect();

    let mut yearly_category_data = category_breakdown(in_year.iter().copied());
    // sort_by is stable, so equal totals keep first-seen order
    yearly_category_data.sort_by(|a, b| b.value.cmp(&a.value));

    ReportStats {
        year,
        monthly_data,
        yearly_category_data,
        total_year_income: sum_by_type(in_year.iter().copied(), TxType::Income),
        total_year_expense: sum_by_type(in_year.iter().copied(), TxType::Expense),
    }
}

pub fn sum_by_type<'a>(rows: impl IntoIterator<Item = &'a Transaction>, kind: TxType) -> Decimal {
    rows.into_iter()
        .filter(|t| t.r#type == kind)
        .fold(Decimal::ZERO, |acc, t| accumulate(acc, t.amount))
}

/// Running total that saturates instead of overflowing.
fn accumulate(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Expense totals per category, in the order each category is first seen.
pub fn category_breakdown<'a>(
    rows: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<CategoryAggregate> {
    let mut out: Vec<CategoryAggregate> = Vec::new();
    for t in rows.into_iter().filter(|t| t.is_expense()) {
        match out.iter_mut().find(|c| c.name == t.category) {
            Some(entry) => entry.value = accumulate(entry.value, t.amount),
            None => out.push(CategoryAggregate {
                name: t.category.clone(),
                value: t.amount,
            }),
        }
    }
    out
}

impl ReportStats {
    pub fn balance(&self) -> Decimal {
        self.total_year_income - self.total_year_expense
    }

    /// Whole-percent share of income kept; 0 when there was no income.
    pub fn savings_rate(&self) -> i64 {
        percent_of(self.balance(), self.total_year_income)
    }

    /// Whole-percent share of the year's expenses; 0 when nothing was spent.
    pub fn category_share(&self, value: Decimal) -> i64 {
        percent_of(value, self.total_year_expense)
    }
}

/// `round(part / whole * 100)` with half-up rounding; 0 for a non-positive `whole`.
pub fn percent_of(part: Decimal, whole: Decimal) -> i64 {
    if whole <= Decimal::ZERO {
        return 0;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.checked_add(Decimal::new(5, 1)))
        .and_then(|pct| pct.floor().to_i64())
        .unwrap_or(0)
}
