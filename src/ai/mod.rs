// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bridge to an external text-generation service.
//!
//! Both public operations absorb every failure: the error is logged and the
//! caller gets `None`, which means "nothing came back", never a distinct error.

pub mod gemini;
pub mod prompt;

use crate::models::{Analysis, Transaction, TransactionDraft};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use gemini::GeminiClient;

/// How many of the most recent transactions an analysis looks at.
pub const ANALYSIS_WINDOW: usize = 20;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("service returned no text")]
    EmptyResponse,
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response does not match the expected shape: {0}")]
    Schema(String),
}

/// A service that answers a prompt with a JSON document matching `schema`.
pub trait TextGenerator {
    fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError>;
}

#[derive(Debug, Deserialize)]
struct ParseReply {
    amount: f64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

/// Extracts a candidate transaction from free text. The result still has to go
/// through normalization before it is stored.
pub fn parse_free_text(generator: &impl TextGenerator, text: &str) -> Option<TransactionDraft> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match try_parse(generator, text) {
        Ok(draft) => Some(draft),
        Err(err) => {
            tracing::warn!("free-text parse failed: {err}");
            None
        }
    }
}

fn try_parse(generator: &impl TextGenerator, text: &str) -> Result<TransactionDraft, AiError> {
    tracing::debug!(chars = text.len(), "requesting free-text parse");
    let raw = generator.generate_json(&prompt::parse_prompt(text), &prompt::parse_schema())?;
    let reply: ParseReply = serde_json::from_str(strip_code_fence(&raw))?;

    let kind = reply.kind.trim().to_ascii_lowercase();
    if kind != "income" && kind != "expense" {
        return Err(AiError::Schema(format!("unknown type '{}'", reply.kind)));
    }
    if !reply.amount.is_finite() {
        return Err(AiError::Schema("amount is not a finite number".into()));
    }

    Ok(TransactionDraft {
        date: None,
        amount: Some(reply.amount.to_string()),
        category: reply.category.filter(|c| !c.trim().is_empty()),
        r#type: Some(kind),
        note: reply.note,
    })
}

/// Summarizes the most recent spending. `transactions` is newest first, as the
/// ledger stores it. An empty list returns `None` without contacting the service.
pub fn analyze(generator: &impl TextGenerator, transactions: &[Transaction]) -> Option<Analysis> {
    if transactions.is_empty() {
        return None;
    }
    match try_analyze(generator, transactions) {
        Ok(analysis) => Some(analysis),
        Err(err) => {
            tracing::warn!("spending analysis failed: {err}");
            None
        }
    }
}

fn try_analyze(
    generator: &impl TextGenerator,
    transactions: &[Transaction],
) -> Result<Analysis, AiError> {
    let window = &transactions[..transactions.len().min(ANALYSIS_WINDOW)];
    tracing::debug!(count = window.len(), "requesting spending analysis");
    let lines = prompt::transaction_lines(window.iter().rev());
    let raw = generator.generate_json(
        &prompt::analysis_prompt(&lines),
        &prompt::analysis_schema(),
    )?;
    let analysis: Analysis = serde_json::from_str(strip_code_fence(&raw))?;
    Ok(analysis)
}

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("fence pattern is valid")
});

/// Models sometimes wrap JSON in a markdown fence even when asked not to.
pub fn strip_code_fence(raw: &str) -> &str {
    match FENCE.captures(raw).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => raw.trim(),
    }
}
