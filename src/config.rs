// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "SMART_LEDGER_API_KEY";
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "SMART_LEDGER_MODEL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSection {
    /// Not checked locally; a missing key shows up as a failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Environment variables win over the file.
    pub fn apply_env(mut self) -> Self {
        let key = std::env::var(API_KEY_ENV)
            .or_else(|_| std::env::var(GEMINI_KEY_ENV))
            .ok()
            .filter(|k| !k.trim().is_empty());
        if key.is_some() {
            self.ai.api_key = key;
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.ai.model = model.trim().to_string();
            }
        }
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(crate::db::config_dir()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let cfg = load_config_from(&config_path()?)?;
    Ok(cfg.apply_env())
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Writes a default config unless one exists. Returns true when a file was written.
pub fn init_config(p: &Path) -> Result<bool> {
    if p.exists() {
        return Ok(false);
    }
    save_config(p, &Config::default())?;
    Ok(true)
}
