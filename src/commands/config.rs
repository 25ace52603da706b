// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{init_config, Config};
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, effective: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("init", _)) => {
            if init_config(path)? {
                println!("Wrote {}", path.display());
            } else {
                println!("Config already exists: {}", path.display());
            }
        }
        Some(("show", _)) => println!("{}", render(effective)?),
        Some(("path", _)) => println!("{}", path.display()),
        _ => {}
    }
    Ok(())
}

/// TOML view of the config with the API key masked.
pub fn render(cfg: &Config) -> Result<String> {
    let mut shown = cfg.clone();
    shown.ai.api_key = shown.ai.api_key.map(|k| mask(&k));
    Ok(toml::to_string_pretty(&shown)?)
}

fn mask(key: &str) -> String {
    let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", tail)
    }
}
