// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use smart_ledger::{ai::GeminiClient, cli, commands, config, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = config::load_config()?;
    logging::init(&cfg.log.level);

    match matches.subcommand() {
        Some(("init", _)) => {
            db::open_or_init()?;
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&db::open_or_init()?, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&db::open_or_init()?, sub)?,
        Some(("report", sub)) => commands::report::handle(&db::open_or_init()?, sub)?,
        Some(("ai", sub)) => {
            let conn = db::open_or_init()?;
            let client = GeminiClient::new(&cfg.ai)?;
            commands::ai::handle(&conn, sub, &client)?;
        }
        Some(("config", sub)) => commands::config::handle(&config::config_path()?, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
