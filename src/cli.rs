// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(
            arg!(--jsonl "Print as JSON lines")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
}

pub fn build_cli() -> Command {
    Command::new("smart-ledger")
        .about("Track income and expenses with monthly and yearly summaries")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the local data store"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .about("Add a transaction; missing fields get defaults")
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to today"))
                        .arg(
                            arg!(--amount <AMOUNT> "Amount as a positive number")
                                .allow_hyphen_values(true),
                        )
                        .arg(arg!(--category <CATEGORY> "Category label"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .help("income or expense (default expense)"),
                        )
                        .arg(arg!(--note <NOTE> "Free-form note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(arg!(--month <MONTH> "Only YYYY-MM"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .value_parser(["income", "expense"])
                                .help("Only income or expense"),
                        )
                        .arg(
                            arg!(--limit <N> "At most N rows")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction by id")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Income, expense, balance and spending by category for a month")
                .arg(arg!(--month <MONTH> "YYYY-MM, defaults to the current month")),
        ))
        .subcommand(json_flags(
            Command::new("report")
                .about("Month-by-month totals and category ranking for a year")
                .arg(arg!(--year <YEAR> "YYYY, defaults to the current year")),
        ))
        .subcommand(
            Command::new("ai")
                .about("AI-assisted entry and analysis")
                .subcommand(
                    Command::new("parse")
                        .about("Turn a sentence into a transaction and record it")
                        .arg(
                            Arg::new("text")
                                .required(true)
                                .num_args(1..),
                        )
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to today")),
                )
                .subcommand(
                    Command::new("analyze").about("Summarize recent spending with recommendations"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or create the config file")
                .subcommand(Command::new("init").about("Write a default config file"))
                .subcommand(Command::new("show").about("Print the effective config"))
                .subcommand(Command::new("path").about("Print the config file location")),
        )
}
