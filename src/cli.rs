// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn text_arg() -> Arg {
    Arg::new("text")
        .help("Expense message, e.g. `такси 500 тбанк` (`--` before words like `-x`)")
        .required(true)
        .num_args(1..)
        .allow_negative_numbers(true)
}

fn row_arg() -> Arg {
    Arg::new("row")
        .long("row")
        .help("Sheet row number (data starts at row 2)")
        .required(true)
        .value_parser(value_parser!(usize))
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendbot")
        .version(clap::crate_version!())
        .about("Log expenses from free-text messages")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("SPENDBOT_DB")
                .value_name("PATH")
                .help("SQLite file (defaults to the platform data dir)"),
        )
        .subcommand(json_flags(
            Command::new("parse")
                .about("Parse a message without saving it")
                .arg(text_arg()),
        ))
        .subcommand(
            Command::new("add")
                .about("Parse a message and append it")
                .arg(text_arg()),
        )
        .subcommand(json_flags(
            Command::new("last").about("Show the most recent rows").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Replace a row with a newly parsed message")
                .arg(row_arg())
                .arg(text_arg()),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a row")
                .arg(row_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Export all rows")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("chat")
                .about("Interactive bot session on stdin/stdout")
                .arg(
                    Arg::new("user")
                        .long("user")
                        .default_value("1")
                        .value_parser(value_parser!(i64)),
                ),
        )
}
