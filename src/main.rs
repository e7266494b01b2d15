// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::io;
use std::path::PathBuf;

use spendbot::{cli, commands, db, logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let level = match matches.subcommand_name() {
        Some("chat") => "info",
        _ => "warn",
    };
    logging::init(level);

    if let Some(("parse", sub)) = matches.subcommand() {
        return commands::expenses::parse(sub, &mut io::stdout().lock());
    }

    let db_path = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(db_path.as_deref())?;

    match matches.subcommand() {
        Some(("add", sub)) => {
            commands::expenses::add(&conn, sub)?;
        }
        Some(("last", sub)) => commands::expenses::last(&conn, sub, &mut io::stdout().lock())?,
        Some(("edit", sub)) => commands::expenses::edit(&conn, sub)?,
        Some(("rm", sub)) => commands::expenses::remove(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("chat", sub)) => commands::chat::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
