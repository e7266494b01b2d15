// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{all_settings, pretty_table, set_setting};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").context("key missing")?;
            let value = sub.get_one::<String>("value").context("value missing")?;
            set_setting(conn, key, value)?;
            println!("Set {} = {}", key.trim(), value.trim());
        }
        _ => {
            let rows = all_settings(conn)?
                .into_iter()
                .map(|(k, v)| vec![k, v])
                .collect();
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
    }
    Ok(())
}
