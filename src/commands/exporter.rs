// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::sheet::{ExpenseSheet, SqliteSheet};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").context("out missing")?.trim();

    let rows = SqliteSheet::new(conn).all_rows()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["row", "date", "amount", "currency", "source", "text"])?;
            for r in &rows {
                wtr.write_record([
                    r.row_number.to_string().as_str(),
                    r.date.as_str(),
                    r.amount.as_str(),
                    r.currency.as_str(),
                    r.source.as_str(),
                    r.description.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "row": r.row_number,
                        "date": r.date,
                        "amount": r.amount,
                        "currency": r.currency,
                        "source": r.source,
                        "text": r.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} rows to {}", rows.len(), out);
    Ok(())
}
