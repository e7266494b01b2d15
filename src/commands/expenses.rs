// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ParsedExpense, SheetRow};
use crate::parser;
use crate::sheet::{ExpenseSheet, SqliteSheet};
use crate::utils::{last_rows_limit, maybe_print_json, pretty_table, utc_offset};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use std::io::Write;

/// Positional words joined back into one message.
pub fn message_text(sub: &clap::ArgMatches) -> String {
    sub.get_many::<String>("text")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn parse_message(sub: &clap::ArgMatches) -> Result<ParsedExpense> {
    let text = message_text(sub);
    parser::parse(&text).with_context(|| format!("Could not parse '{}'", text))
}

pub fn parse<W: Write>(sub: &clap::ArgMatches, out: &mut W) -> Result<()> {
    let expense = parse_message(sub)?;
    if !maybe_print_json(out, sub.get_flag("json"), sub.get_flag("jsonl"), &expense)? {
        let rows = vec![
            vec!["Amount".to_string(), expense.amount().to_string()],
            vec!["Currency".to_string(), expense.currency().to_string()],
            vec!["Source".to_string(), expense.source().to_string()],
            vec!["Description".to_string(), expense.description().to_string()],
        ];
        writeln!(out, "{}", pretty_table(&["Field", "Value"], rows))?;
    }
    Ok(())
}

/// Parse and append; returns the new row number.
pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<usize> {
    let expense = parse_message(sub)?;
    let at = Utc::now().with_timezone(&utc_offset(conn)?);
    let row = SqliteSheet::new(conn).append_row(&expense, at)?;
    println!(
        "Added row {}: {} | {} {} | {}",
        row,
        expense.description(),
        expense.amount(),
        expense.currency(),
        expense.source()
    );
    Ok(row)
}

pub fn query_last(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<SheetRow>> {
    let limit = match sub.get_one::<usize>("limit") {
        Some(n) => *n,
        None => last_rows_limit(conn)?,
    };
    SqliteSheet::new(conn).last_rows(limit)
}

pub fn last<W: Write>(conn: &Connection, sub: &clap::ArgMatches, out: &mut W) -> Result<()> {
    let data = query_last(conn, sub)?;
    if !maybe_print_json(out, sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            writeln!(out, "No rows yet.")?;
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.row_number.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.source.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        writeln!(
            out,
            "{}",
            pretty_table(&["Row", "Date", "Amount", "CCY", "Source", "Text"], rows)
        )?;
    }
    Ok(())
}

pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let row = *sub.get_one::<usize>("row").context("row missing")?;
    let expense = parse_message(sub)?;
    SqliteSheet::new(conn).update_row(row, &expense)?;
    println!(
        "Updated row {}: {} - {} {} - {}",
        row,
        expense.description(),
        expense.amount(),
        expense.currency(),
        expense.source()
    );
    Ok(())
}

pub fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let row = *sub.get_one::<usize>("row").context("row missing")?;
    SqliteSheet::new(conn).delete_row(row)?;
    println!("Removed row {}", row);
    Ok(())
}
