// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use std::io::Write;

/// Date format of column A.
pub const SHEET_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 5;
pub const DEFAULT_LAST_ROWS: usize = 4;

/// Settings keys with their defaults.
pub const SETTINGS: &[(&str, &str)] = &[("utc_offset_hours", "5"), ("last_rows", "4")];

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Write `v` as pretty JSON or JSON lines when the matching flag is set.
/// Returns `false` when neither flag is set and nothing was written.
pub fn maybe_print_json<W: Write, T: serde::Serialize>(
    out: &mut W,
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        writeln!(out, "{}", serde_json::to_string_pretty(v)?)?;
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                writeln!(out, "{}", serde_json::to_string(item)?)?;
            }
        } else {
            writeln!(out, "{}", serde_json::to_string(&val)?)?;
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// Validate and store a setting. Unknown keys and out-of-range values are rejected.
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let key = key.trim();
    let value = value.trim();
    match key {
        "utc_offset_hours" => {
            parse_utc_offset(value)?;
        }
        "last_rows" => {
            parse_last_rows(value)?;
        }
        _ => return Err(anyhow!("Unknown setting '{}'", key)),
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn parse_utc_offset(s: &str) -> Result<i32> {
    let hours: i32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid UTC offset '{}', expected whole hours", s))?;
    if !(-12..=14).contains(&hours) {
        return Err(anyhow!("UTC offset {} out of range -12..=14", hours));
    }
    Ok(hours)
}

fn parse_last_rows(s: &str) -> Result<usize> {
    let n: usize = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid row count '{}'", s))?;
    if !(1..=50).contains(&n) {
        return Err(anyhow!("Row count {} out of range 1..=50", n));
    }
    Ok(n)
}

pub fn utc_offset(conn: &Connection) -> Result<FixedOffset> {
    let hours = match get_setting(conn, "utc_offset_hours")? {
        Some(v) => parse_utc_offset(&v)?,
        None => DEFAULT_UTC_OFFSET_HOURS,
    };
    FixedOffset::east_opt(hours * 3600).ok_or_else(|| anyhow!("Invalid UTC offset {}", hours))
}

pub fn last_rows_limit(conn: &Connection) -> Result<usize> {
    match get_setting(conn, "last_rows")? {
        Some(v) => parse_last_rows(&v),
        None => Ok(DEFAULT_LAST_ROWS),
    }
}

/// Current value of every known setting, defaults filled in.
pub fn all_settings(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for (key, default) in SETTINGS {
        let v = get_setting(conn, key)?.unwrap_or_else(|| default.to_string());
        out.push((key.to_string(), v));
    }
    Ok(out)
}

/// `DD.MM.YYYY HH:MM` -> `HH:MM DD/MM`; anything else is shown as-is.
pub fn short_date(sheet_date: &str) -> String {
    match NaiveDateTime::parse_from_str(sheet_date, SHEET_DATE_FORMAT) {
        Ok(dt) => dt.format("%H:%M %d/%m").to_string(),
        Err(_) => sheet_date.to_string(),
    }
}
