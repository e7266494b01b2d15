// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreadsheet-style row store.
//!
//! Rows are addressed the way a sheet addresses them: row 1 is the header,
//! data starts at row 2, and deleting a row shifts everything below it up.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::SheetError;
use crate::logging::{log_action_failure, log_expense_action};
use crate::models::{Currency, ParsedExpense, SheetRow};
use crate::utils::SHEET_DATE_FORMAT;

/// First data row; row 1 holds the header.
pub const FIRST_DATA_ROW: usize = 2;

pub trait ExpenseSheet {
    /// Append a row and return its row number.
    fn append_row(&self, expense: &ParsedExpense, at: DateTime<FixedOffset>) -> Result<usize>;
    /// Last `n` rows, newest first.
    fn last_rows(&self, n: usize) -> Result<Vec<SheetRow>>;
    fn row(&self, row_number: usize) -> Result<Option<SheetRow>>;
    /// Rewrite everything except the date.
    fn update_row(&self, row_number: usize, expense: &ParsedExpense) -> Result<()>;
    fn delete_row(&self, row_number: usize) -> Result<()>;
    /// Every row in sheet order.
    fn all_rows(&self) -> Result<Vec<SheetRow>>;
}

pub struct SqliteSheet<'c> {
    conn: &'c Connection,
}

const NUMBERED_ROWS: &str = "SELECT rn, date, amount, currency, raw_text, source FROM (
        SELECT ROW_NUMBER() OVER (ORDER BY id) + 1 AS rn, date, amount, currency, raw_text, source
        FROM expenses
    )";

fn sheet_row(r: &Row<'_>) -> rusqlite::Result<SheetRow> {
    let rn: i64 = r.get(0)?;
    let amount: i64 = r.get(2)?;
    Ok(SheetRow {
        row_number: rn as usize,
        date: r.get(1)?,
        amount: amount.to_string(),
        currency: r.get(3)?,
        description: r.get(4)?,
        source: r.get(5)?,
    })
}

/// Columns D and E: only RUB rows carry a rate and a ruble value.
fn fx_columns(expense: &ParsedExpense) -> (String, String) {
    if expense.currency() == Currency::Rub {
        ("1".to_string(), expense.amount().to_string())
    } else {
        (String::new(), String::new())
    }
}

impl<'c> SqliteSheet<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn id_for_row(&self, row_number: usize) -> Result<Option<i64>> {
        if row_number < FIRST_DATA_ROW {
            return Ok(None);
        }
        let offset = (row_number - FIRST_DATA_ROW) as i64;
        let id = self
            .conn
            .query_row(
                "SELECT id FROM expenses ORDER BY id LIMIT 1 OFFSET ?1",
                params![offset],
                |r| r.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn require_row(&self, row_number: usize) -> Result<i64> {
        self.id_for_row(row_number)?
            .ok_or_else(|| SheetError::RowNotFound(row_number).into())
    }

    fn query_rows(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<SheetRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, sheet_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }
}

impl ExpenseSheet for SqliteSheet<'_> {
    fn append_row(&self, expense: &ParsedExpense, at: DateTime<FixedOffset>) -> Result<usize> {
        let (fx, rub) = fx_columns(expense);
        let res = self
            .conn
            .execute(
                "INSERT INTO expenses(
                     date, amount, currency, fx, rub, category, subcategory, raw_text, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, '', '', ?6, ?7)",
                params![
                    at.format(SHEET_DATE_FORMAT).to_string(),
                    expense.amount() as i64,
                    expense.currency().code(),
                    fx,
                    rub,
                    expense.raw_text(),
                    expense.source().label(),
                ],
            )
            .context("Append expense row")
            .and_then(|_| {
                let count: i64 =
                    self.conn
                        .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?;
                Ok(count as usize + FIRST_DATA_ROW - 1)
            });
        match res {
            Ok(row) => {
                log_expense_action("add", row, expense);
                Ok(row)
            }
            Err(e) => {
                log_action_failure("add", None, &e);
                Err(e)
            }
        }
    }

    fn last_rows(&self, n: usize) -> Result<Vec<SheetRow>> {
        let sql = format!("{NUMBERED_ROWS} ORDER BY rn DESC LIMIT ?1");
        self.query_rows(&sql, params![n as i64])
    }

    fn row(&self, row_number: usize) -> Result<Option<SheetRow>> {
        let sql = format!("{NUMBERED_ROWS} WHERE rn = ?1");
        Ok(self
            .query_rows(&sql, params![row_number as i64])?
            .into_iter()
            .next())
    }

    fn update_row(&self, row_number: usize, expense: &ParsedExpense) -> Result<()> {
        let res = self.require_row(row_number).and_then(|id| {
            let (fx, rub) = fx_columns(expense);
            self.conn
                .execute(
                    "UPDATE expenses SET amount=?1, currency=?2, fx=?3, rub=?4,
                     category='', subcategory='',
                     raw_text=?5, source=?6 WHERE id=?7",
                    params![
                        expense.amount() as i64,
                        expense.currency().code(),
                        fx,
                        rub,
                        expense.raw_text(),
                        expense.source().label(),
                        id
                    ],
                )
                .with_context(|| format!("Update row {}", row_number))?;
            Ok(())
        });
        match &res {
            Ok(()) => log_expense_action("update", row_number, expense),
            Err(e) => log_action_failure("update", Some(row_number), e),
        }
        res
    }

    fn delete_row(&self, row_number: usize) -> Result<()> {
        let res = self.require_row(row_number).and_then(|id| {
            self.conn
                .execute("DELETE FROM expenses WHERE id=?1", params![id])
                .with_context(|| format!("Delete row {}", row_number))?;
            Ok(())
        });
        match &res {
            Ok(()) => {
                tracing::info!(action = "delete", row = row_number, "expense action executed")
            }
            Err(e) => log_action_failure("delete", Some(row_number), e),
        }
        res
    }

    fn all_rows(&self) -> Result<Vec<SheetRow>> {
        let sql = format!("{NUMBERED_ROWS} ORDER BY rn");
        self.query_rows(&sql, [])
    }
}
