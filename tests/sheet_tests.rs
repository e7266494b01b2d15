// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{FixedOffset, TimeZone};
use rusqlite::Connection;
use spendbot::db;
use spendbot::parser::parse;
use spendbot::sheet::{ExpenseSheet, SqliteSheet};
use spendbot::SheetError;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn at(hour: u32, minute: u32) -> chrono::DateTime<FixedOffset> {
    FixedOffset::east_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 12, 4, hour, minute, 0)
        .unwrap()
}

#[test]
fn append_returns_sheet_row_numbers() {
    let conn = setup();
    let sheet = SqliteSheet::new(&conn);
    let r1 = sheet.append_row(&parse("кофе 250").unwrap(), at(9, 0)).unwrap();
    let r2 = sheet.append_row(&parse("такси 500 тбанк").unwrap(), at(9, 30)).unwrap();
    assert_eq!(r1, 2);
    assert_eq!(r2, 3);
}

#[test]
fn append_writes_sheet_columns() {
    let conn = setup();
    let sheet = SqliteSheet::new(&conn);
    sheet
        .append_row(&parse("кофе 250 нал").unwrap(), at(15, 30))
        .unwrap();
    sheet
        .append_row(&parse("подарок 30 usd").unwrap(), at(16, 0))
        .unwrap();

    let (date, fx, rub, raw): (String, String, String, String) = conn
        .query_row(
            "SELECT date, fx, rub, raw_text FROM expenses ORDER BY id LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(date, "04.12.2024 15:30");
    assert_eq!(fx, "1");
    assert_eq!(rub, "250");
    assert_eq!(raw, "кофе 250 нал");

    let (fx, rub): (String, String) = conn
        .query_row(
            "SELECT fx, rub FROM expenses ORDER BY id DESC LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(fx, "");
    assert_eq!(rub, "");
}

#[test]
fn last_rows_are_newest_first() {
    let conn = setup();
    let sheet = SqliteSheet::new(&conn);
    for (i, text) in ["a 1", "b 2", "c 3", "d 4", "e 5"].iter().enumerate() {
        sheet
            .append_row(&parse(text).unwrap(), at(10, i as u32))
            .unwrap();
    }
    let rows = sheet.last_rows(3).unwrap();
    let numbers: Vec<usize> = rows.iter().map(|r| r.row_number).collect();
    assert_eq!(numbers, vec![6, 5, 4]);
    assert_eq!(rows[0].description, "e 5");
    assert_eq!(rows[0].amount, "5");
    assert_eq!(rows[0].currency, "RUB");
    assert_eq!(rows[0].source, "Cash");
}

#[test]
fn empty_sheet_lists_nothing() {
    let conn = setup();
    let sheet = SqliteSheet::new(&conn);
    assert!(sheet.last_rows(4).unwrap().is_empty());
    assert!(sheet.all_rows().unwrap().is_empty());
    assert!(sheet.row(2).unwrap().is_none());
}

#[test]
fn update_keeps_date_and_replaces_fields() {
    let conn = setup();
    let sheet = SqliteSheet::new(&conn);
    sheet.append_row(&parse("кофе 250").unwrap(), at(8, 15)).unwrap();

    sheet
        .update_row(2, &parse("обед 30 usd сбер").unwrap())
        .unwrap();

    let row = sheet.row(2).unwrap().unwrap();
    assert_eq!(row.date, "04.12.2024 08:15");
    assert_eq!(row.amount, "30");
    assert_eq!(row.currency, "USD");
    assert_eq!(row.source, "Sber");
    assert_eq!(row.description, "обед 30 usd сбер");

    let (fx, rub): (String, String) = conn
        .query_row("SELECT fx, rub FROM expenses", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!((fx.as_str(), rub.as_str()), ("", ""));
}

#[test]
fn delete_shifts_later_rows_up() {
    let conn = setup();
    let sheet = SqliteSheet::new(&conn);
    for text in ["a 1", "b 2", "c 3"] {
        sheet.append_row(&parse(text).unwrap(), at(12, 0)).unwrap();
    }
    sheet.delete_row(3).unwrap();

    let rows = sheet.all_rows().unwrap();
    let view: Vec<(usize, &str)> = rows
        .iter()
        .map(|r| (r.row_number, r.description.as_str()))
        .collect();
    assert_eq!(view, vec![(2, "a 1"), (3, "c 3")]);
}

#[test]
fn missing_rows_are_reported() {
    let conn = setup();
    let sheet = SqliteSheet::new(&conn);
    sheet.append_row(&parse("a 1").unwrap(), at(12, 0)).unwrap();

    for row in [0, 1, 3, 99] {
        let err = sheet.delete_row(row).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<SheetError>(),
                Some(SheetError::RowNotFound(n)) if *n == row
            ),
            "row {row}: {err}"
        );
    }
    let err = sheet.update_row(5, &parse("b 2").unwrap()).unwrap_err();
    assert!(err.to_string().contains("row 5 not found"));
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn failed_append_logs_without_row() {
    let conn = setup();
    conn.execute_batch("DROP TABLE expenses").unwrap();
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let sheet = SqliteSheet::new(&conn);
        assert!(sheet.append_row(&parse("a 1").unwrap(), at(12, 0)).is_err());
    });

    let out = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(out.contains("expense action failed"), "{out}");
    assert!(out.contains("action=\"add\""), "{out}");
    assert!(!out.contains("row="), "{out}");
}
