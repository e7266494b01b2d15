// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::SheetRow;

pub const MAIN_MENU_BUTTON: &str = "Посмотреть последние записи";

/// Inline button payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    Home,
    BackToList,
    SelectRow(usize),
    EditRow(usize),
    DeleteRow(usize),
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Home => f.write_str("home"),
            Callback::BackToList => f.write_str("back_to_list"),
            Callback::SelectRow(n) => write!(f, "select_row:{n}"),
            Callback::EditRow(n) => write!(f, "edit_row:{n}"),
            Callback::DeleteRow(n) => write!(f, "delete_row:{n}"),
        }
    }
}

impl FromStr for Callback {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "home" => return Ok(Callback::Home),
            "back_to_list" => return Ok(Callback::BackToList),
            _ => {}
        }
        let (action, row) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("Unknown callback '{}'", s))?;
        let row: usize = row
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid row in callback '{}'", s))?;
        match action {
            "select_row" => Ok(Callback::SelectRow(row)),
            "edit_row" => Ok(Callback::EditRow(row)),
            "delete_row" => Ok(Callback::DeleteRow(row)),
            _ => Err(anyhow!("Unknown callback '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub label: String,
    pub data: String,
}

impl InlineButton {
    fn new(label: impl Into<String>, cb: Callback) -> Self {
        Self {
            label: label.into(),
            data: cb.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Keyboard {
    #[default]
    None,
    /// Persistent reply keyboard; pressing a button sends its label as text.
    Main(Vec<Vec<String>>),
    Inline(Vec<Vec<InlineButton>>),
}

pub fn main_keyboard() -> Keyboard {
    Keyboard::Main(vec![vec![MAIN_MENU_BUTTON.to_string()]])
}

pub fn last_rows_keyboard(rows: &[SheetRow]) -> Keyboard {
    let mut kb: Vec<Vec<InlineButton>> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![InlineButton::new(
                format!("Запись {}", i + 1),
                Callback::SelectRow(r.row_number),
            )]
        })
        .collect();
    kb.push(vec![InlineButton::new("🏠 В начало", Callback::Home)]);
    Keyboard::Inline(kb)
}

pub fn row_action_keyboard(row_number: usize) -> Keyboard {
    Keyboard::Inline(vec![
        vec![InlineButton::new("✏️ Редактировать", Callback::EditRow(row_number))],
        vec![InlineButton::new("🗑 Удалить", Callback::DeleteRow(row_number))],
        vec![InlineButton::new("🔙 Назад", Callback::BackToList)],
        vec![InlineButton::new("🏠 В начало", Callback::Home)],
    ])
}

pub fn edit_keyboard(row_number: usize) -> Keyboard {
    Keyboard::Inline(vec![
        vec![InlineButton::new("🔙 Назад", Callback::SelectRow(row_number))],
        vec![InlineButton::new("🏠 В начало", Callback::Home)],
    ])
}
