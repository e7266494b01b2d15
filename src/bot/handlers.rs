// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use rusqlite::Connection;
use serde::Serialize;
use tracing::{info, warn};

use super::keyboards::{
    Callback, Keyboard, MAIN_MENU_BUTTON, edit_keyboard, last_rows_keyboard, main_keyboard,
    row_action_keyboard,
};
use super::session::{Session, SessionStore, UserId};
use crate::models::{ParsedExpense, SheetRow};
use crate::parser;
use crate::sheet::ExpenseSheet;
use crate::utils::{
    DEFAULT_LAST_ROWS, DEFAULT_UTC_OFFSET_HOURS, last_rows_limit, short_date, utc_offset,
};

const GREETING: &str = "👋 Привет! Я бот для учета расходов.\n\
    Просто отправь мне сумму и описание, например:\n\
    продукты 500 тбанк\n";

const MAIN_MENU: &str = "🏠 Главное меню\n\n\
    Просто отправь мне сумму и описание, например: продукты 500 тбанк.";

const ROW_NOT_FOUND: &str = "⚠️ Запись не найдена. Обновите список.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::None,
        }
    }

    fn with(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BotConfig {
    /// Offset applied to message timestamps before they are written.
    pub utc_offset: FixedOffset,
    /// How many rows `/last` shows.
    pub last_rows: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .unwrap_or_else(|| Utc.fix()),
            last_rows: DEFAULT_LAST_ROWS,
        }
    }
}

impl BotConfig {
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Self {
            utc_offset: utc_offset(conn)?,
            last_rows: last_rows_limit(conn)?,
        })
    }
}

fn help_text(last_rows: usize) -> String {
    format!(
        "🤖 Справка по командам:\n\n\
         📝 Добавление расхода:\n\
         Просто напишите сообщение, например:\n\
         • продукты 500\n\
         • такси 300 сбер\n\
         • 30 usd подарок\n\n\
         🎛 Меню:\n\
         • {MAIN_MENU_BUTTON} — список последних {last_rows} записей с возможностью \
         редактирования и удаления.\n\n\
         🛠 Команды:\n\
         /start — Перезапуск и показ меню\n\
         /help — Эта справка\n\
         /last — Показать последние записи\n\
         /cancel — Отменить редактирование"
    )
}

fn row_line(r: &SheetRow) -> String {
    format!(
        "{} {} {} {} ({})",
        short_date(&r.date),
        r.amount,
        r.currency,
        r.source,
        r.description
    )
}

fn render_list(rows: &[SheetRow]) -> String {
    let mut msg = String::from("📋 Последние записи:\n\n");
    for (i, r) in rows.iter().enumerate() {
        msg.push_str(&format!("{}. {}\n", i + 1, row_line(r)));
    }
    msg
}

fn added_text(e: &ParsedExpense) -> String {
    format!(
        "✅ Добавлено: {} | {} {} | {}",
        e.description(),
        e.amount(),
        e.currency(),
        e.source()
    )
}

fn updated_text(row_number: usize, e: &ParsedExpense) -> String {
    format!(
        "✅ Обновлено (стр. {}):\n{} - {} {} - {}",
        row_number,
        e.description(),
        e.amount(),
        e.currency(),
        e.source()
    )
}

/// Transport-agnostic conversation handler: text and button presses in,
/// replies out. Sheet writes go through `S`.
pub struct Bot<S> {
    sheet: S,
    config: BotConfig,
    sessions: SessionStore,
}

impl<S: ExpenseSheet> Bot<S> {
    pub fn new(sheet: S, config: BotConfig) -> Self {
        Self {
            sheet,
            config,
            sessions: SessionStore::default(),
        }
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    pub fn session(&self, user: UserId) -> Option<&Session> {
        self.sessions.get(user)
    }

    pub fn handle_message(&mut self, user: UserId, text: &str, at: DateTime<Utc>) -> Reply {
        let trimmed = text.trim();
        if trimmed == MAIN_MENU_BUTTON {
            return self.last(user);
        }
        if trimmed.starts_with('/') {
            return self.command(user, trimmed);
        }
        match self.sessions.editing_row(user) {
            Some(row) => self.apply_edit(user, row, text),
            None => self.add(text, at),
        }
    }

    pub fn handle_callback(&mut self, user: UserId, data: &str) -> Reply {
        let cb: Callback = match data.parse() {
            Ok(cb) => cb,
            Err(e) => {
                warn!(error = %e, "unknown callback");
                return Reply::text("⚠️ Неизвестное действие.");
            }
        };
        match cb {
            Callback::Home => {
                self.sessions.reset(user);
                Reply::text(MAIN_MENU)
            }
            Callback::BackToList => match self.fetch_rows(user) {
                Ok(rows) if rows.is_empty() => Reply::with("📋 Список пуст.", main_keyboard()),
                Ok(rows) => Reply::with(render_list(&rows), last_rows_keyboard(&rows)),
                Err(e) => Reply::text(format!("❌ Ошибка: {e}")),
            },
            Callback::SelectRow(row) => self.select(user, row),
            Callback::EditRow(row) => self.start_edit(user, row),
            Callback::DeleteRow(row) => self.delete(user, row),
        }
    }

    fn command(&mut self, user: UserId, cmd: &str) -> Reply {
        // "/last@bot args" -> "/last"
        let name = cmd
            .split_whitespace()
            .next()
            .unwrap_or(cmd)
            .split('@')
            .next()
            .unwrap_or(cmd);
        info!(command = name, "command received");
        match name {
            "/start" => Reply::with(GREETING, main_keyboard()),
            "/help" => Reply::text(help_text(self.config.last_rows)),
            "/last" => self.last(user),
            "/cancel" => {
                self.sessions.finish_editing(user);
                Reply::with("❌ Отменено.", main_keyboard())
            }
            _ => Reply::text("Неизвестная команда. /help — справка"),
        }
    }

    fn add(&mut self, text: &str, at: DateTime<Utc>) -> Reply {
        let expense = match parser::parse(text) {
            Ok(e) => e,
            Err(e) => {
                warn!(reason = %e, "parse failed");
                return Reply::text(format!("⚠️ {}", e.prompt()));
            }
        };
        let stamped = at.with_timezone(&self.config.utc_offset);
        match self.sheet.append_row(&expense, stamped) {
            Ok(_) => Reply::with(added_text(&expense), main_keyboard()),
            Err(e) => Reply::text(format!("❌ Системная ошибка: {e}")),
        }
    }

    fn apply_edit(&mut self, user: UserId, row: usize, text: &str) -> Reply {
        let expense = match parser::parse(text) {
            Ok(e) => e,
            Err(e) => {
                warn!(row, reason = %e, "parse failed while editing");
                return Reply::text(format!("⚠️ {}", e.prompt()));
            }
        };
        self.sessions.finish_editing(user);
        match self.sheet.update_row(row, &expense) {
            Ok(()) => {
                self.sessions.forget_rows(user);
                Reply::with(updated_text(row, &expense), main_keyboard())
            }
            Err(e) => Reply::text(format!("❌ Ошибка: {e}")),
        }
    }

    fn fetch_rows(&mut self, user: UserId) -> Result<Vec<SheetRow>> {
        let rows = self.sheet.last_rows(self.config.last_rows)?;
        self.sessions.cache_rows(user, rows.clone());
        Ok(rows)
    }

    fn last(&mut self, user: UserId) -> Reply {
        match self.fetch_rows(user) {
            Ok(rows) if rows.is_empty() => {
                info!("last rows requested, sheet is empty");
                Reply::with("📋 Список пуст.", main_keyboard())
            }
            Ok(rows) => {
                info!(count = rows.len(), "last rows shown");
                Reply::with(render_list(&rows), last_rows_keyboard(&rows))
            }
            Err(e) => Reply::text(format!("❌ Ошибка получения данных: {e}")),
        }
    }

    /// Row from the last rendered list, falling back to a fresh fetch.
    fn lookup(&mut self, user: UserId, row: usize) -> Result<Option<SheetRow>> {
        if self.sessions.cached_rows(user).is_empty() {
            self.fetch_rows(user)?;
        }
        Ok(self
            .sessions
            .cached_rows(user)
            .iter()
            .find(|r| r.row_number == row)
            .cloned())
    }

    fn select(&mut self, user: UserId, row: usize) -> Reply {
        match self.lookup(user, row) {
            Ok(Some(r)) => Reply::with(
                format!(
                    "🔍 Детали записи (стр. {}):\n\n{}\n\nИсходный текст: {}",
                    row,
                    row_line(&r),
                    r.description
                ),
                row_action_keyboard(row),
            ),
            Ok(None) => Reply::text(ROW_NOT_FOUND),
            Err(e) => Reply::text(format!("❌ Ошибка: {e}")),
        }
    }

    fn start_edit(&mut self, user: UserId, row: usize) -> Reply {
        let original = match self.lookup(user, row) {
            Ok(Some(r)) => r.description,
            Ok(None) => return Reply::text(ROW_NOT_FOUND),
            Err(e) => return Reply::text(format!("❌ Ошибка: {e}")),
        };
        self.sessions.start_editing(user, row);
        Reply::with(
            format!(
                "✏️ Редактирование строки {}\n\nИсходный текст: {}\n\n\
                 Отправьте новый текст записи:",
                row, original
            ),
            edit_keyboard(row),
        )
    }

    fn delete(&mut self, user: UserId, row: usize) -> Reply {
        match self.sheet.delete_row(row) {
            Ok(()) => {
                // later rows shifted up; cached and pending row numbers are stale
                self.sessions.forget_rows(user);
                self.sessions.finish_editing(user);
                Reply::text("✅ Запись удалена.")
            }
            Err(e) => Reply::text(format!("❌ Ошибка удаления: {e}")),
        }
    }
}
