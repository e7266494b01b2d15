// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::models::SheetRow;

pub type UserId = i64;

/// Per-user conversation state between messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Row whose replacement text we are waiting for.
    pub editing_row: Option<usize>,
    /// Rows from the last rendered list.
    pub last_rows: Vec<SheetRow>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<UserId, Session>,
}

impl SessionStore {
    pub fn get(&self, user: UserId) -> Option<&Session> {
        self.sessions.get(&user)
    }

    fn entry(&mut self, user: UserId) -> &mut Session {
        self.sessions.entry(user).or_default()
    }

    pub fn editing_row(&self, user: UserId) -> Option<usize> {
        self.get(user).and_then(|s| s.editing_row)
    }

    pub fn start_editing(&mut self, user: UserId, row_number: usize) {
        self.entry(user).editing_row = Some(row_number);
    }

    pub fn finish_editing(&mut self, user: UserId) {
        if let Some(s) = self.sessions.get_mut(&user) {
            s.editing_row = None;
        }
    }

    pub fn cache_rows(&mut self, user: UserId, rows: Vec<SheetRow>) {
        self.entry(user).last_rows = rows;
    }

    pub fn cached_rows(&self, user: UserId) -> &[SheetRow] {
        self.get(user).map(|s| s.last_rows.as_slice()).unwrap_or(&[])
    }

    pub fn forget_rows(&mut self, user: UserId) {
        if let Some(s) = self.sessions.get_mut(&user) {
            s.last_rows.clear();
        }
    }

    pub fn reset(&mut self, user: UserId) {
        self.sessions.remove(&user);
    }
}
