// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Why a message could not be turned into an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("amount missing")]
    AmountMissing,
    #[error("description missing")]
    DescriptionMissing,
}

impl ParseError {
    /// Retry prompt shown to the user as-is.
    pub fn prompt(&self) -> &'static str {
        match self {
            ParseError::AmountMissing => "Ошибка: укажите сумму",
            ParseError::DescriptionMissing => "Ошибка: укажите описание",
        }
    }
}

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("row {0} not found")]
    RowNotFound(usize),
}
