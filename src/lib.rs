// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bot;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod sheet;
pub mod utils;

pub use error::{ParseError, SheetError};
pub use models::{Currency, ParsedExpense, Source};
pub use parser::parse as parse_expense;
