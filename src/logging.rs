// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::models::ParsedExpense;

pub const LOG_ENV: &str = "SPENDBOT_LOG";

/// Install the stderr subscriber. `SPENDBOT_LOG` overrides `default_level`.
/// Calling it twice is harmless.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Structured record of a row mutation. Only amount, currency and source are
/// logged, never the message text.
pub fn log_expense_action(action: &str, row: usize, expense: &ParsedExpense) {
    info!(
        action,
        row,
        amount = expense.amount(),
        currency = %expense.currency(),
        source = %expense.source(),
        "expense action executed"
    );
}

/// `row` is `None` for appends, which fail before a row exists.
pub fn log_action_failure(action: &str, row: Option<usize>, err: &anyhow::Error) {
    error!(action, row, error = %err, "expense action failed");
}
