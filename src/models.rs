// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Usd,
    Eur,
    Kzt,
    Clp,
    Usdt,
    Thb,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Currency::Rub,
        Currency::Usd,
        Currency::Eur,
        Currency::Kzt,
        Currency::Clp,
        Currency::Usdt,
        Currency::Thb,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Kzt => "KZT",
            Currency::Clp => "CLP",
            Currency::Usdt => "USDT",
            Currency::Thb => "THB",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where the money came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Source {
    #[default]
    Cash,
    TBank,
    Ozon,
    Sber,
    Yandex,
    Alfa,
    #[serde(rename = "BCC")]
    Bcc,
    Travel,
}

impl Source {
    pub const ALL: [Source; 8] = [
        Source::Cash,
        Source::TBank,
        Source::Ozon,
        Source::Sber,
        Source::Yandex,
        Source::Alfa,
        Source::Bcc,
        Source::Travel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Source::Cash => "Cash",
            Source::TBank => "TBank",
            Source::Ozon => "Ozon",
            Source::Sber => "Sber",
            Source::Yandex => "Yandex",
            Source::Alfa => "Alfa",
            Source::Bcc => "BCC",
            Source::Travel => "Travel",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A successfully parsed expense message. Only the parser builds these, so
/// the type is serialize-only.
///
/// ```compile_fail
/// let json = r#"{"amount":0,"currency":"RUB","source":"Cash","description":"","raw_text":""}"#;
/// let e: spendbot::ParsedExpense = serde_json::from_str(json).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedExpense {
    amount: u64,
    currency: Currency,
    source: Source,
    description: String,
    raw_text: String,
}

impl ParsedExpense {
    pub(crate) fn new(
        amount: u64,
        currency: Currency,
        source: Source,
        description: String,
        raw_text: String,
    ) -> Self {
        Self {
            amount,
            currency,
            source,
            description,
            raw_text,
        }
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// One data row as read back from the sheet. Values stay textual, the way a
/// spreadsheet hands them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub row_number: usize,
    pub date: String,
    pub amount: String,
    pub currency: String,
    pub description: String,
    pub source: String,
}
