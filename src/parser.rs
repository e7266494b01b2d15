// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Free-text expense parser.
//!
//! Turns messages like "такси 500 тбанк" or "30 usd подарок" into a
//! [`ParsedExpense`]. Keywords are matched per whitespace token while amounts
//! are matched on the raw string (so "1 500" is one amount); the two are
//! reconciled through byte offsets.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::error::ParseError;
use crate::models::{Currency, ParsedExpense, Source};

pub const CURRENCY_KEYWORDS: &[(&str, Currency)] = &[
    ("rub", Currency::Rub),
    ("руб", Currency::Rub),
    ("р", Currency::Rub),
    ("рубль", Currency::Rub),
    ("рублей", Currency::Rub),
    ("usd", Currency::Usd),
    ("доллар", Currency::Usd),
    ("dollar", Currency::Usd),
    ("eur", Currency::Eur),
    ("евро", Currency::Eur),
    ("euro", Currency::Eur),
    ("kzt", Currency::Kzt),
    ("тенге", Currency::Kzt),
    ("tenge", Currency::Kzt),
    ("clp", Currency::Clp),
    ("песо", Currency::Clp),
    ("peso", Currency::Clp),
    ("usdt", Currency::Usdt),
    ("thb", Currency::Thb),
    ("бат", Currency::Thb),
    ("bat", Currency::Thb),
];

/// Order matters: prefix matching walks this table top to bottom.
pub const SOURCE_KEYWORDS: &[(&str, Source)] = &[
    ("нал", Source::Cash),
    ("наличн", Source::Cash),
    ("наличные", Source::Cash),
    ("наличка", Source::Cash),
    ("cash", Source::Cash),
    ("кэш", Source::Cash),
    ("кеш", Source::Cash),
    ("тбанк", Source::TBank),
    ("tbank", Source::TBank),
    ("т-банк", Source::TBank),
    ("t-bank", Source::TBank),
    ("тинькофф", Source::TBank),
    ("tinkoff", Source::TBank),
    ("тиньк", Source::TBank),
    ("ozon", Source::Ozon),
    ("озон", Source::Ozon),
    ("sber", Source::Sber),
    ("сбер", Source::Sber),
    ("сберbank", Source::Sber),
    ("sberbank", Source::Sber),
    ("yandex", Source::Yandex),
    ("яндекс", Source::Yandex),
    ("alfa", Source::Alfa),
    ("альфа", Source::Alfa),
    ("альфабанк", Source::Alfa),
    ("alfabank", Source::Alfa),
    ("iron", Source::Bcc),
    ("бcc", Source::Bcc),
    ("bcc", Source::Bcc),
    ("travel", Source::Travel),
];

const TRAILING_PUNCT: &[char] = &['.', ',', '!', '?', ';', ':', '-', '—', '–', ')'];

static CURRENCY_INDEX: Lazy<HashMap<&'static str, Currency>> =
    Lazy::new(|| CURRENCY_KEYWORDS.iter().copied().collect());

static SOURCE_INDEX: Lazy<HashMap<&'static str, Source>> =
    Lazy::new(|| SOURCE_KEYWORDS.iter().copied().collect());

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // optional symbol, optional minus, digit groups joined by space/dot/comma
    Regex::new(r"[₽$₸]?-?[0-9]+(?:[\s.,][0-9]+)*[₽$₸]?")
        .unwrap_or_else(|e| panic!("Invalid amount regex: {e}"))
});

static FRACTION_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.,][0-9]{1,2}$").unwrap_or_else(|e| panic!("Invalid fraction regex: {e}"))
});

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl Token<'_> {
    /// Lowercased token with trailing punctuation removed. Leading
    /// punctuation is kept, so "-usd" is not a currency keyword.
    fn keyword(&self) -> String {
        self.text.trim_end_matches(TRAILING_PUNCT).to_lowercase()
    }

    fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    text: &text[s..i],
                    start: s,
                    end: i,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &text[s..],
            start: s,
            end: text.len(),
        });
    }
    tokens
}

/// A substring that looks like a positive amount, before disambiguation.
/// `start`/`end` are byte offsets into the parsed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCandidate<'a> {
    pub value: u64,
    pub matched: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Normalize one amount match: drop symbols and minus, truncate a 1–2 digit
/// fraction, drop grouping separators. `None` unless a positive integer remains.
pub fn normalize_amount(matched: &str) -> Option<u64> {
    let cleaned: String = matched
        .chars()
        .filter(|c| !matches!(c, '₽' | '$' | '₸' | '-'))
        .collect();
    let cleaned = FRACTION_SUFFIX.replace(cleaned.trim(), "");
    let digits: String = cleaned
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == '.' || *c == ','))
        .collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().filter(|v| *v > 0)
}

/// All amount candidates in document order.
pub fn amount_candidates(text: &str) -> Vec<AmountCandidate<'_>> {
    AMOUNT_PATTERN
        .find_iter(text)
        .filter_map(|m| {
            normalize_amount(m.as_str()).map(|value| AmountCandidate {
                value,
                matched: m.as_str(),
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// Pick the amount closest to the currency keyword: the nearest one before it
/// ("100 руб"), else the nearest one after it ("usd 100"), else the first.
fn pick_amount<'c, 'a>(
    candidates: &'c [AmountCandidate<'a>],
    currency_span: Option<(usize, usize)>,
) -> Option<&'c AmountCandidate<'a>> {
    if candidates.len() <= 1 {
        return candidates.first();
    }
    if let Some((curr_start, curr_end)) = currency_span {
        let before = candidates
            .iter()
            .filter(|c| c.end <= curr_start)
            .max_by_key(|c| c.end);
        if before.is_some() {
            return before;
        }
        let after = candidates
            .iter()
            .filter(|c| c.start >= curr_end)
            .min_by_key(|c| c.start);
        if after.is_some() {
            return after;
        }
    }
    candidates.first()
}

fn find_currency<'t, 'a>(tokens: &'t [Token<'a>]) -> Option<(&'t Token<'a>, Currency)> {
    tokens.iter().find_map(|t| {
        CURRENCY_INDEX
            .get(t.keyword().as_str())
            .map(|c| (t, *c))
    })
}

fn source_for_keyword(keyword: &str) -> Option<Source> {
    if let Some(src) = SOURCE_INDEX.get(keyword) {
        return Some(*src);
    }
    SOURCE_KEYWORDS
        .iter()
        .find(|(kw, _)| keyword.starts_with(kw))
        .map(|(_, src)| *src)
}

fn find_source<'t, 'a>(tokens: &'t [Token<'a>]) -> Option<(&'t Token<'a>, Source)> {
    tokens
        .iter()
        .find_map(|t| source_for_keyword(&t.keyword()).map(|s| (t, s)))
}

/// Remove the given byte spans and collapse whitespace.
fn strip_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let kept: String = text
        .char_indices()
        .filter(|(i, _)| !spans.iter().any(|(s, e)| i >= s && i < e))
        .map(|(_, c)| c)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a free-text expense message.
///
/// # Examples
///
/// ```
/// use spendbot::models::{Currency, Source};
/// use spendbot::parser::parse;
///
/// let e = parse("такси 500 тбанк").unwrap();
/// assert_eq!(e.amount(), 500);
/// assert_eq!(e.currency(), Currency::Rub);
/// assert_eq!(e.source(), Source::TBank);
/// assert_eq!(e.description(), "такси");
/// ```
pub fn parse(raw_input: &str) -> Result<ParsedExpense, ParseError> {
    if raw_input.trim().is_empty() {
        return Err(ParseError::AmountMissing);
    }

    let tokens = tokenize(raw_input);
    let currency = find_currency(&tokens);

    let candidates = amount_candidates(raw_input);
    let amount = pick_amount(&candidates, currency.map(|(t, _)| t.span()))
        .ok_or(ParseError::AmountMissing)?;

    let source = find_source(&tokens);

    let mut removed = vec![(amount.start, amount.end)];
    if let Some((t, _)) = currency {
        removed.push(t.span());
    }
    if let Some((t, _)) = source {
        removed.push(t.span());
    }
    let description = strip_spans(raw_input, &removed);
    if description.is_empty() {
        return Err(ParseError::DescriptionMissing);
    }

    Ok(ParsedExpense::new(
        amount.value,
        currency.map(|(_, c)| c).unwrap_or_default(),
        source.map(|(_, s)| s).unwrap_or_default(),
        description,
        raw_input.to_string(),
    ))
}
