// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendbot::parser::{
    CURRENCY_KEYWORDS, SOURCE_KEYWORDS, amount_candidates, normalize_amount, parse,
};
use spendbot::{Currency, ParseError, Source};

#[test]
fn simple_expense_defaults_to_rub_and_cash() {
    let e = parse("кофе 250").unwrap();
    assert_eq!(e.amount(), 250);
    assert_eq!(e.currency(), Currency::Rub);
    assert_eq!(e.source(), Source::Cash);
    assert_eq!(e.description(), "кофе");

    let e = parse("coffee 250").unwrap();
    assert_eq!(e.amount(), 250);
    assert_eq!(e.currency(), Currency::Rub);
    assert_eq!(e.source(), Source::Cash);
    assert_eq!(e.description(), "coffee");
}

#[test]
fn source_keyword_is_removed_from_description() {
    let e = parse("такси 500 тбанк").unwrap();
    assert_eq!(e.amount(), 500);
    assert_eq!(e.source(), Source::TBank);
    assert_eq!(e.description(), "такси");

    let e = parse("тбанк 1000 продукты").unwrap();
    assert_eq!(e.amount(), 1000);
    assert_eq!(e.source(), Source::TBank);
    assert_eq!(e.description(), "продукты");
}

#[test]
fn currency_position_does_not_matter() {
    for text in ["30 usd gift", "gift 30 usd"] {
        let e = parse(text).unwrap();
        assert_eq!(e.amount(), 30, "{text}");
        assert_eq!(e.currency(), Currency::Usd, "{text}");
        assert_eq!(e.description(), "gift", "{text}");
    }
    let e = parse("подарок 30 usd").unwrap();
    assert_eq!(e.currency(), Currency::Usd);
    assert_eq!(e.description(), "подарок");
}

#[test]
fn every_currency_is_recognised() {
    let cases = [
        ("100 евро еда", Currency::Eur),
        ("500 тенге такси", Currency::Kzt),
        ("50 usdt перевод", Currency::Usdt),
        ("1000 песо кофе", Currency::Clp),
        ("200 бат массаж", Currency::Thb),
        ("20 доллар книга", Currency::Usd),
        ("300 рублей обед", Currency::Rub),
    ];
    for (text, expected) in cases {
        assert_eq!(parse(text).unwrap().currency(), expected, "{text}");
    }
}

#[test]
fn every_source_is_recognised() {
    let cases = [
        ("кофе 100 нал", Source::Cash),
        ("обед 200 сбер", Source::Sber),
        ("доставка 300 озон", Source::Ozon),
        ("подписка 400 альфа", Source::Alfa),
        ("такси 250 яндекс", Source::Yandex),
        ("кофе 100 iron", Source::Bcc),
        ("билеты 5000 travel", Source::Travel),
        ("обед 700 tinkoff", Source::TBank),
    ];
    for (text, expected) in cases {
        assert_eq!(parse(text).unwrap().source(), expected, "{text}");
    }
}

#[test]
fn source_variants_normalize_to_one_value() {
    for text in ["lunch 200 sber", "lunch 200 sberbank", "lunch 200 сбербанк"] {
        let e = parse(text).unwrap();
        assert_eq!(e.source(), Source::Sber, "{text}");
        assert_eq!(e.description(), "lunch", "{text}");
    }
    let e = parse("такси 300 наличными").unwrap();
    assert_eq!(e.source(), Source::Cash);
    assert_eq!(e.description(), "такси");
}

#[test]
fn space_grouped_thousands() {
    let e = parse("хлеб 1 500").unwrap();
    assert_eq!(e.amount(), 1500);
    assert_eq!(e.description(), "хлеб");
}

#[test]
fn dot_grouped_thousands_and_fraction() {
    assert_eq!(parse("ноутбук 85.000 тбанк").unwrap().amount(), 85000);
    assert_eq!(parse("телефон 1,500.50").unwrap().amount(), 1500);
}

#[test]
fn fraction_is_truncated() {
    let e = parse("кофе 250.50").unwrap();
    assert_eq!(e.amount(), 250);
    assert_eq!(e.description(), "кофе");

    let e = parse("обед 500,75").unwrap();
    assert_eq!(e.amount(), 500);
    assert_eq!(e.description(), "обед");

    assert_eq!(parse("lunch 19.99").unwrap().amount(), 19);
}

#[test]
fn leading_minus_is_ignored() {
    let e = parse("-500 возврат").unwrap();
    assert_eq!(e.amount(), 500);
    assert_eq!(e.description(), "возврат");
}

#[test]
fn currency_symbols_are_stripped() {
    let e = parse("₽500 еда").unwrap();
    assert_eq!(e.amount(), 500);
    assert_eq!(e.description(), "еда");

    // a bare symbol does not set the currency
    let e = parse("$30 кино").unwrap();
    assert_eq!(e.amount(), 30);
    assert_eq!(e.currency(), Currency::Rub);
}

#[test]
fn empty_and_digitless_input_miss_amount() {
    assert_eq!(parse(""), Err(ParseError::AmountMissing));
    assert_eq!(parse("   \t "), Err(ParseError::AmountMissing));
    assert_eq!(parse("просто текст без цифр"), Err(ParseError::AmountMissing));
    assert_eq!(parse("no digits here"), Err(ParseError::AmountMissing));
}

#[test]
fn zero_and_overflowing_amounts_are_not_amounts() {
    assert_eq!(parse("кофе 0"), Err(ParseError::AmountMissing));
    assert_eq!(
        parse("x 99999999999999999999999"),
        Err(ParseError::AmountMissing)
    );
}

#[test]
fn bare_amount_misses_description() {
    assert_eq!(parse("500"), Err(ParseError::DescriptionMissing));
    assert_eq!(parse("500 usd"), Err(ParseError::DescriptionMissing));
    assert_eq!(parse("500 usd sber"), Err(ParseError::DescriptionMissing));
}

#[test]
fn error_messages_are_canonical() {
    assert_eq!(ParseError::AmountMissing.to_string(), "amount missing");
    assert_eq!(
        ParseError::DescriptionMissing.to_string(),
        "description missing"
    );
    assert!(ParseError::AmountMissing.prompt().contains("укажите сумму"));
    assert!(ParseError::DescriptionMissing.prompt().contains("укажите описание"));
}

#[test]
fn raw_text_is_kept_verbatim() {
    let original = "  кофе   250 нал  ";
    let e = parse(original).unwrap();
    assert_eq!(e.raw_text(), original);
    assert_eq!(e.description(), "кофе");
}

#[test]
fn multi_word_description() {
    let e = parse("покупка продуктов в магазине 1500 тбанк").unwrap();
    assert_eq!(e.amount(), 1500);
    assert_eq!(e.source(), Source::TBank);
    assert_eq!(e.description(), "покупка продуктов в магазине");
}

#[test]
fn amount_next_to_currency_wins() {
    // amount before the currency word
    let e = parse("2 coffees 100 usd").unwrap();
    assert_eq!(e.amount(), 100);
    assert_eq!(e.description(), "2 coffees");

    let e = parse("100 usd 3 items").unwrap();
    assert_eq!(e.amount(), 100);
    assert_eq!(e.description(), "3 items");

    // nothing before it, so the nearest one after
    let e = parse("usd 100 for 3 items").unwrap();
    assert_eq!(e.amount(), 100);
    assert_eq!(e.description(), "for 3 items");
}

#[test]
fn first_amount_wins_without_currency() {
    let e = parse("3 pizzas 1200").unwrap();
    assert_eq!(e.amount(), 3);
    assert_eq!(e.description(), "pizzas 1200");
}

#[test]
fn trailing_punctuation_and_case_are_ignored() {
    let e = parse("такси 300 руб.").unwrap();
    assert_eq!(e.currency(), Currency::Rub);
    assert_eq!(e.description(), "такси");

    let e = parse("Кофе 100 СБЕР!").unwrap();
    assert_eq!(e.source(), Source::Sber);
    assert_eq!(e.description(), "Кофе");

    assert_eq!(parse("gift 30 USD,").unwrap().currency(), Currency::Usd);
}

#[test]
fn only_first_currency_token_is_consumed() {
    let e = parse("100 usd eur подарок").unwrap();
    assert_eq!(e.currency(), Currency::Usd);
    assert_eq!(e.description(), "eur подарок");
}

#[test]
fn candidates_carry_byte_offsets() {
    let text = "хлеб 1 500";
    let c = amount_candidates(text);
    assert_eq!(c.len(), 1);
    assert_eq!(c[0].value, 1500);
    assert_eq!(c[0].matched, "1 500");
    assert_eq!(&text[c[0].start..c[0].end], "1 500");

    let values: Vec<u64> = amount_candidates("2 coffees 100 usd")
        .iter()
        .map(|c| c.value)
        .collect();
    assert_eq!(values, vec![2, 100]);
}

#[test]
fn normalize_amount_rules() {
    assert_eq!(normalize_amount("₽1 500,75"), Some(1500));
    assert_eq!(normalize_amount("250.5"), Some(250));
    assert_eq!(normalize_amount("-42$"), Some(42));
    assert_eq!(normalize_amount("1.234.567"), Some(1_234_567));
    assert_eq!(normalize_amount("-0"), None);
    assert_eq!(normalize_amount("0,50"), None);
}

#[test]
fn keyword_tables_are_lowercase_and_unique() {
    let mut seen = std::collections::HashSet::new();
    for (kw, _) in CURRENCY_KEYWORDS.iter() {
        assert_eq!(*kw, kw.to_lowercase());
        assert!(seen.insert(*kw), "duplicate currency keyword {kw}");
    }
    let mut seen = std::collections::HashSet::new();
    for (kw, _) in SOURCE_KEYWORDS.iter() {
        assert_eq!(*kw, kw.to_lowercase());
        assert!(seen.insert(*kw), "duplicate source keyword {kw}");
    }
}

#[test]
fn json_names_match_canonical_labels() {
    for c in Currency::ALL {
        assert_eq!(serde_json::to_value(c).unwrap(), c.code());
    }
    for s in Source::ALL {
        assert_eq!(serde_json::to_value(s).unwrap(), s.label());
    }
}

#[test]
fn leading_punctuation_stays_on_the_keyword() {
    let e = parse("-usd 100 x").unwrap();
    assert_eq!(e.amount(), 100);
    assert_eq!(e.currency(), Currency::Rub);
    assert_eq!(e.description(), "-usd x");

    let e = parse("(сбер 100 обед").unwrap();
    assert_eq!(e.source(), Source::Cash);
    assert_eq!(e.description(), "(сбер обед");
}
