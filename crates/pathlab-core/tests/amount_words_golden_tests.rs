//! Golden tests for invoice amounts in words.
//!
//! These tests verify the Indian lakh/thousand/hundred grouping against
//! known amounts.

use pathlab_core::export::{amount_to_words, AmountError, MAX_WORDS_AMOUNT};
use proptest::prelude::*;

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    amount: f64,
    expected: &'static str,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "zero",
            amount: 0.0,
            expected: "Zero Only",
        },
        GoldenCase {
            id: "single-digit",
            amount: 5.0,
            expected: "Five Only",
        },
        GoldenCase {
            id: "teen",
            amount: 17.0,
            expected: "Seventeen Only",
        },
        GoldenCase {
            id: "round-tens",
            amount: 50.0,
            expected: "Fifty Only",
        },
        GoldenCase {
            id: "fractional-truncated",
            amount: 150.75,
            expected: "One Hundred Fifty Only",
        },
        GoldenCase {
            id: "hundred-with-teen",
            amount: 312.0,
            expected: "Three Hundred Twelve Only",
        },
        GoldenCase {
            id: "typical-bill",
            amount: 1250.0,
            expected: "One Thousand Two Hundred Fifty Only",
        },
        GoldenCase {
            id: "thousand-exact",
            amount: 1000.0,
            expected: "One Thousand Only",
        },
        GoldenCase {
            id: "teen-thousands",
            amount: 11_011.0,
            expected: "Eleven Thousand Eleven Only",
        },
        GoldenCase {
            id: "hundreds-of-thousands-below-lakh",
            amount: 45_678.0,
            expected: "Forty Five Thousand Six Hundred Seventy Eight Only",
        },
        GoldenCase {
            id: "lakh-boundary",
            amount: 100_000.0,
            expected: "One Lakh Only",
        },
        GoldenCase {
            id: "lakh-and-hundreds",
            amount: 300_400.0,
            expected: "Three Lakh Four Hundred Only",
        },
        GoldenCase {
            id: "lakh-full",
            amount: 765_432.0,
            expected: "Seven Lakh Sixty Five Thousand Four Hundred Thirty Two Only",
        },
        GoldenCase {
            id: "max",
            amount: 999_999.0,
            expected: "Nine Lakh Ninety Nine Thousand Nine Hundred Ninety Nine Only",
        },
    ]
}

#[test]
fn test_golden_amounts() {
    for case in get_golden_cases() {
        let words = amount_to_words(case.amount)
            .unwrap_or_else(|e| panic!("Case '{}' failed: {}", case.id, e));
        assert_eq!(words, case.expected, "Case '{}' mismatch", case.id);
    }
}

#[test]
fn test_seven_digits_too_large() {
    assert_eq!(
        amount_to_words(1_000_000.0),
        Err(AmountError::TooLarge(1_000_000))
    );
    assert_eq!(
        amount_to_words(1_000_000.5),
        Err(AmountError::TooLarge(1_000_000))
    );
}

#[test]
fn test_just_below_limit_with_paise() {
    assert!(amount_to_words(999_999.99).is_ok());
}

proptest! {
    #[test]
    fn prop_in_range_is_well_formed(n in 0u64..=MAX_WORDS_AMOUNT) {
        let words = amount_to_words(n as f64).unwrap();
        prop_assert!(words.ends_with(" Only"));
        prop_assert!(!words.contains("  "));
        prop_assert!(words.split(' ').all(|w| w.chars().next().map_or(false, |c| c.is_ascii_uppercase())));
    }

    #[test]
    fn prop_idempotent(amount in 0.0f64..2_000_000.0) {
        prop_assert_eq!(amount_to_words(amount), amount_to_words(amount));
    }

    #[test]
    fn prop_fraction_ignored(n in 0u64..=MAX_WORDS_AMOUNT, paise in 0.0f64..0.99) {
        prop_assert_eq!(amount_to_words(n as f64 + paise), amount_to_words(n as f64));
    }

    #[test]
    fn prop_too_large(n in 1_000_000u64..10_000_000_000) {
        prop_assert_eq!(amount_to_words(n as f64), Err(AmountError::TooLarge(n)));
    }

    #[test]
    fn prop_lakh_word_only_from_lakh(n in 0u64..=MAX_WORDS_AMOUNT) {
        let words = amount_to_words(n as f64).unwrap();
        prop_assert_eq!(words.contains("Lakh"), n >= 100_000);
    }
}
