//! Invoice amounts spelled out in English words.
//!
//! Uses the Indian grouping: lakh (1,00,000), thousand, hundred. Only the
//! integer rupee amount is spelled; paise are truncated.

use thiserror::Error;

/// Largest amount that can be spelled (six integer digits).
pub const MAX_WORDS_AMOUNT: u64 = 999_999;

const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Amount formatting errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    #[error("Amount too large to spell: {0}")]
    TooLarge(u64),

    #[error("Invalid amount: {0}")]
    Invalid(f64),
}

/// Spell out an amount for a printed invoice, e.g. `1250.0` →
/// "One Thousand Two Hundred Fifty Only".
pub fn amount_to_words(amount: f64) -> Result<String, AmountError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AmountError::Invalid(amount));
    }

    // Saturates for huge values, which the range check below rejects.
    let rupees = amount.trunc() as u64;
    if rupees > MAX_WORDS_AMOUNT {
        return Err(AmountError::TooLarge(rupees));
    }
    if rupees == 0 {
        return Ok("Zero Only".to_string());
    }

    let mut words: Vec<&'static str> = Vec::new();

    let lakhs = rupees / LAKH;
    if lakhs > 0 {
        push_tens(&mut words, lakhs);
        words.push("Lakh");
    }

    let thousands = (rupees % LAKH) / THOUSAND;
    if thousands > 0 {
        push_hundreds(&mut words, thousands);
        words.push("Thousand");
    }

    push_hundreds(&mut words, rupees % THOUSAND);

    words.push("Only");
    Ok(words.join(" "))
}

/// Words for 0..=999. Zero contributes nothing.
fn push_hundreds(words: &mut Vec<&'static str>, n: u64) {
    if n > 99 {
        words.push(ONES[(n / 100) as usize]);
        words.push("Hundred");
    }
    push_tens(words, n % 100);
}

/// Words for 0..=99. Zero contributes nothing.
fn push_tens(words: &mut Vec<&'static str>, n: u64) {
    match n {
        0 => {}
        1..=9 => words.push(ONES[n as usize]),
        10..=19 => words.push(TEENS[(n - 10) as usize]),
        _ => {
            words.push(TENS[(n / 10) as usize]);
            if n % 10 > 0 {
                words.push(ONES[(n % 10) as usize]);
            }
        }
    }
}
