//! Amount-in-words rendering with Indian digit grouping (crore, lakh, thousand)

use bigdecimal::{BigDecimal, Signed};

const ONES: [&str; 20] = [
    "",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Place values in descending order; the last group is the remainder below a hundred
const GROUPS: [(u64, &str); 4] = [
    (10_000_000, "Crore"),
    (100_000, "Lakh"),
    (1_000, "Thousand"),
    (100, "Hundred"),
];

/// Words for 1..=999; empty for 0
fn below_thousand(n: u64) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let hundreds = n / 100;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        parts.push(ONES[hundreds as usize]);
        parts.push("Hundred");
    }
    if rest > 0 && rest < 20 {
        parts.push(ONES[rest]);
    } else if rest >= 20 {
        parts.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            parts.push(ONES[rest % 10]);
        }
    }

    parts.join(" ")
}

/// Convert a non-negative integer to words using the Indian numbering system
///
/// Quotients above 999 crore are spelled recursively, so the function is total
/// over `u64`.
pub fn to_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut remaining = n;
    let mut parts: Vec<String> = Vec::new();

    for (place, name) in GROUPS {
        let quotient = remaining / place;
        if quotient == 0 {
            continue;
        }
        let spelled = if quotient < 1000 {
            below_thousand(quotient)
        } else {
            to_words(quotient)
        };
        parts.push(format!("{} {}", spelled, name));
        remaining %= place;
    }

    if remaining > 0 {
        parts.push(below_thousand(remaining));
    }

    parts.join(" ")
}

/// Words for a non-negative integer given as ASCII decimal digits
///
/// Values that fit in `u64` go through [`to_words`]; wider ones are split at
/// the crore boundary with the quotient spelled recursively, the same way
/// [`to_words`] spells quotients above 999 crore.
fn digits_to_words(digits: &str) -> String {
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "Zero".to_string();
    }

    // any 19-digit value fits in u64
    if digits.len() <= 19 {
        return to_words(parse_digits(digits));
    }

    let (head, tail) = digits.split_at(digits.len() - 7);
    let mut words = format!("{} Crore", digits_to_words(head));
    let remainder = parse_digits(tail);
    if remainder > 0 {
        words.push(' ');
        words.push_str(&to_words(remainder));
    }
    words
}

fn parse_digits(digits: &str) -> u64 {
    digits.bytes().fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}

/// Render the whole-rupee part of an amount in words followed by `label`
///
/// Fractions are dropped. Negative amounts are prefixed with "Minus".
pub fn amount_in_words(amount: &BigDecimal, label: &str) -> String {
    let (whole, _) = amount.abs().with_scale(0).into_bigint_and_exponent();
    let digits = whole.to_string();
    let words = digits_to_words(&digits);
    let words = if amount.is_negative() && words != "Zero" {
        format!("Minus {}", words)
    } else {
        words
    };

    if label.trim().is_empty() {
        words
    } else {
        format!("{} {}", words, label.trim())
    }
}
