//! Currency normalization, amount parsing and formatting

use crate::types::Currency;
use regex::Regex;
use std::sync::LazyLock;

static RUPEE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&#8377;|&#x20b9;|&rupee;|&inr;").unwrap());

// "Rs. 452", "Rs452", "INR 1,200" -> "₹452", "₹452", "₹1,200"
static RUPEE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:rs\.?|inr)[ \t]{0,2}(\d)").unwrap());

static DOLLAR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bUSD[ \t]{0,2}(\d)").unwrap());

/// Rewrite every rupee spelling to `₹` and `USD` prefixes to `$`, so amount
/// patterns only need to look for the two symbols.
#[must_use]
pub fn normalize_currency(text: &str) -> String {
    let text = RUPEE_ENTITY.replace_all(text, "₹");
    let text = RUPEE_PREFIX.replace_all(&text, "₹$1");
    DOLLAR_PREFIX.replace_all(&text, "$$$1").into_owned()
}

/// Parse `1,23,456.50` style numbers; grouping commas are ignored
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let clean = clean.trim_end_matches('.');
    if clean.is_empty() || clean.matches('.').count() > 1 {
        return None;
    }
    let value: f64 = clean.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Currency of an amount snippet; rupees unless a dollar marker is present
#[must_use]
pub fn detect_currency(snippet: &str) -> Currency {
    if snippet.contains('$') || snippet.contains("USD") {
        Currency::Usd
    } else {
        Currency::Inr
    }
}

/// Format with the currency symbol and two decimals. Rupees use Indian
/// digit grouping (`₹1,23,456.00`), dollars use groups of three.
#[must_use]
pub fn format_amount(value: f64, currency: Currency) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = match currency {
        Currency::Inr => group_indian(int_part),
        Currency::Usd => group_thousands(int_part),
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}{grouped}.{frac}", currency.symbol())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(last3);
    out
}
