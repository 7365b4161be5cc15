//! Candidate validators shared by every rule set

use super::currency::parse_amount;
use super::date::is_date_shaped;
use regex::Regex;
use std::sync::LazyLock;

/// Words that show up when a pattern wanders into markup or styling
const STRUCTURAL_TOKENS: &[&str] = &[
    "value", "table", "width", "height", "style", "px", "font", "color", "border", "padding",
    "margin", "class", "align", "valign", "td", "tr", "th", "span", "div", "href", "src", "nbsp",
    "important", "colspan", "cellpadding", "cellspacing", "bgcolor",
];

static CSS_LEAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[<>{}=;]|\b\d{1,4}px\b|\b(?:font-(?:size|family|weight)|line-height|text-align|background(?:-color)?|border-(?:top|bottom|left|right|radius)|padding-\w{1,6}|margin-\w{1,6})\b")
        .unwrap()
});

/// True when `text` carries CSS or tag residue
#[must_use]
pub fn is_markup_leakage(text: &str) -> bool {
    CSS_LEAK.is_match(text)
}

/// True when `text` carries markup residue or a structural HTML/CSS word
#[must_use]
pub fn is_leakage(text: &str) -> bool {
    is_markup_leakage(text)
        || text
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|token| {
                let lower = token.to_ascii_lowercase();
                STRUCTURAL_TOKENS.contains(&lower.as_str())
            })
}

/// Accept an order/tracking identifier: 5-30 chars of `[A-Za-z0-9-]`,
/// at least one digit, not a date, no leakage.
#[must_use]
pub fn validate_identifier(raw: &str) -> Option<String> {
    let id = raw
        .trim()
        .trim_start_matches('#')
        .trim_matches(|c: char| c == '-' || c == '.' || c == ':');
    let len = id.chars().count();
    if !(5..=30).contains(&len) {
        return None;
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    if !id.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if is_date_shaped(id) || is_leakage(id) {
        return None;
    }
    Some(id.to_string())
}

/// Accept a positive amount no larger than `ceiling`
#[must_use]
pub fn validate_amount(raw: &str, ceiling: f64) -> Option<f64> {
    let value = parse_amount(raw)?;
    (value > 0.0 && value <= ceiling).then_some(value)
}

/// Accept a short free-text value (seller, delivery window): whitespace is
/// collapsed, trailing separators trimmed, length checked in characters.
#[must_use]
pub fn validate_text(raw: &str, min_chars: usize, max_chars: usize) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = collapsed
        .trim_matches(|c: char| matches!(c, '.' | ',' | ':' | ';' | '-' | '|' | '!'))
        .trim();
    let len = text.chars().count();
    if len < min_chars || len > max_chars {
        return None;
    }
    if !text.chars().any(char::is_alphabetic) {
        return None;
    }
    let lower = text.to_ascii_lowercase();
    if lower.contains("http") || lower.contains("www.") || is_leakage(text) {
        return None;
    }
    Some(text.to_string())
}
