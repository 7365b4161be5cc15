//! Line-item parsing and deduplication

use super::cascade::Cascade;
use super::currency::parse_amount;
use super::validate::is_markup_leakage;
use crate::types::{ItemSource, LineItem};
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

/// Labels of summary rows that look like priced lines but are not products
static SUMMARY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:total|subtotal|sub\s{0,2}total|amount|bill|tax(?:es)?|gst|cgst|sgst|igst|vat|cess|delivery\s{1,3}(?:fee|charges?|partner)|shipping|handling|packaging|packing|convenience|platform\s{1,3}fee|small\s{1,3}cart|surge|rain\s{1,3}fee|discount|coupon|promo|savings?|saved|you\s{1,3}save|tip|donation|wallet|paid|payable|refund|cashback|round(?:ing)?\s{0,2}off|balance|mrp\s{1,3}total|order\s{1,3}(?:id|no|number))\b").unwrap()
});

// Subject shapes that name a product: order of "X", order for X, quoted X
static SUBJECT_ORDER_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\border\s{1,3}(?:of|for)\s{1,3}["“'‘]?(?P<v>[^"”'’\n]{3,100}?)["”'’]?(?:\s{1,3}(?:and|\+)\s{1,3}\d{1,3}\s{1,3}more\b|\s{1,3}(?:has|have|is|was|will|with)\b|\s{0,2}[-|:]\s|$)"#).unwrap()
});

static SUBJECT_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["“‘](?P<v>[^"”’\n]{3,100})["”’]"#).unwrap());

static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-•*·>]|\d{1,2}[.)])\s{1,3}").unwrap());

/// Normalize a product name for deduplication: trimmed, lowercased,
/// whitespace collapsed
#[must_use]
pub fn normalize_item_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Clean a candidate product name; `None` when it is a summary row, markup
/// residue or not a name at all
#[must_use]
pub fn clean_item_name(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = BULLET_PREFIX.replace(&collapsed, "");
    let name = stripped
        .trim_end_matches(['…', '.'])
        .trim_matches(|c: char| matches!(c, '-' | '–' | '—' | ':' | '|' | ',' | '*' | '"' | '\''))
        .trim();

    let len = name.chars().count();
    if !(2..=120).contains(&len) {
        return None;
    }
    if name.chars().filter(|c| c.is_alphabetic()).count() < 2 {
        return None;
    }
    if SUMMARY_LABEL.is_match(name) || is_markup_leakage(name) {
        return None;
    }
    Some(name.to_string())
}

/// Item list keyed by normalized name; a repeated name is dropped, not merged
#[derive(Debug, Clone)]
pub struct ItemSet {
    items: Vec<LineItem>,
    keys: HashSet<String>,
    cap: usize,
}

impl ItemSet {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            keys: HashSet::new(),
            cap,
        }
    }

    /// Add `item` unless its key is already present or the set is full
    pub fn insert(&mut self, item: LineItem) -> bool {
        if self.items.len() >= self.cap {
            return false;
        }
        if !self.keys.insert(item.key()) {
            return false;
        }
        self.items.push(item);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<LineItem> {
        self.items
    }
}

/// A product line read from the body
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMatch {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub position: usize,
    pub rule: &'static str,
}

/// Run item rules over `text`.
///
/// Rules use the named groups `name`, `price` and optionally `qty`. Rules run
/// in priority order and a line claimed by one rule is not re-read by a
/// lower one. Results come back in body order.
#[must_use]
pub fn match_item_lines(rules: &Cascade, text: &str, price_ceiling: f64) -> Vec<ItemMatch> {
    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut found = Vec::new();

    for rule in rules.rules() {
        for caps in rule.captures(text) {
            let Some(whole) = caps.get(0) else { continue };
            let span = whole.range();
            if claimed
                .iter()
                .any(|c| c.start < span.end && span.start < c.end)
            {
                continue;
            }
            let Some(name) = caps.name("name").and_then(|m| clean_item_name(m.as_str())) else {
                continue;
            };
            let Some(price) = caps
                .name("price")
                .and_then(|m| parse_amount(m.as_str()))
                .filter(|p| *p > 0.0 && *p <= price_ceiling)
            else {
                continue;
            };
            let quantity = caps
                .name("qty")
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .filter(|q| (1..=999).contains(q))
                .unwrap_or(1);

            claimed.push(span.clone());
            found.push(ItemMatch {
                name,
                quantity,
                price,
                position: span.start,
                rule: rule.label,
            });
        }
    }

    found.sort_by_key(|m| m.position);
    found
}

/// Product named by the subject line, if any
#[must_use]
pub fn subject_item_name(subject: &str) -> Option<String> {
    SUBJECT_ORDER_OF
        .captures(subject)
        .or_else(|| SUBJECT_QUOTED.captures(subject))
        .and_then(|caps| caps.name("v").and_then(|m| clean_item_name(m.as_str())))
}

impl From<&ItemMatch> for LineItem {
    fn from(m: &ItemMatch) -> Self {
        Self::priced(m.name.clone(), m.quantity, m.price, ItemSource::Body)
    }
}
