//! Status keyword mapping

use crate::types::OrderStatus;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered status table: the first rule that matches wins, so terminal and
/// failure states come before the progress states they usually mention.
const STATUS_TABLE: &[(OrderStatus, &str, &str)] = &[
    (
        OrderStatus::Cancelled,
        "cancelled",
        r"(?i)\b(?:has\s{1,3}been\s{1,3}|was\s{1,3}|is\s{1,3}|order\s{1,3})?cancell?ed\b",
    ),
    (
        OrderStatus::Exception,
        "delivery_exception",
        r"(?i)\b(?:undelivered|delivery\s{1,3}(?:attempt\s{1,3})?(?:failed|unsuccessful)|failed\s{1,3}delivery(?:\s{1,3}attempt)?|delivery\s{1,3}exception|returned\s{1,3}to\s{1,3}(?:origin|sender)|rto\s{1,3}initiated|shipment\s{1,3}(?:on\s{1,3}hold|delayed))\b",
    ),
    (
        OrderStatus::Returned,
        "returned",
        r"(?i)\b(?:returned|return\s{1,3}(?:request|pick\s{0,2}up|picked\s{1,3}up|initiated|processed|received|completed)|refund\s{1,3}(?:initiated|processed|issued|credited))\b",
    ),
    (
        OrderStatus::Delivered,
        "delivered",
        r"(?i)\b(?:delivered|delivery\s{1,3}(?:completed|successful))\b",
    ),
    (
        OrderStatus::OutForDelivery,
        "out_for_delivery",
        r"(?i)\bout\s{1,3}for\s{1,3}delivery\b",
    ),
    (
        OrderStatus::InTransit,
        "in_transit",
        r"(?i)\b(?:in[\s-]{1,3}transit|reached\s{1,3}(?:the\s{1,3})?(?:hub|facility)|arrived\s{1,3}at\s{1,3}(?:the\s{1,3})?(?:hub|facility))\b",
    ),
    (
        OrderStatus::PickedUp,
        "picked_up",
        r"(?i)\b(?:picked\s{0,2}up|pickup\s{1,3}(?:done|completed|successful))\b",
    ),
    (
        OrderStatus::Shipped,
        "shipped",
        r"(?i)\b(?:shipped|dispatched|on\s{1,3}(?:the|its)\s{1,3}way|handed\s{1,3}over\s{1,3}to)\b",
    ),
    (
        OrderStatus::Processing,
        "processing",
        r"(?i)\b(?:packed|processing|being\s{1,3}(?:prepared|packed|processed)|preparing|ready\s{1,3}to\s{1,3}ship)\b",
    ),
    (
        OrderStatus::Booked,
        "booked",
        r"(?i)\b(?:booked|shipment\s{1,3}(?:created|registered)|manifested)\b",
    ),
    (
        OrderStatus::Confirmed,
        "confirmed",
        r"(?i)\b(?:confirmed|confirmation|accepted)\b",
    ),
    (
        OrderStatus::Ordered,
        "ordered",
        r"(?i)\b(?:placed|order\s{1,3}received|received\s{1,3}your\s{1,3}order|thank(?:s|\s{1,3}you)\s{1,3}for\s{1,3}(?:your\s{1,3})?(?:order|shopping|purchase))\b",
    ),
];

struct StatusRule {
    status: OrderStatus,
    label: &'static str,
    regex: Regex,
}

static STATUS_RULES: LazyLock<Vec<StatusRule>> = LazyLock::new(|| {
    STATUS_TABLE
        .iter()
        .map(|(status, label, pattern)| StatusRule {
            status: *status,
            label: *label,
            regex: Regex::new(pattern).unwrap(),
        })
        .collect()
});

// Promises about the future say nothing about the current state
static FUTURE_PHRASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:will|to|should|would|shall|can|may)\s{1,3}be\s{1,3}(?:delivered|shipped|dispatched|picked\s{0,2}up|cancell?ed|returned)\b|\bexpected\s{1,3}to\s{1,3}be\s{1,3}delivered\b|\bdelivered\s{1,3}by\b|\bif\s{1,3}(?:not\s{1,3})?(?:delivered|cancell?ed)\b")
        .unwrap()
});

/// Status named by `text`, with the label of the rule that matched
#[must_use]
pub fn status_from_text(text: &str) -> Option<(OrderStatus, &'static str)> {
    let cleaned = FUTURE_PHRASES.replace_all(text, " ");
    STATUS_RULES
        .iter()
        .find(|rule| rule.regex.is_match(&cleaned))
        .map(|rule| (rule.status, rule.label))
}

/// Status of a message: the subject decides when it names one, the body
/// otherwise. Courier mails are mapped onto the courier lifecycle.
#[must_use]
pub fn detect_status(subject: &str, body: &str, courier: bool) -> Option<(OrderStatus, &'static str)> {
    let (status, label) = status_from_text(subject).or_else(|| status_from_text(body))?;
    Some(if courier {
        (status.for_courier(), label)
    } else {
        (status, label)
    })
}
