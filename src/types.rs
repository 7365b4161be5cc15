//! Core types: the inbound message, platform tags and the extracted order

use crate::toolkit::normalize_item_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inbound transactional email, as handed over by the ingestion layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEmail {
    /// Raw From value, e.g. `Amazon.in <auto-confirm@amazon.in>`
    pub sender: String,

    /// Subject line
    pub subject: String,

    /// HTML part (if any)
    pub html_body: Option<String>,

    /// Plain text part (if any)
    pub text_body: Option<String>,

    /// When the provider received the message
    pub received_at: DateTime<Utc>,

    /// Provider-side message id
    pub provider_message_id: String,
}

impl InboundEmail {
    pub fn new(
        sender: impl Into<String>,
        subject: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sender: sender.into(),
            subject: subject.into(),
            html_body: None,
            text_body: None,
            received_at,
            provider_message_id: String::new(),
        }
    }

    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_body = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.provider_message_id = id.into();
        self
    }

    /// Parsed sender address, if the From value holds one
    #[must_use]
    pub fn sender_address(&self) -> Option<EmailAddress> {
        EmailAddress::parse(&self.sender)
    }
}

/// Email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Display name (e.g., "Amazon.in")
    pub name: Option<String>,

    /// Email address (e.g., "auto-confirm@amazon.in")
    pub address: String,

    /// Domain extracted from address, lowercased
    pub domain: String,

    /// Local part (before @)
    pub local_part: String,
}

impl EmailAddress {
    /// Parse an email address from a string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        // Try to match "Name <email@domain.com>" format
        if let Some(start) = s.find('<')
            && let Some(end) = s.rfind('>')
            && start < end
        {
            let name_part = s[..start].trim().trim_matches('"');
            let address = s[start + 1..end].trim().to_string();

            if let Some((local, domain)) = address.split_once('@') {
                return Some(Self {
                    name: if name_part.is_empty() {
                        None
                    } else {
                        Some(name_part.to_string())
                    },
                    local_part: local.to_string(),
                    domain: domain.to_lowercase(),
                    address,
                });
            }
        }

        // Plain email address
        if let Some((local, domain)) = s.split_once('@')
            && !local.is_empty()
            && !domain.is_empty()
        {
            return Some(Self {
                name: None,
                local_part: local.to_string(),
                domain: domain.to_lowercase(),
                address: s.to_string(),
            });
        }

        None
    }

    /// True if the domain equals `domain` or is one of its subdomains
    #[must_use]
    pub fn is_from_domain(&self, domain: &str) -> bool {
        self.domain == domain
            || self
                .domain
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Check if this is likely a noreply/automated address
    #[must_use]
    pub fn is_noreply(&self) -> bool {
        let lower = self.local_part.to_lowercase();
        lower.contains("noreply")
            || lower.contains("no-reply")
            || lower.contains("donotreply")
            || lower.contains("auto-confirm")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// Supported platforms, plus the generic fallback and `unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformId {
    Amazon,
    Flipkart,
    Myntra,
    Ajio,
    Meesho,
    Nykaa,
    TataCliq,
    Snapdeal,
    #[serde(rename = "jiomart")]
    JioMart,
    #[serde(rename = "bigbasket")]
    BigBasket,
    Blinkit,
    Zepto,
    Dunzo,
    Swiggy,
    Zomato,
    Shiprocket,
    Delhivery,
    #[serde(rename = "bluedart")]
    BlueDart,
    Dtdc,
    Ekart,
    #[serde(rename = "xpressbees")]
    XpressBees,
    IndiaPost,
    #[serde(rename = "pharmeasy")]
    PharmEasy,
    #[serde(rename = "tata_1mg")]
    Tata1mg,
    Lenskart,
    #[serde(rename = "firstcry")]
    FirstCry,
    Generic,
    Unknown,
}

impl PlatformId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::Flipkart => "flipkart",
            Self::Myntra => "myntra",
            Self::Ajio => "ajio",
            Self::Meesho => "meesho",
            Self::Nykaa => "nykaa",
            Self::TataCliq => "tata_cliq",
            Self::Snapdeal => "snapdeal",
            Self::JioMart => "jiomart",
            Self::BigBasket => "bigbasket",
            Self::Blinkit => "blinkit",
            Self::Zepto => "zepto",
            Self::Dunzo => "dunzo",
            Self::Swiggy => "swiggy",
            Self::Zomato => "zomato",
            Self::Shiprocket => "shiprocket",
            Self::Delhivery => "delhivery",
            Self::BlueDart => "bluedart",
            Self::Dtdc => "dtdc",
            Self::Ekart => "ekart",
            Self::XpressBees => "xpressbees",
            Self::IndiaPost => "india_post",
            Self::PharmEasy => "pharmeasy",
            Self::Tata1mg => "tata_1mg",
            Self::Lenskart => "lenskart",
            Self::FirstCry => "firstcry",
            Self::Generic => "generic",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform category; drives classification priority and plausibility bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformCategory {
    Ecommerce,
    QuickDelivery,
    Logistics,
    Specialized,
    Generic,
}

impl PlatformCategory {
    /// Classification priority, lower is tried first
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Ecommerce => 0,
            Self::QuickDelivery => 1,
            Self::Logistics => 2,
            Self::Specialized => 3,
            Self::Generic => 4,
        }
    }

    /// Couriers bill the sender, so their mails usually carry no order amount
    #[must_use]
    pub const fn expects_amount(self) -> bool {
        !matches!(self, Self::Logistics)
    }
}

/// Which lifecycle a status belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Merchant,
    Courier,
    Shared,
    Failure,
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Ordered,
    Confirmed,
    Processing,
    Shipped,
    Booked,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Cancelled,
    Returned,
    Exception,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Booked => "booked",
            Self::PickedUp => "picked_up",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
            Self::Exception => "exception",
        }
    }

    #[must_use]
    pub const fn lifecycle(self) -> Lifecycle {
        match self {
            Self::Ordered | Self::Confirmed | Self::Processing | Self::Shipped => {
                Lifecycle::Merchant
            }
            Self::Booked | Self::PickedUp | Self::InTransit => Lifecycle::Courier,
            Self::OutForDelivery | Self::Delivered | Self::Cancelled | Self::Returned => {
                Lifecycle::Shared
            }
            Self::Exception => Lifecycle::Failure,
        }
    }

    /// Position along its lifecycle; terminal states rank last.
    /// `Exception` has no position.
    #[must_use]
    pub const fn stage(self) -> Option<u8> {
        match self {
            Self::Ordered | Self::Booked => Some(0),
            Self::Confirmed | Self::PickedUp => Some(1),
            Self::Processing => Some(2),
            Self::Shipped | Self::InTransit => Some(3),
            Self::OutForDelivery => Some(4),
            Self::Delivered => Some(5),
            Self::Cancelled | Self::Returned => Some(6),
            Self::Exception => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Returned)
    }

    /// Map a merchant-side state onto the courier lifecycle
    #[must_use]
    pub const fn for_courier(self) -> Self {
        match self {
            Self::Ordered | Self::Confirmed | Self::Processing => Self::Booked,
            Self::Shipped => Self::InTransit,
            other => other,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Currency of the extracted amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
        }
    }
}

/// Where a line item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Structured product line in the body
    Body,
    /// Product named in the subject line
    Subject,
    /// Synthesized so the item list is never empty
    Placeholder,
}

/// One purchased line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub source: ItemSource,
}

impl LineItem {
    /// A line priced as a whole; the unit price is derived from the quantity
    #[must_use]
    pub fn priced(name: impl Into<String>, quantity: u32, total_price: f64, source: ItemSource) -> Self {
        let quantity = quantity.max(1);
        Self {
            name: name.into(),
            quantity,
            unit_price: round_cents(total_price / f64::from(quantity)),
            total_price: round_cents(total_price),
            sku: None,
            brand: None,
            category: None,
            source,
        }
    }

    /// Deduplication key: trimmed, lowercased, whitespace-collapsed name
    #[must_use]
    pub fn key(&self) -> String {
        normalize_item_name(&self.name)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.source == ItemSource::Placeholder
    }
}

/// Which item tier produced the item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTier {
    Body,
    Subject,
    Placeholder,
}

/// Where the order date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    Body,
    Received,
}

/// A rule that produced a field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredRule {
    pub field: String,
    pub rule: String,
}

/// How the draft was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Rules that supplied a value, in field order
    pub fired_rules: Vec<FiredRule>,

    /// Item tier that produced `items`
    pub item_tier: ItemTier,

    /// Origin of `order_date`
    pub date_source: DateSource,

    /// False when the status is the category default
    pub status_classified: bool,

    /// Provider message id of the source email
    pub source_message_id: String,

    /// Receipt timestamp of the source email
    pub source_received_at: DateTime<Utc>,

    /// Version of this crate
    pub engine_version: String,
}

impl ExtractionMetadata {
    /// Label of the rule that supplied `field`, if any
    #[must_use]
    pub fn rule_for(&self, field: &str) -> Option<&str> {
        self.fired_rules
            .iter()
            .find(|r| r.field == field)
            .map(|r| r.rule.as_str())
    }
}

/// The canonical engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub platform: PlatformId,
    pub order_id: String,

    /// Order total; `None` when unavailable, `Some(0.0)` for courier mails without one
    pub amount: Option<f64>,

    /// Display amount, or an explicit sentinel when there is none
    pub formatted_amount: String,

    pub currency: Currency,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,

    /// Never empty
    pub items: Vec<LineItem>,

    pub tracking_id: Option<String>,
    pub seller_name: Option<String>,
    pub expected_delivery: Option<String>,

    /// Courier partner named in a merchant mail
    pub courier_name: Option<String>,

    /// Deterministic reliability estimate in `[0, ceiling]`
    pub confidence: f64,

    pub extraction_metadata: ExtractionMetadata,
}

impl OrderDraft {
    /// Items that were read from the message rather than synthesized
    #[must_use]
    pub fn real_item_count(&self) -> usize {
        self.items.iter().filter(|i| !i.is_placeholder()).count()
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
