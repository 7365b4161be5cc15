//! Declarative per-platform rule tables
//!
//! Every platform is a [`PlatformProfile`]: sender domains, indicator
//! substrings and the platform-specific rules for each field. The shared
//! tables below are appended to every profile, so a profile only lists what
//! its mails do differently.

mod ecommerce;
mod logistics;
mod quick_delivery;
mod specialized;

use crate::toolkit::RuleSpec;
use crate::types::{PlatformCategory, PlatformId};

pub use ecommerce::{AJIO, AMAZON, FLIPKART, JIOMART, MEESHO, MYNTRA, NYKAA, SNAPDEAL, TATA_CLIQ};
pub use logistics::{BLUEDART, DELHIVERY, DTDC, EKART, INDIA_POST, SHIPROCKET, XPRESSBEES};
pub use quick_delivery::{BIGBASKET, BLINKIT, DUNZO, SWIGGY, ZEPTO, ZOMATO};
pub use specialized::{FIRSTCRY, LENSKART, PHARMEASY, TATA_1MG};

/// Rule table of one platform
#[derive(Debug, Clone, Copy)]
pub struct PlatformProfile {
    pub id: PlatformId,
    pub name: &'static str,
    pub category: PlatformCategory,

    /// Sender domains; subdomains match too
    pub domains: &'static [&'static str],

    /// Lowercase substrings that identify the platform in subject or body
    pub indicators: &'static [&'static str],

    pub order_id: &'static [RuleSpec],
    pub amount: &'static [RuleSpec],
    pub items: &'static [RuleSpec],
    pub date: &'static [RuleSpec],
    pub tracking: &'static [RuleSpec],
    pub seller: &'static [RuleSpec],
    pub delivery: &'static [RuleSpec],
}

impl PlatformProfile {
    /// Base for struct-update syntax in the tables
    pub const EMPTY: Self = Self {
        id: PlatformId::Unknown,
        name: "",
        category: PlatformCategory::Generic,
        domains: &[],
        indicators: &[],
        order_id: &[],
        amount: &[],
        items: &[],
        date: &[],
        tracking: &[],
        seller: &[],
        delivery: &[],
    };

    /// Couriers identify a shipment by its AWB and follow the courier lifecycle
    #[must_use]
    pub const fn is_courier(&self) -> bool {
        matches!(self.category, PlatformCategory::Logistics)
    }
}

/// Platform profiles in classification priority order:
/// ecommerce, quick-delivery, logistics, specialized.
/// Aggregators come before the brands they mention.
pub const PLATFORM_PROFILES: &[&PlatformProfile] = &[
    &AMAZON,
    &FLIPKART,
    &MYNTRA,
    &AJIO,
    &MEESHO,
    &NYKAA,
    &TATA_CLIQ,
    &SNAPDEAL,
    &JIOMART,
    &BIGBASKET,
    &BLINKIT,
    &ZEPTO,
    &DUNZO,
    &SWIGGY,
    &ZOMATO,
    &SHIPROCKET,
    &DELHIVERY,
    &BLUEDART,
    &DTDC,
    &EKART,
    &XPRESSBEES,
    &INDIA_POST,
    &PHARMEASY,
    &TATA_1MG,
    &LENSKART,
    &FIRSTCRY,
];

/// Fallback profile for order-shaped mail from unrecognized senders
pub const GENERIC: PlatformProfile = PlatformProfile {
    id: PlatformId::Generic,
    name: "Generic",
    category: PlatformCategory::Generic,
    order_id: &[RuleSpec::new(
        "prefixed_id",
        r"\b(?P<v>[A-Z]{2,4}\d{6,14})\b",
        50,
    )],
    ..PlatformProfile::EMPTY
};

/// Profile registered for `id`, if any
#[must_use]
pub fn profile_for(id: PlatformId) -> Option<&'static PlatformProfile> {
    if id == PlatformId::Generic {
        return Some(&GENERIC);
    }
    PLATFORM_PROFILES.iter().copied().find(|p| p.id == id)
}

/// Words that make a message order-related (word-bounded, case-insensitive)
pub const ORDER_KEYWORDS: &str = r"(?i)\b(?:orders?|ordered|shipment|shipped|delivered|invoice|receipt|awb|tracking|consignment|dispatched|purchase|booking|parcel|package|refund|courier|paid|payment\s{1,3}(?:received|successful))\b";

/// Subject words of marketing mail; any hit rejects the message
pub const PROMO_KEYWORDS: &str = r"(?i)\b(?:sale|\d{1,2}\s{0,2}%\s{0,2}off|flat\s{1,3}[₹$]?\d{1,6}\s{0,2}%?\s{0,2}off|discounts?|newsletter|cashback|offers?|deals?|coupons?|explore|shop\s{1,3}now|hurry|last\s{1,3}chance|limited[\s-]{1,3}time|wishlist|price\s{1,3}drop|recommended|new\s{1,3}arrivals|clearance|bonanza|lucky\s{1,3}draw|win\s{1,3}(?:a|an|big)|rewards?\s{1,3}points?|upto|up\s{1,3}to\s{1,3}\d{1,2}\s{0,2}%)\b";

/// Structural order-id shapes for the generic fallback gate
pub const ID_SHAPES: &[&str] = &[
    r"\b[A-Z]{2,4}\d{6,14}\b",
    r"\b\d{3}-\d{7}-\d{7}\b",
    r"#\s?[A-Z0-9]{6,20}\b",
    r"(?i)\border\s{0,2}(?:id|no|number|#)\.?\s{0,3}[:#-]?\s{0,3}[A-Z0-9-]{6,25}\b",
    r"\b\d{10,20}\b",
];

pub const COMMON_ORDER_ID: &[RuleSpec] = &[
    RuleSpec::new(
        "order_id_label",
        r"(?i)\border\s{0,2}(?:id|no|number|num|#|ref(?:erence)?)\.?\s{0,3}(?:is\s{1,3})?[:#-]?\s{0,3}#?\s{0,2}(?P<v>[A-Z0-9][A-Z0-9-]{4,29})\b",
        80,
    ),
    RuleSpec::new(
        "invoice_label",
        r"(?i)\binvoice\s{0,2}(?:id|no|number|num|#)?\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>[A-Z0-9][A-Z0-9-]{4,29})\b",
        60,
    ),
    RuleSpec::new(
        "reference_label",
        r"(?i)\b(?:booking|reference|ref|transaction|txn|receipt)\s{0,2}(?:id|no|number|#)?\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>[A-Z0-9][A-Z0-9-]{4,29})\b",
        40,
    ),
    RuleSpec::new(
        "order_inline",
        r"(?i)\border\s{1,3}#?(?P<v>[A-Z]{0,4}\d[A-Z0-9-]{4,28})\b",
        35,
    ),
    RuleSpec::new("hash_id", r"#\s?(?P<v>[A-Z0-9][A-Z0-9-]{5,24})\b", 30),
];

pub const COMMON_AMOUNT: &[RuleSpec] = &[
    RuleSpec::new(
        "amount_paid",
        r"(?i)\b(?:amount|total)\s{1,3}(?:paid|charged|debited)\b[^\n\d₹$]{0,24}[₹$]\s{0,2}(?P<v>\d[\d,]{0,11}(?:\.\d{1,2})?)",
        100,
    ),
    RuleSpec::new(
        "paid_suffix",
        r"(?i)[₹$]\s{0,2}(?P<v>\d[\d,]{0,11}(?:\.\d{1,2})?)\s{1,3}(?:paid|charged|debited)\b",
        95,
    ),
    RuleSpec::new(
        "labelled_total",
        r"(?i)\b(?:grand\s{1,3}total|order\s{1,3}(?:total|amount|value)|bill\s{1,3}(?:amount|total|value)|total\s{1,3}(?:amount|bill|payable|price)|net\s{1,3}(?:amount|payable|total)|amount\s{1,3}(?:payable|due)|invoice\s{1,3}(?:total|amount|value)|to\s{1,3}pay|you\s{1,3}paid|payment\s{1,3}of)\b[^\n\d₹$]{0,24}[₹$]\s{0,2}(?P<v>\d[\d,]{0,11}(?:\.\d{1,2})?)",
        90,
    ),
    RuleSpec::new(
        "labelled_plain",
        r"(?i)\b(?:amount\s{1,3}paid|grand\s{1,3}total|order\s{1,3}total|bill\s{1,3}amount|total\s{1,3}amount)\s{0,3}[:=-]?\s{0,3}(?P<v>\d[\d,]{0,11}\.\d{2})\b",
        85,
    ),
    RuleSpec::new(
        "total",
        r"(?i)\btotal\b[^\n\d₹$]{0,24}[₹$]\s{0,2}(?P<v>\d[\d,]{0,11}(?:\.\d{1,2})?)",
        70,
    ),
    RuleSpec::new(
        "subtotal",
        r"(?i)\b(?:sub\s{0,2}-?\s{0,2}total|items?\s{1,3}(?:sub)?total|cart\s{1,3}(?:value|total))\b[^\n\d₹$]{0,24}[₹$]\s{0,2}(?P<v>\d[\d,]{0,11}(?:\.\d{1,2})?)",
        40,
    ),
    RuleSpec::new(
        "bare_currency",
        r"[₹$]\s{0,2}(?P<v>\d[\d,]{0,11}(?:\.\d{1,2})?)",
        10,
    ),
];

pub const COMMON_ITEMS: &[RuleSpec] = &[
    RuleSpec::new(
        "qty_x_name",
        r"(?m)^[ \t]{0,8}(?:[-•*·][ \t]{0,3})?(?P<qty>\d{1,3})[ \t]{0,2}[xX×][ \t]{1,3}(?P<name>[^\n₹$]{2,100}?)[ \t]{1,8}(?:[-–:@|][ \t]{0,3})?[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)",
        90,
    ),
    RuleSpec::new(
        "name_x_qty",
        r"(?m)^[ \t]{0,8}(?:[-•*·][ \t]{0,3})?(?P<name>[^\n₹$]{2,100}?)[ \t]{1,3}[xX×][ \t]{0,2}(?P<qty>\d{1,3})\b[ \t]{0,8}(?:[-–:@|][ \t]{0,3})?[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)",
        85,
    ),
    RuleSpec::new(
        "name_qty_label",
        r"(?mi)^[ \t]{0,8}(?:[-•*·][ \t]{0,3})?(?P<name>[^\n₹$]{2,100}?)[ \t]{1,4}(?:qty|quantity)[ \t]{0,2}[:.]?[ \t]{0,2}(?P<qty>\d{1,3})[ \t]{1,8}(?:[-–:@|][ \t]{0,3})?(?:price[ \t]{0,2}:?[ \t]{0,2})?[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)",
        80,
    ),
    RuleSpec::new(
        "name_dash_price",
        r"(?m)^[ \t]{0,8}(?:[-•*·][ \t]{0,3})?(?P<name>[^\n₹$]{2,100}?)[ \t]{1,4}[-–—][ \t]{1,4}[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)[ \t]{0,4}$",
        70,
    ),
    RuleSpec::new(
        "table_row",
        r"(?m)^[ \t]{0,8}(?P<name>[A-Za-z][^\n₹$]{1,100}?)[ \t]{1,6}(?P<qty>\d{1,3})[ \t]{1,6}[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)[ \t]{0,4}$",
        60,
    ),
];

pub const COMMON_DATE: &[RuleSpec] = &[
    RuleSpec::new(
        "order_date_label",
        r"(?i)\b(?:order(?:ed)?\s{1,3}(?:date|on)|(?:order\s{1,3})?placed\s{1,3}on|date\s{1,3}of\s{1,3}(?:order|purchase)|invoice\s{1,3}date|booking\s{1,3}date|booked\s{1,3}on|purchase\s{1,3}date|shipment\s{1,3}date|pickup\s{1,3}date)\s{0,3}:?\s{0,3}(?P<v>[^\n]{5,40})",
        80,
    ),
    // Line-leading only, so "Expected Delivery Date:" never counts
    RuleSpec::new(
        "date_label",
        r"(?mi)^[ \t]{0,8}(?:(?:order|invoice|purchase|booking|transaction)\s{1,3})?date\s{0,3}:\s{0,3}(?P<v>[^\n]{5,40})",
        40,
    ),
];

pub const COMMON_TRACKING: &[RuleSpec] = &[RuleSpec::new(
    "tracking_label",
    r"(?i)\b(?:tracking\s{0,2}(?:id|number|no|#)?|awb\s{0,2}(?:no|number|#)?|air\s{0,2}waybill\s{0,2}(?:no|number)?|way\s{0,2}bill\s{0,2}(?:no|number)?|consignment\s{0,2}(?:no|number|id)?|docket\s{0,2}(?:no|number)?|shipment\s{0,2}(?:id|no|number))\.?\s{0,3}(?:is\s{1,3})?[:#-]?\s{0,3}(?P<v>[A-Z0-9]{8,22})\b",
    80,
)];

pub const COMMON_SELLER: &[RuleSpec] = &[
    RuleSpec::new(
        "sold_by",
        r"(?i)\bsold\s{1,3}by\s{0,3}:?\s{0,3}(?P<v>[^\n|,(]{2,60})",
        80,
    ),
    RuleSpec::new(
        "seller_label",
        r"(?i)\bseller(?:\s{1,3}name)?\s{0,3}:\s{0,3}(?P<v>[^\n|,(]{2,60})",
        70,
    ),
];

pub const COMMON_DELIVERY: &[RuleSpec] = &[RuleSpec::new(
    "delivery_window",
    r"(?i)\b(?:arriving(?:\s{1,3}(?:by|on))?|expected\s{1,3}(?:delivery(?:\s{1,3}(?:date|by|on))?|by)|estimated\s{1,3}delivery(?:\s{1,3}(?:date|by|on))?|delivery\s{1,3}(?:by|expected\s{1,3}(?:by|on)|date)|will\s{1,3}be\s{1,3}delivered\s{1,3}(?:by|on)|eta)\s{0,3}:?\s{0,3}(?P<v>[^\n]{3,40})",
    80,
)];

/// Item lines of food-delivery receipts: `Paneer Tikka (2) ₹300`
pub(crate) const FOOD_ITEMS: &[RuleSpec] = &[RuleSpec::new(
    "food_qty_paren",
    r"(?mi)^[ \t]{0,8}(?P<name>[^\n₹$()]{2,80}?)[ \t]{0,3}\((?:qty[ \t]{0,2}:?[ \t]{0,2})?(?P<qty>\d{1,2})\)[ \t]{1,6}[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)",
    75,
)];

/// Restaurant or store the order was placed with
pub(crate) const ORDERED_FROM: &[RuleSpec] = &[
    RuleSpec::new(
        "ordered_from",
        r"(?i)\b(?:order(?:ed)?|delivery)\s{1,3}from\s{1,3}(?P<v>[^\n|,!.]{2,60})",
        85,
    ),
    RuleSpec::new(
        "restaurant_label",
        r"(?i)\b(?:restaurant|store|outlet)\s{0,3}:\s{0,3}(?P<v>[^\n|,]{2,60})",
        80,
    ),
];
