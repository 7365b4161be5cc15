//! Grocery and food quick-delivery apps

use super::{FOOD_ITEMS, ORDERED_FROM, PlatformProfile};
use crate::toolkit::RuleSpec;
use crate::types::{PlatformCategory, PlatformId};

pub const BIGBASKET: PlatformProfile = PlatformProfile {
    id: PlatformId::BigBasket,
    name: "BigBasket",
    category: PlatformCategory::QuickDelivery,
    domains: &["bigbasket.com"],
    indicators: &["bigbasket", "bbnow", "bbdaily"],
    order_id: &[
        RuleSpec::new("bigbasket_order_id", r"\b(?P<v>BB\d{6,12})\b", 100),
        RuleSpec::new(
            "bigbasket_order_no",
            r"(?i)\border\s{0,2}(?:id|no|number)\.?\s{0,3}[:#-]?\s{0,3}(?P<v>\d{8,14})\b",
            90,
        ),
    ],
    delivery: &[RuleSpec::new(
        "bigbasket_slot",
        r"(?i)\b(?:delivery\s{1,3})?slot\s{0,3}:?\s{0,3}(?P<v>[^\n]{3,40})",
        85,
    )],
    ..PlatformProfile::EMPTY
};

pub const BLINKIT: PlatformProfile = PlatformProfile {
    id: PlatformId::Blinkit,
    name: "Blinkit",
    category: PlatformCategory::QuickDelivery,
    domains: &["blinkit.com", "grofers.com"],
    indicators: &["blinkit", "grofers"],
    order_id: &[RuleSpec::new(
        "blinkit_order_id",
        r"(?i)\border\s{0,2}(?:id|no)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>(?:ORD)?\d{8,16})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const ZEPTO: PlatformProfile = PlatformProfile {
    id: PlatformId::Zepto,
    name: "Zepto",
    category: PlatformCategory::QuickDelivery,
    domains: &["zeptonow.com", "zepto.com"],
    indicators: &["zepto"],
    order_id: &[RuleSpec::new(
        "zepto_order_id",
        r"(?i)\border\s{0,2}(?:id|no)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>[A-Z0-9]{8,20})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const DUNZO: PlatformProfile = PlatformProfile {
    id: PlatformId::Dunzo,
    name: "Dunzo",
    category: PlatformCategory::QuickDelivery,
    domains: &["dunzo.com", "dunzo.in"],
    indicators: &["dunzo"],
    order_id: &[RuleSpec::new(
        "dunzo_task_id",
        r"(?i)\b(?:order|task)\s{0,2}(?:id|no)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>[A-Z0-9]{6,16})\b",
        95,
    )],
    seller: ORDERED_FROM,
    ..PlatformProfile::EMPTY
};

pub const SWIGGY: PlatformProfile = PlatformProfile {
    id: PlatformId::Swiggy,
    name: "Swiggy",
    category: PlatformCategory::QuickDelivery,
    domains: &["swiggy.in", "swiggy.com"],
    indicators: &["swiggy", "instamart"],
    order_id: &[RuleSpec::new(
        "swiggy_order_id",
        r"(?i)\border\s{0,2}(?:id|no|number)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>\d{10,18})\b",
        95,
    )],
    items: FOOD_ITEMS,
    seller: ORDERED_FROM,
    ..PlatformProfile::EMPTY
};

pub const ZOMATO: PlatformProfile = PlatformProfile {
    id: PlatformId::Zomato,
    name: "Zomato",
    category: PlatformCategory::QuickDelivery,
    domains: &["zomato.com"],
    indicators: &["zomato"],
    order_id: &[RuleSpec::new(
        "zomato_order_id",
        r"(?i)\border\s{0,2}(?:id|no)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>\d{8,14})\b",
        95,
    )],
    items: FOOD_ITEMS,
    seller: ORDERED_FROM,
    ..PlatformProfile::EMPTY
};
