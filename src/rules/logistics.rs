//! Couriers and shipping aggregators; the order id is the AWB

use super::PlatformProfile;
use crate::toolkit::RuleSpec;
use crate::types::{PlatformCategory, PlatformId};

pub const SHIPROCKET: PlatformProfile = PlatformProfile {
    id: PlatformId::Shiprocket,
    name: "Shiprocket",
    category: PlatformCategory::Logistics,
    domains: &["shiprocket.in", "shiprocket.co"],
    indicators: &["shiprocket"],
    order_id: &[RuleSpec::new(
        "shiprocket_awb",
        r"(?i)\bawb\s{0,2}(?:no|number|#)?\.?\s{0,3}[:#-]?\s{0,3}(?P<v>[A-Z0-9]{8,18})\b",
        100,
    )],
    seller: &[RuleSpec::new(
        "shiprocket_store",
        r"(?i)\b(?:your\s{1,3})?order\s{1,3}from\s{1,3}(?P<v>[^\n|,!.]{2,60}?)\s{1,3}(?:has|is|was)\b",
        85,
    )],
    ..PlatformProfile::EMPTY
};

pub const DELHIVERY: PlatformProfile = PlatformProfile {
    id: PlatformId::Delhivery,
    name: "Delhivery",
    category: PlatformCategory::Logistics,
    domains: &["delhivery.com"],
    indicators: &["delhivery"],
    order_id: &[RuleSpec::new(
        "delhivery_waybill",
        r"(?i)\b(?:awb|waybill|tracking\s{0,2}(?:id|number|no))\s{0,2}(?:no|number|#)?\.?\s{0,3}[:#-]?\s{0,3}(?P<v>\d{10,15})\b",
        100,
    )],
    ..PlatformProfile::EMPTY
};

pub const BLUEDART: PlatformProfile = PlatformProfile {
    id: PlatformId::BlueDart,
    name: "Blue Dart",
    category: PlatformCategory::Logistics,
    domains: &["bluedart.com"],
    indicators: &["bluedart", "blue dart"],
    order_id: &[RuleSpec::new(
        "bluedart_awb",
        r"(?i)\b(?:awb|waybill)\s{0,2}(?:no|number|#)?\.?\s{0,3}[:#-]?\s{0,3}(?P<v>\d{9,12})\b",
        100,
    )],
    ..PlatformProfile::EMPTY
};

pub const DTDC: PlatformProfile = PlatformProfile {
    id: PlatformId::Dtdc,
    name: "DTDC",
    category: PlatformCategory::Logistics,
    domains: &["dtdc.com", "dtdc.in"],
    indicators: &["dtdc"],
    order_id: &[RuleSpec::new(
        "dtdc_consignment",
        r"(?i)\b(?:consignment|cn|awb|tracking)\s{0,2}(?:no|number|#|id)?\.?\s{0,3}[:#-]?\s{0,3}(?P<v>[A-Z]\d{8,11}|\d{9,12})\b",
        100,
    )],
    ..PlatformProfile::EMPTY
};

pub const EKART: PlatformProfile = PlatformProfile {
    id: PlatformId::Ekart,
    name: "Ekart",
    category: PlatformCategory::Logistics,
    domains: &["ekartlogistics.com", "ekart.com"],
    indicators: &["ekart"],
    order_id: &[RuleSpec::new(
        "ekart_tracking_id",
        r"\b(?P<v>FMP[PC]\d{10,12})\b",
        100,
    )],
    ..PlatformProfile::EMPTY
};

pub const XPRESSBEES: PlatformProfile = PlatformProfile {
    id: PlatformId::XpressBees,
    name: "XpressBees",
    category: PlatformCategory::Logistics,
    domains: &["xpressbees.com"],
    indicators: &["xpressbees"],
    order_id: &[RuleSpec::new(
        "xpressbees_awb",
        r"(?i)\b(?:awb|tracking)\s{0,2}(?:no|number|id|#)?\.?\s{0,3}[:#-]?\s{0,3}(?P<v>\d{12,16})\b",
        100,
    )],
    ..PlatformProfile::EMPTY
};

pub const INDIA_POST: PlatformProfile = PlatformProfile {
    id: PlatformId::IndiaPost,
    name: "India Post",
    category: PlatformCategory::Logistics,
    domains: &["indiapost.gov.in"],
    indicators: &["india post", "indiapost", "speed post", "speedpost"],
    order_id: &[RuleSpec::new(
        "india_post_article",
        r"\b(?P<v>[A-Z]{2}\d{9}IN)\b",
        100,
    )],
    ..PlatformProfile::EMPTY
};
