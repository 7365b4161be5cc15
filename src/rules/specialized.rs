//! Pharmacy, eyewear and baby-care stores

use super::PlatformProfile;
use crate::toolkit::RuleSpec;
use crate::types::{PlatformCategory, PlatformId};

pub const PHARMEASY: PlatformProfile = PlatformProfile {
    id: PlatformId::PharmEasy,
    name: "PharmEasy",
    category: PlatformCategory::Specialized,
    domains: &["pharmeasy.in"],
    indicators: &["pharmeasy"],
    order_id: &[RuleSpec::new(
        "pharmeasy_order_id",
        r"(?i)\border\s{0,2}(?:id|no)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>[A-Z]{0,4}\d{6,16})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const TATA_1MG: PlatformProfile = PlatformProfile {
    id: PlatformId::Tata1mg,
    name: "Tata 1mg",
    category: PlatformCategory::Specialized,
    domains: &["1mg.com"],
    indicators: &["tata 1mg", "tata1mg", "1mg.com"],
    order_id: &[RuleSpec::new(
        "tata_1mg_order_id",
        r"(?i)\border\s{0,2}(?:id|no)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>(?:PO)?[A-Z0-9]{6,18})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const LENSKART: PlatformProfile = PlatformProfile {
    id: PlatformId::Lenskart,
    name: "Lenskart",
    category: PlatformCategory::Specialized,
    domains: &["lenskart.com"],
    indicators: &["lenskart"],
    order_id: &[RuleSpec::new(
        "lenskart_order_no",
        r"(?i)\border\s{0,2}(?:id|no|number)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>\d{8,14})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const FIRSTCRY: PlatformProfile = PlatformProfile {
    id: PlatformId::FirstCry,
    name: "FirstCry",
    category: PlatformCategory::Specialized,
    domains: &["firstcry.com"],
    indicators: &["firstcry"],
    order_id: &[RuleSpec::new(
        "firstcry_order_no",
        r"(?i)\border\s{0,2}(?:id|no|number)\.?\s{0,3}[:#-]?\s{0,3}#?\s{0,2}(?P<v>\d{7,14})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};
