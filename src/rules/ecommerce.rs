//! General retail marketplaces

use super::PlatformProfile;
use crate::toolkit::RuleSpec;
use crate::types::{PlatformCategory, PlatformId};

pub const AMAZON: PlatformProfile = PlatformProfile {
    id: PlatformId::Amazon,
    name: "Amazon",
    category: PlatformCategory::Ecommerce,
    domains: &["amazon.in", "amazon.com"],
    indicators: &["amazon.in", "amazon.com", "amazon"],
    order_id: &[RuleSpec::new(
        "amazon_order_id",
        r"\b(?P<v>\d{3}-\d{7}-\d{7})\b",
        100,
    )],
    items: &[RuleSpec::new(
        "amazon_item_block",
        r"(?mi)^[ \t]{0,8}(?P<name>[^\n₹$]{3,100})\n[ \t]{0,8}(?:qty|quantity)[ \t]{0,2}:[ \t]{0,2}(?P<qty>\d{1,3})[ \t]{0,4}\n[ \t]{0,8}[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)",
        75,
    )],
    seller: &[RuleSpec::new(
        "amazon_sold_by",
        r"(?mi)\bsold\s{1,3}by\s{0,3}:?\s{0,3}(?P<v>[^\n|,(]{2,60}?)(?:\s{1,3}and\s{1,3}fulfilled\b|\s{0,2}$)",
        90,
    )],
    ..PlatformProfile::EMPTY
};

pub const FLIPKART: PlatformProfile = PlatformProfile {
    id: PlatformId::Flipkart,
    name: "Flipkart",
    category: PlatformCategory::Ecommerce,
    domains: &["flipkart.com", "fkrt.it"],
    indicators: &["flipkart"],
    order_id: &[RuleSpec::new(
        "flipkart_order_id",
        r"\b(?P<v>OD\d{15,21})\b",
        100,
    )],
    tracking: &[RuleSpec::new(
        "ekart_tracking",
        r"\b(?P<v>FMP[PC]\d{10,12})\b",
        90,
    )],
    ..PlatformProfile::EMPTY
};

pub const MYNTRA: PlatformProfile = PlatformProfile {
    id: PlatformId::Myntra,
    name: "Myntra",
    category: PlatformCategory::Ecommerce,
    domains: &["myntra.com"],
    indicators: &["myntra"],
    order_id: &[RuleSpec::new(
        "myntra_order_no",
        r"(?i)\border\s{0,2}(?:no|number|id)\.?\s{0,3}[:#-]?\s{0,3}(?P<v>\d{7}-\d{7}-\d{7}|\d{10,20})\b",
        100,
    )],
    items: &[RuleSpec::new(
        "myntra_size_qty",
        r"(?mi)^[ \t]{0,8}(?P<name>[^\n₹$|]{3,100}?)[ \t]{0,3}\|?[ \t]{0,3}size[ \t]{0,2}:[ \t]{0,2}[A-Z0-9]{1,5}[ \t]{0,3}\|?[ \t]{0,3}qty[ \t]{0,2}:[ \t]{0,2}(?P<qty>\d{1,3})[ \t]{0,6}[₹$][ \t]{0,2}(?P<price>\d[\d,]{0,8}(?:\.\d{1,2})?)",
        88,
    )],
    ..PlatformProfile::EMPTY
};

pub const AJIO: PlatformProfile = PlatformProfile {
    id: PlatformId::Ajio,
    name: "AJIO",
    category: PlatformCategory::Ecommerce,
    domains: &["ajio.com"],
    indicators: &["ajio"],
    order_id: &[RuleSpec::new("ajio_order_id", r"\b(?P<v>F[NL]\d{8,12})\b", 100)],
    ..PlatformProfile::EMPTY
};

pub const MEESHO: PlatformProfile = PlatformProfile {
    id: PlatformId::Meesho,
    name: "Meesho",
    category: PlatformCategory::Ecommerce,
    domains: &["meesho.com"],
    indicators: &["meesho"],
    order_id: &[RuleSpec::new(
        "meesho_order_id",
        r"(?i)\b(?:sub[\s-]?)?order\s{0,2}(?:id|no|number)\.?\s{0,3}[:#-]?\s{0,3}(?P<v>\d{9,20})",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const NYKAA: PlatformProfile = PlatformProfile {
    id: PlatformId::Nykaa,
    name: "Nykaa",
    category: PlatformCategory::Ecommerce,
    domains: &["nykaa.com", "nykaafashion.com"],
    indicators: &["nykaa"],
    order_id: &[RuleSpec::new(
        "nykaa_order_id",
        r"\b(?P<v>NYK[A-Z0-9-]{5,25})\b",
        100,
    )],
    ..PlatformProfile::EMPTY
};

pub const TATA_CLIQ: PlatformProfile = PlatformProfile {
    id: PlatformId::TataCliq,
    name: "Tata CLiQ",
    category: PlatformCategory::Ecommerce,
    domains: &["tatacliq.com"],
    indicators: &["tatacliq", "tata cliq"],
    order_id: &[RuleSpec::new(
        "tatacliq_order_no",
        r"(?i)\border\s{0,2}(?:no|number|id)\.?\s{0,3}[:#-]?\s{0,3}(?P<v>\d{12,18})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const SNAPDEAL: PlatformProfile = PlatformProfile {
    id: PlatformId::Snapdeal,
    name: "Snapdeal",
    category: PlatformCategory::Ecommerce,
    domains: &["snapdeal.com"],
    indicators: &["snapdeal"],
    order_id: &[RuleSpec::new(
        "snapdeal_order_id",
        r"(?i)\b(?:sub\s{0,2})?order\s{0,2}(?:id|no|number)?\.?\s{0,3}[:#-]?\s{0,3}(?P<v>S?\d{9,15})\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};

pub const JIOMART: PlatformProfile = PlatformProfile {
    id: PlatformId::JioMart,
    name: "JioMart",
    category: PlatformCategory::Ecommerce,
    domains: &["jiomart.com"],
    indicators: &["jiomart"],
    order_id: &[RuleSpec::new(
        "jiomart_order_no",
        r"(?i)\border\s{0,2}(?:no|number|id)\.?\s{0,3}[:#-]?\s{0,3}(?P<v>[A-Z]{0,3}\d{10,18}[A-Z]?)\b",
        95,
    )],
    ..PlatformProfile::EMPTY
};
