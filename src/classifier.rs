//! Platform classification

use crate::error::{ExtractError, Result};
use crate::prepared::PreparedEmail;
use crate::rules::{ID_SHAPES, ORDER_KEYWORDS, PLATFORM_PROFILES, PROMO_KEYWORDS, PlatformProfile};
use crate::types::PlatformId;
use regex::Regex;
use tracing::debug;

/// Order and promotional keyword tests shared by the classifier and every
/// extractor
#[derive(Debug, Clone)]
pub struct KeywordGate {
    order: Regex,
    promo: Regex,
}

impl KeywordGate {
    pub fn compile() -> Result<Self> {
        let compile = |field: &'static str, pattern: &str| {
            Regex::new(pattern).map_err(|source| ExtractError::InvalidRule {
                platform: PlatformId::Generic,
                field,
                source,
            })
        };
        Ok(Self {
            order: compile("order_keywords", ORDER_KEYWORDS)?,
            promo: compile("promo_keywords", PROMO_KEYWORDS)?,
        })
    }

    #[must_use]
    pub fn mentions_order(&self, text: &str) -> bool {
        self.order.is_match(text)
    }

    #[must_use]
    pub fn is_promotional(&self, subject: &str) -> bool {
        self.promo.is_match(subject)
    }
}

/// Maps a message to the platform whose template it follows
#[derive(Debug, Clone)]
pub struct Classifier {
    profiles: Vec<&'static PlatformProfile>,
    id_shapes: Vec<Regex>,
    gate: KeywordGate,
}

impl Classifier {
    pub fn new(gate: KeywordGate) -> Result<Self> {
        let mut profiles = PLATFORM_PROFILES.to_vec();
        // stable: table order decides inside a category
        profiles.sort_by_key(|p| p.category.priority());

        let id_shapes = ID_SHAPES
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ExtractError::InvalidRule {
                    platform: PlatformId::Generic,
                    field: "id_shape",
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            profiles,
            id_shapes,
            gate,
        })
    }

    /// First profile that claims the message, else `Generic` when the message
    /// is order-shaped, else `None`
    #[must_use]
    pub fn detect(&self, email: &PreparedEmail<'_>) -> Option<PlatformId> {
        if let Some(profile) = self.profiles.iter().find(|p| matches_profile(p, email)) {
            debug!("Classified as {} ({})", profile.id, email.sender_domain());
            return Some(profile.id);
        }

        if self.is_order_shaped(email) {
            debug!("No platform profile matched; using generic fallback");
            return Some(PlatformId::Generic);
        }

        debug!("No platform matched");
        None
    }

    /// Generic fallback gate: an order-shaped id and an order keyword
    #[must_use]
    pub fn is_order_shaped(&self, email: &PreparedEmail<'_>) -> bool {
        self.id_shapes
            .iter()
            .any(|shape| shape.is_match(&email.search_text))
            && self.gate.mentions_order(&email.search_text)
    }
}

/// Sender domain match, or an indicator in subject or body
#[must_use]
pub fn matches_profile(profile: &PlatformProfile, email: &PreparedEmail<'_>) -> bool {
    profile.domains.iter().any(|d| email.is_from_domain(d))
        || profile.indicators.iter().any(|i| email.mentions(i))
}
