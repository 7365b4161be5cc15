//! Deterministic confidence scoring

use crate::types::PlatformCategory;
use serde::{Deserialize, Serialize};

/// How the amount field turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSignal {
    Missing,
    /// Courier mails without a monetary amount
    NotApplicable,
    Found,
}

impl AmountSignal {
    const fn credit(self) -> f64 {
        match self {
            Self::Missing => 0.0,
            Self::NotApplicable => 0.5,
            Self::Found => 1.0,
        }
    }
}

/// Completeness signals of one extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceSignals {
    pub order_id: bool,
    pub amount: AmountSignal,
    /// Items read from the message (placeholders excluded)
    pub real_items: usize,
    /// Status came from a keyword rather than the category default
    pub status_classified: bool,
    pub date_from_body: bool,
    /// How many of tracking id, seller and delivery window were found (0-3)
    pub metadata_fields: u8,
}

/// Weights and ceilings of the score
/// `clamp(base + Σ weight·signal, 0, ceiling)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceModel {
    pub base: f64,
    pub order_id: f64,
    pub amount: f64,
    pub items: f64,
    pub status: f64,
    pub date: f64,
    pub metadata: f64,

    /// Cap for platform-specific extractors
    pub platform_ceiling: f64,

    /// Cap for the generic fallback extractor
    pub generic_ceiling: f64,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self {
            base: 0.10,
            order_id: 0.30,
            amount: 0.20,
            items: 0.15,
            status: 0.10,
            date: 0.05,
            metadata: 0.10,
            platform_ceiling: 0.95,
            generic_ceiling: 0.80,
        }
    }
}

impl ConfidenceModel {
    #[must_use]
    pub fn ceiling(&self, category: PlatformCategory) -> f64 {
        match category {
            PlatformCategory::Generic => self.generic_ceiling,
            _ => self.platform_ceiling,
        }
        .clamp(0.0, 1.0)
    }

    /// Score `signals` for an extractor of `category`, rounded to three decimals
    #[must_use]
    pub fn score(&self, signals: &ConfidenceSignals, category: PlatformCategory) -> f64 {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };

        let raw = self.base
            + self.order_id * flag(signals.order_id)
            + self.amount * signals.amount.credit()
            + self.items * flag(signals.real_items > 0)
            + self.status * flag(signals.status_classified)
            + self.date * flag(signals.date_from_body)
            + self.metadata * f64::from(signals.metadata_fields.min(3)) / 3.0;

        let clamped = raw.clamp(0.0, self.ceiling(category));
        (clamped * 1000.0).round() / 1000.0
    }

    /// Every weight lies in `[0, 1]`
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.base,
            self.order_id,
            self.amount,
            self.items,
            self.status,
            self.date,
            self.metadata,
            self.platform_ceiling,
            self.generic_ceiling,
        ]
        .iter()
        .all(|w| (0.0..=1.0).contains(w))
    }
}
