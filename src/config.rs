//! Engine configuration

use crate::confidence::ConfidenceModel;
use crate::error::{ExtractError, Result};
use crate::types::PlatformCategory;
use serde::{Deserialize, Serialize};

/// Upper bound of a plausible order amount per platform category.
///
/// Defaults: quick-delivery (grocery) 50,000; general retail, specialized
/// and generic 1,000,000; logistics 100,000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountCeilings {
    pub ecommerce: f64,
    pub quick_delivery: f64,
    pub logistics: f64,
    pub specialized: f64,
    pub generic: f64,
}

impl Default for AmountCeilings {
    fn default() -> Self {
        Self {
            ecommerce: 1_000_000.0,
            quick_delivery: 50_000.0,
            logistics: 100_000.0,
            specialized: 1_000_000.0,
            generic: 1_000_000.0,
        }
    }
}

impl AmountCeilings {
    #[must_use]
    pub const fn for_category(&self, category: PlatformCategory) -> f64 {
        match category {
            PlatformCategory::Ecommerce => self.ecommerce,
            PlatformCategory::QuickDelivery => self.quick_delivery,
            PlatformCategory::Logistics => self.logistics,
            PlatformCategory::Specialized => self.specialized,
            PlatformCategory::Generic => self.generic,
        }
    }
}

/// Configuration of a [`ParserRegistry`](crate::ParserRegistry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub amount_ceilings: AmountCeilings,
    pub confidence: ConfidenceModel,

    /// Body characters considered per message
    pub max_body_chars: usize,

    /// Line items kept per order
    pub max_items: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            amount_ceilings: AmountCeilings::default(),
            confidence: ConfidenceModel::default(),
            max_body_chars: 200_000,
            max_items: 50,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ExtractError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let c = &self.amount_ceilings;
        for (name, value) in [
            ("ecommerce", c.ecommerce),
            ("quick_delivery", c.quick_delivery),
            ("logistics", c.logistics),
            ("specialized", c.specialized),
            ("generic", c.generic),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExtractError::InvalidConfig(format!(
                    "amount ceiling for {name} must be positive, got {value}"
                )));
            }
        }
        if !self.confidence.is_valid() {
            return Err(ExtractError::InvalidConfig(
                "confidence weights and ceilings must lie in [0, 1]".into(),
            ));
        }
        if self.max_items == 0 {
            return Err(ExtractError::InvalidConfig("max_items must be at least 1".into()));
        }
        if self.max_body_chars == 0 {
            return Err(ExtractError::InvalidConfig(
                "max_body_chars must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
