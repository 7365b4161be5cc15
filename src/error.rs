//! Error types for order extraction

use crate::types::PlatformId;
use thiserror::Error;

/// Reasons the engine declines to produce an [`OrderDraft`](crate::OrderDraft),
/// plus the initialization failures of the registry and the inbound adapter.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No platform profile and no generic fallback matched the message
    #[error("No platform matched the message")]
    NoPlatformMatch,

    /// The matched extractor refused the message (promotional or not an order mail)
    #[error("Message is not transactional for {platform}")]
    NotTransactional { platform: PlatformId },

    /// A platform matched but no valid order or tracking id was found
    #[error("No order identifier found for {platform}")]
    NoIdentifier { platform: PlatformId },

    /// Extraction panicked and was contained at the registry boundary
    #[error("Extractor fault for {platform}: {message}")]
    InternalFault { platform: PlatformId, message: String },

    /// A static rule table contains a pattern that does not compile
    #[error("Invalid {field} rule for {platform}: {source}")]
    InvalidRule {
        platform: PlatformId,
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// Engine configuration could not be parsed or is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse the raw message structure
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}

impl ExtractError {
    /// True for the per-message outcomes that mean "declined", as opposed to
    /// setup failures.
    #[must_use]
    pub const fn is_decline(&self) -> bool {
        matches!(
            self,
            Self::NoPlatformMatch
                | Self::NotTransactional { .. }
                | Self::NoIdentifier { .. }
                | Self::InternalFault { .. }
        )
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
