// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

//! Order Extract
//!
//! Deterministic extraction of purchase orders from transactional email
//! sent by e-commerce, quick-delivery and logistics platforms.
//!
//! # Features
//!
//! - Platform classification over 26 declarative platform profiles, with a
//!   generic fallback for order-shaped mail from unknown senders
//! - Priority-ordered pattern cascades with per-field validators
//! - Line items with deduplication and a never-empty fallback
//! - Deterministic confidence scoring with per-category ceilings
//! - Structured per-call trace instead of log scraping
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use order_extract::{InboundEmail, PlatformId, extract};
//!
//! let received = Utc.with_ymd_and_hms(2024, 3, 12, 9, 30, 0).unwrap();
//! let email = InboundEmail::new(
//!     "noreply@bigbasket.com",
//!     "Your BigBasket order BB12345678 delivered",
//!     received,
//! )
//! .with_text("Bill Amount: Rs. 452.00\n2x Amul Butter 100g ₹232.00\n1x Fresh Paneer ₹220.00");
//!
//! let draft = extract(&email).unwrap();
//! assert_eq!(draft.platform, PlatformId::BigBasket);
//! assert_eq!(draft.order_id, "BB12345678");
//! assert_eq!(draft.amount, Some(452.0));
//! assert_eq!(draft.items.len(), 2);
//! ```

mod classifier;
mod confidence;
mod config;
mod content;
mod error;
mod extractor;
mod inbound;
mod normalize;
mod prepared;
mod registry;
pub mod rules;
mod trace;
pub mod toolkit;
mod types;

pub use classifier::{Classifier, KeywordGate, matches_profile};
pub use confidence::{AmountSignal, ConfidenceModel, ConfidenceSignals};
pub use config::{AmountCeilings, EngineConfig};
pub use content::{clean_html, decode_entities, extract_text_content};
pub use error::{ExtractError, Result};
pub use extractor::{
    AmountMatch, DateOutcome, Extractor, ItemsOutcome, OrderIdMatch, OrderMetadata, StatusOutcome,
};
pub use inbound::parse_inbound;
pub use normalize::{AMOUNT_NOT_APPLICABLE, AMOUNT_UNAVAILABLE, ExtractedFields, amount_signal};
pub use prepared::PreparedEmail;
pub use registry::{ParserRegistry, default_registry, detect_platform, extract};
pub use trace::{ExtractionTrace, Stage, TraceEvent};
pub use types::*;
