//! Final assembly of an [`OrderDraft`]

use crate::confidence::AmountSignal;
use crate::toolkit::format_amount;
use crate::types::{
    Currency, DateSource, ExtractionMetadata, FiredRule, InboundEmail, ItemTier, LineItem,
    OrderDraft, OrderStatus, PlatformCategory, PlatformId, round_cents,
};
use chrono::{DateTime, Utc};

/// `formatted_amount` when no amount was found
pub const AMOUNT_UNAVAILABLE: &str = "unavailable";

/// `formatted_amount` of courier mails, which carry no order amount
pub const AMOUNT_NOT_APPLICABLE: &str = "n/a (courier service)";

/// Field values of one extraction, before sentinels and metadata are applied
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub order_id: String,
    pub amount: Option<f64>,
    pub currency: Currency,
    pub order_date: DateTime<Utc>,
    pub date_source: DateSource,
    pub status: OrderStatus,
    pub status_classified: bool,
    pub items: Vec<LineItem>,
    pub item_tier: ItemTier,
    pub tracking_id: Option<String>,
    pub seller_name: Option<String>,
    pub expected_delivery: Option<String>,
    pub courier_name: Option<String>,
    pub fired_rules: Vec<FiredRule>,
}

impl ExtractedFields {
    /// How many of tracking id, seller and delivery window are present
    #[must_use]
    pub fn metadata_fields(&self) -> u8 {
        u8::from(self.tracking_id.is_some())
            + u8::from(self.seller_name.is_some())
            + u8::from(self.expected_delivery.is_some())
    }

    #[must_use]
    pub fn real_item_count(&self) -> usize {
        self.items.iter().filter(|i| !i.is_placeholder()).count()
    }
}

/// Amount outcome as the confidence model sees it
#[must_use]
pub fn amount_signal(amount: Option<f64>, category: PlatformCategory) -> AmountSignal {
    match amount {
        Some(_) => AmountSignal::Found,
        None if !category.expects_amount() => AmountSignal::NotApplicable,
        None => AmountSignal::Missing,
    }
}

/// Build the draft: amount sentinels, rounding and provenance metadata.
///
/// Only values derived from `email` are stamped, so the same input always
/// produces the same draft.
#[must_use]
pub fn normalize(
    platform: PlatformId,
    category: PlatformCategory,
    fields: ExtractedFields,
    confidence: f64,
    email: &InboundEmail,
) -> OrderDraft {
    let (amount, formatted_amount) = match (fields.amount, amount_signal(fields.amount, category)) {
        (Some(value), _) => {
            let value = round_cents(value);
            (Some(value), format_amount(value, fields.currency))
        }
        (None, AmountSignal::NotApplicable) => (Some(0.0), AMOUNT_NOT_APPLICABLE.to_string()),
        (None, _) => (None, AMOUNT_UNAVAILABLE.to_string()),
    };

    OrderDraft {
        platform,
        order_id: fields.order_id,
        amount,
        formatted_amount,
        currency: fields.currency,
        order_date: fields.order_date,
        status: fields.status,
        items: fields.items,
        tracking_id: fields.tracking_id,
        seller_name: fields.seller_name,
        expected_delivery: fields.expected_delivery,
        courier_name: fields.courier_name,
        confidence: confidence.clamp(0.0, 1.0),
        extraction_metadata: ExtractionMetadata {
            fired_rules: fields.fired_rules,
            item_tier: fields.item_tier,
            date_source: fields.date_source,
            status_classified: fields.status_classified,
            source_message_id: email.provider_message_id.clone(),
            source_received_at: email.received_at,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}
