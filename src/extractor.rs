//! The extraction engine: one implementation driven by a platform profile

use crate::classifier::KeywordGate;
use crate::confidence::{ConfidenceModel, ConfidenceSignals};
use crate::config::EngineConfig;
use crate::error::{ExtractError, Result};
use crate::normalize::{ExtractedFields, amount_signal, normalize};
use crate::prepared::PreparedEmail;
use crate::rules::{
    COMMON_AMOUNT, COMMON_DATE, COMMON_DELIVERY, COMMON_ITEMS, COMMON_ORDER_ID, COMMON_SELLER,
    COMMON_TRACKING, PLATFORM_PROFILES, PlatformProfile,
};
use crate::toolkit::{
    Cascade, ItemSet, RuleSpec, detect_currency, detect_status, match_item_lines,
    parse_date, select_by_priority, select_by_priority_magnitude, start_of_day,
    subject_item_name, validate_amount, validate_identifier, validate_text,
};
use crate::trace::{ExtractionTrace, Stage};
use crate::types::{
    Currency, DateSource, FiredRule, ItemSource, ItemTier, LineItem, OrderDraft, OrderStatus,
    PlatformCategory, PlatformId,
};
use chrono::{DateTime, Utc};
use tracing::debug;

/// The winning identifier candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIdMatch {
    pub value: String,
    pub rule: &'static str,
    /// Read by a tracking/AWB rule because no order-id rule matched
    pub from_tracking: bool,
}

/// The winning amount candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountMatch {
    pub value: f64,
    pub currency: Currency,
    pub rule: &'static str,
}

/// Items and the tier that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsOutcome {
    pub items: Vec<LineItem>,
    pub tier: ItemTier,
    pub rules: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOutcome {
    pub date: DateTime<Utc>,
    pub source: DateSource,
    pub rule: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOutcome {
    pub status: OrderStatus,
    /// False when `status` is the category default
    pub classified: bool,
    pub rule: Option<&'static str>,
}

/// Auxiliary fields: tracking id, seller, delivery window, courier partner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMetadata {
    pub tracking_id: Option<String>,
    pub seller_name: Option<String>,
    pub expected_delivery: Option<String>,
    pub courier_name: Option<String>,
    pub fired_rules: Vec<FiredRule>,
}

/// Compiled cascades of one platform plus the bounds it extracts within
#[derive(Debug, Clone)]
pub struct Extractor {
    profile: &'static PlatformProfile,
    gate: KeywordGate,
    order_id: Cascade,
    amount: Cascade,
    items: Cascade,
    date: Cascade,
    tracking: Cascade,
    seller: Cascade,
    delivery: Cascade,
    couriers: Vec<&'static PlatformProfile>,
    amount_ceiling: f64,
    confidence: ConfidenceModel,
    max_items: usize,
}

impl Extractor {
    /// Compile `profile` followed by the shared rule tables
    pub fn new(
        profile: &'static PlatformProfile,
        config: &EngineConfig,
        gate: KeywordGate,
    ) -> Result<Self> {
        // Couriers identify the mail by its AWB, so tracking rules double as id rules
        let mut id_tables = vec![profile.order_id];
        if profile.is_courier() {
            id_tables.extend([profile.tracking, COMMON_TRACKING]);
        }
        id_tables.push(COMMON_ORDER_ID);

        Ok(Self {
            profile,
            gate,
            order_id: compile(profile, "order_id", &id_tables)?,
            amount: compile(profile, "amount", &[profile.amount, COMMON_AMOUNT])?,
            items: compile(profile, "items", &[profile.items, COMMON_ITEMS])?,
            date: compile(profile, "order_date", &[profile.date, COMMON_DATE])?,
            tracking: compile(profile, "tracking_id", &[profile.tracking, COMMON_TRACKING])?,
            seller: compile(profile, "seller_name", &[profile.seller, COMMON_SELLER])?,
            delivery: compile(
                profile,
                "expected_delivery",
                &[profile.delivery, COMMON_DELIVERY],
            )?,
            couriers: PLATFORM_PROFILES
                .iter()
                .copied()
                .filter(|p| p.is_courier())
                .collect(),
            amount_ceiling: config.amount_ceilings.for_category(profile.category),
            confidence: config.confidence,
            max_items: config.max_items,
        })
    }

    #[must_use]
    pub const fn profile(&self) -> &'static PlatformProfile {
        self.profile
    }

    #[must_use]
    pub const fn platform(&self) -> PlatformId {
        self.profile.id
    }

    #[must_use]
    pub const fn category(&self) -> PlatformCategory {
        self.profile.category
    }

    #[must_use]
    pub const fn amount_ceiling(&self) -> f64 {
        self.amount_ceiling
    }

    /// Sender or order keyword, and nothing promotional in the subject
    #[must_use]
    pub fn can_handle(&self, email: &PreparedEmail<'_>) -> bool {
        let from_platform = self.profile.domains.iter().any(|d| email.is_from_domain(d));
        let order_related = self.gate.mentions_order(&email.search_text);
        if !(from_platform || order_related) {
            debug!("{}: not order related", self.profile.id);
            return false;
        }
        if self.gate.is_promotional(&email.subject) {
            debug!("{}: promotional subject", self.profile.id);
            return false;
        }
        true
    }

    /// Order-id rules first; a tracking/AWB number stands in when none match
    #[must_use]
    pub fn extract_order_id(&self, email: &PreparedEmail<'_>) -> Option<OrderIdMatch> {
        let text = &email.search_text;
        if let Some(found) = self.order_id.first(text, validate_identifier) {
            return Some(OrderIdMatch {
                value: found.value,
                rule: found.rule,
                from_tracking: false,
            });
        }
        self.tracking
            .first(text, validate_identifier)
            .map(|found| OrderIdMatch {
                value: found.value,
                rule: found.rule,
                from_tracking: true,
            })
    }

    /// Highest-priority amount within the category ceiling; the larger
    /// figure wins between equal priorities
    #[must_use]
    pub fn extract_amount(&self, email: &PreparedEmail<'_>) -> Option<AmountMatch> {
        let text = &email.search_text;
        let candidates = self
            .amount
            .candidates(text, |raw| validate_amount(raw, self.amount_ceiling));
        let best = select_by_priority_magnitude(candidates)?;
        Some(AmountMatch {
            value: best.value,
            currency: currency_before(text, best.position),
            rule: best.rule,
        })
    }

    /// Body lines first, then a product named in the subject, then a
    /// placeholder carrying the order id and total
    #[must_use]
    pub fn extract_items(
        &self,
        email: &PreparedEmail<'_>,
        order_id: &str,
        amount: Option<f64>,
    ) -> ItemsOutcome {
        let mut set = ItemSet::new(self.max_items);
        let mut rules = Vec::new();
        for line in match_item_lines(&self.items, &email.body, self.amount_ceiling) {
            if set.insert(LineItem::from(&line)) && !rules.contains(&line.rule) {
                rules.push(line.rule);
            }
        }
        if !set.is_empty() {
            return ItemsOutcome {
                items: set.into_vec(),
                tier: ItemTier::Body,
                rules,
            };
        }

        if let Some(name) = subject_item_name(&email.subject) {
            return ItemsOutcome {
                items: vec![LineItem::priced(
                    name,
                    1,
                    amount.unwrap_or(0.0),
                    ItemSource::Subject,
                )],
                tier: ItemTier::Subject,
                rules: vec!["subject_product"],
            };
        }

        ItemsOutcome {
            items: vec![self.placeholder_item(order_id, amount)],
            tier: ItemTier::Placeholder,
            rules: Vec::new(),
        }
    }

    /// Labelled order date on or before receipt, else the receipt timestamp
    #[must_use]
    pub fn extract_date(&self, email: &PreparedEmail<'_>) -> DateOutcome {
        let received = email.email.received_at;
        let latest = received.date_naive();
        match self.date.first(&email.search_text, |raw| {
            parse_date(raw, received).filter(|date| *date <= latest)
        }) {
            Some(found) => DateOutcome {
                date: start_of_day(found.value),
                source: DateSource::Body,
                rule: Some(found.rule),
            },
            None => DateOutcome {
                date: received,
                source: DateSource::Received,
                rule: None,
            },
        }
    }

    #[must_use]
    pub fn extract_status(&self, email: &PreparedEmail<'_>) -> StatusOutcome {
        let courier = self.profile.is_courier();
        match detect_status(&email.subject, &email.body, courier) {
            Some((status, label)) => StatusOutcome {
                status,
                classified: true,
                rule: Some(label),
            },
            None => StatusOutcome {
                status: if courier {
                    OrderStatus::Booked
                } else {
                    OrderStatus::Ordered
                },
                classified: false,
                rule: None,
            },
        }
    }

    /// Tracking id, seller, delivery window and courier partner. When the
    /// identifier is itself a tracking number it is reused as `tracking_id`.
    #[must_use]
    pub fn extract_metadata(
        &self,
        email: &PreparedEmail<'_>,
        order_id: &OrderIdMatch,
    ) -> OrderMetadata {
        let text = &email.search_text;
        let mut meta = OrderMetadata::default();

        if self.profile.is_courier() || order_id.from_tracking {
            meta.tracking_id = Some(order_id.value.clone());
        } else if let Some(found) = select_by_priority(self.tracking.candidates(text, |raw| {
            validate_identifier(raw).filter(|id| *id != order_id.value)
        })) {
            meta.fired_rules.push(fired_rule("tracking_id", found.rule));
            meta.tracking_id = Some(found.value);
        }

        if let Some(found) = self.seller.first(text, |raw| validate_text(raw, 2, 60)) {
            meta.fired_rules.push(fired_rule("seller_name", found.rule));
            meta.seller_name = Some(found.value);
        }

        if let Some(found) = self
            .delivery
            .first(text, |raw| validate_text(first_clause(raw), 3, 40))
        {
            meta.fired_rules.push(fired_rule("expected_delivery", found.rule));
            meta.expected_delivery = Some(found.value);
        }

        meta.courier_name = self.detect_courier(email);
        meta
    }

    #[must_use]
    pub fn compute_confidence(&self, fields: &ExtractedFields) -> f64 {
        let signals = ConfidenceSignals {
            order_id: !fields.order_id.is_empty(),
            amount: amount_signal(fields.amount, self.profile.category),
            real_items: fields.real_item_count(),
            status_classified: fields.status_classified,
            date_from_body: fields.date_source == DateSource::Body,
            metadata_fields: fields.metadata_fields(),
        };
        self.confidence.score(&signals, self.profile.category)
    }

    /// Run every field cascade and assemble the draft.
    ///
    /// The only hard stop is a missing identifier; every other field
    /// degrades to a sentinel and a lower confidence.
    pub fn extract(
        &self,
        email: &PreparedEmail<'_>,
        trace: &mut ExtractionTrace,
    ) -> Result<OrderDraft> {
        let platform = self.profile.id;
        let mut fired_rules = Vec::new();

        let Some(order_id) = self.extract_order_id(email) else {
            return Err(ExtractError::NoIdentifier { platform });
        };
        trace.record(
            Stage::OrderId,
            format!("{} via {}", order_id.value, order_id.rule),
        );
        fired_rules.push(fired_rule("order_id", order_id.rule));

        let amount = self.extract_amount(email);
        if let Some(found) = amount {
            trace.record(Stage::Amount, format!("{} via {}", found.value, found.rule));
            fired_rules.push(fired_rule("amount", found.rule));
        } else {
            trace.record(Stage::Amount, "none");
        }
        let amount_value = amount.map(|a| a.value);

        let items = self.extract_items(email, &order_id.value, amount_value);
        trace.record(
            Stage::Items,
            format!("{} item(s) from {:?}", items.items.len(), items.tier),
        );
        fired_rules.extend(items.rules.iter().map(|rule| fired_rule("items", rule)));

        let date = self.extract_date(email);
        trace.record(Stage::Date, format!("{} from {:?}", date.date, date.source));
        if let Some(rule) = date.rule {
            fired_rules.push(fired_rule("order_date", rule));
        }

        let status = self.extract_status(email);
        trace.record(
            Stage::Status,
            format!(
                "{} ({})",
                status.status,
                if status.classified { "classified" } else { "default" }
            ),
        );
        if let Some(rule) = status.rule {
            fired_rules.push(fired_rule("status", rule));
        }

        let meta = self.extract_metadata(email, &order_id);
        trace.record(
            Stage::Metadata,
            format!(
                "tracking={:?} seller={:?} delivery={:?} courier={:?}",
                meta.tracking_id, meta.seller_name, meta.expected_delivery, meta.courier_name
            ),
        );
        fired_rules.extend(meta.fired_rules);

        let fields = ExtractedFields {
            order_id: order_id.value,
            amount: amount_value,
            currency: amount.map_or(Currency::Inr, |a| a.currency),
            order_date: date.date,
            date_source: date.source,
            status: status.status,
            status_classified: status.classified,
            items: items.items,
            item_tier: items.tier,
            tracking_id: meta.tracking_id,
            seller_name: meta.seller_name,
            expected_delivery: meta.expected_delivery,
            courier_name: meta.courier_name,
            fired_rules,
        };

        let confidence = self.compute_confidence(&fields);
        trace.record(Stage::Confidence, format!("{confidence:.3}"));

        Ok(normalize(
            platform,
            self.profile.category,
            fields,
            confidence,
            email.email,
        ))
    }

    fn placeholder_item(&self, order_id: &str, amount: Option<f64>) -> LineItem {
        let name = match self.profile.id {
            PlatformId::Generic => format!("Order {order_id}"),
            _ => format!("{} order {order_id}", self.profile.name),
        };
        LineItem::priced(name, 1, amount.unwrap_or(0.0), ItemSource::Placeholder)
    }

    /// Courier partner named in the body; a courier's own mail falls back
    /// to its own name
    fn detect_courier(&self, email: &PreparedEmail<'_>) -> Option<String> {
        self.couriers
            .iter()
            .filter(|c| c.id != self.profile.id)
            .find(|c| c.indicators.iter().any(|i| email.body_lower.contains(i)))
            .map(|c| c.name.to_string())
            .or_else(|| {
                self.profile
                    .is_courier()
                    .then(|| self.profile.name.to_string())
            })
    }
}

fn compile(
    profile: &PlatformProfile,
    field: &'static str,
    tables: &[&'static [RuleSpec]],
) -> Result<Cascade> {
    Cascade::compile(field, tables.iter().flat_map(|t| t.iter())).map_err(|source| {
        ExtractError::InvalidRule {
            platform: profile.id,
            field,
            source,
        }
    })
}

fn fired_rule(field: &str, rule: &str) -> FiredRule {
    FiredRule {
        field: field.to_string(),
        rule: rule.to_string(),
    }
}

/// Currency marker just before the amount digits
fn currency_before(text: &str, position: usize) -> Currency {
    let lead: String = text
        .get(..position)
        .unwrap_or_default()
        .chars()
        .rev()
        .take(4)
        .collect();
    detect_currency(&lead)
}

/// Delivery windows run on into the next sentence in most templates
fn first_clause(raw: &str) -> &str {
    [". ", " | ", " - "]
        .iter()
        .filter_map(|sep| raw.find(sep))
        .min()
        .map_or(raw, |end| &raw[..end])
}
