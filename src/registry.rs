//! Closed platform registry and the public extraction entry points

use crate::classifier::{Classifier, KeywordGate};
use crate::config::EngineConfig;
use crate::error::{ExtractError, Result};
use crate::extractor::Extractor;
use crate::prepared::PreparedEmail;
use crate::rules::{GENERIC, PLATFORM_PROFILES};
use crate::trace::{ExtractionTrace, Stage};
use crate::types::{InboundEmail, OrderDraft, PlatformId};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Every platform extractor, built once from the static rule tables.
///
/// The registry holds no per-call state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    classifier: Classifier,
    extractors: BTreeMap<PlatformId, Extractor>,
    config: EngineConfig,
}

impl ParserRegistry {
    /// Compile every rule table under `config`
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let gate = KeywordGate::compile()?;

        let extractors = PLATFORM_PROFILES
            .iter()
            .copied()
            .chain(std::iter::once(&GENERIC))
            .map(|profile| Ok((profile.id, Extractor::new(profile, &config, gate.clone())?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        debug!("Registered {} extractors", extractors.len());

        Ok(Self {
            classifier: Classifier::new(gate)?,
            extractors,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn get(&self, platform: PlatformId) -> Option<&Extractor> {
        self.extractors.get(&platform)
    }

    /// Registered platforms, `generic` included
    pub fn platforms(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.extractors.keys().copied()
    }

    #[must_use]
    pub fn detect_platform(&self, email: &InboundEmail) -> Option<PlatformId> {
        self.classifier
            .detect(&PreparedEmail::new(email, self.config.max_body_chars))
    }

    /// Extract an order draft; `None` when the message is declined
    #[must_use]
    pub fn extract(&self, email: &InboundEmail) -> Option<OrderDraft> {
        self.try_extract(email).ok()
    }

    /// Like [`extract`](Self::extract), with the reason for declining
    pub fn try_extract(&self, email: &InboundEmail) -> Result<OrderDraft> {
        let mut trace = ExtractionTrace::default();
        self.run(email, &mut trace)
    }

    /// Like [`extract`](Self::extract), returning what happened at each stage
    #[must_use]
    pub fn extract_traced(&self, email: &InboundEmail) -> (Option<OrderDraft>, ExtractionTrace) {
        let mut trace = ExtractionTrace::default();
        let draft = self.run(email, &mut trace).ok();
        (draft, trace)
    }

    fn run(&self, email: &InboundEmail, trace: &mut ExtractionTrace) -> Result<OrderDraft> {
        self.run_with(email, trace, Extractor::extract)
    }

    /// Classification, gate and `extract` all run inside the fault boundary
    fn run_with<F>(
        &self,
        email: &InboundEmail,
        trace: &mut ExtractionTrace,
        extract: F,
    ) -> Result<OrderDraft>
    where
        F: FnOnce(&Extractor, &PreparedEmail<'_>, &mut ExtractionTrace) -> Result<OrderDraft>,
    {
        let guarded = catch_unwind(AssertUnwindSafe(|| self.dispatch(email, trace, extract)));
        let result = guarded.unwrap_or_else(|payload| {
            let platform = trace.platform.unwrap_or(PlatformId::Unknown);
            let message = panic_message(payload.as_ref());
            warn!("Extractor for {} panicked: {}", platform, message);
            Err(ExtractError::InternalFault { platform, message })
        });

        match &result {
            Ok(draft) => trace.record(
                Stage::Outcome,
                format!("{} {} ({:.3})", draft.platform, draft.order_id, draft.confidence),
            ),
            Err(err) => trace.decline(err),
        }
        result
    }

    fn dispatch<F>(
        &self,
        email: &InboundEmail,
        trace: &mut ExtractionTrace,
        extract: F,
    ) -> Result<OrderDraft>
    where
        F: FnOnce(&Extractor, &PreparedEmail<'_>, &mut ExtractionTrace) -> Result<OrderDraft>,
    {
        let prepared = PreparedEmail::new(email, self.config.max_body_chars);

        let platform = self
            .classifier
            .detect(&prepared)
            .ok_or(ExtractError::NoPlatformMatch)?;
        trace.platform = Some(platform);
        trace.record(Stage::Classify, platform.as_str());

        let extractor = self.get(platform).ok_or(ExtractError::NoPlatformMatch)?;
        if !extractor.can_handle(&prepared) {
            return Err(ExtractError::NotTransactional { platform });
        }
        trace.record(Stage::Gate, "accepted");

        extract(extractor, &prepared, trace)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

static DEFAULT_REGISTRY: LazyLock<ParserRegistry> = LazyLock::new(|| {
    ParserRegistry::new(EngineConfig::default()).expect("built-in rule tables compile")
});

/// Process-wide registry with the default configuration
#[must_use]
pub fn default_registry() -> &'static ParserRegistry {
    &DEFAULT_REGISTRY
}

/// Extract with the default registry
#[must_use]
pub fn extract(email: &InboundEmail) -> Option<OrderDraft> {
    DEFAULT_REGISTRY.extract(email)
}

/// Classify with the default registry
#[must_use]
pub fn detect_platform(email: &InboundEmail) -> Option<PlatformId> {
    DEFAULT_REGISTRY.detect_platform(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bigbasket_mail() -> InboundEmail {
        let received = Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap();
        InboundEmail::new(
            "noreply@bigbasket.com",
            "Your BigBasket order BB12345678 has been delivered",
            received,
        )
        .with_text("Bill Amount: Rs. 452.00")
    }

    #[test]
    fn test_panicking_extractor_is_contained() {
        let registry = default_registry();
        let mail = bigbasket_mail();
        let mut trace = ExtractionTrace::default();

        let result =
            registry.run_with(&mail, &mut trace, |_, _, _| panic!("rule table exploded"));

        match result {
            Err(ExtractError::InternalFault { platform, message }) => {
                assert_eq!(platform, PlatformId::BigBasket);
                assert_eq!(message, "rule table exploded");
            }
            other => panic!("expected an internal fault, got {other:?}"),
        }
        assert!(trace.is_declined());
        assert_eq!(trace.events_for(Stage::Outcome).count(), 1);
    }

    #[test]
    fn test_contained_fault_declines() {
        let registry = default_registry();
        let mut trace = ExtractionTrace::default();

        let draft = registry
            .run_with(&bigbasket_mail(), &mut trace, |_, _, _| {
                panic!("{}", String::from("formatted panic"))
            })
            .ok();

        assert!(draft.is_none());
        assert!(trace.declined.unwrap().contains("formatted panic"));
    }

    #[test]
    fn test_injected_extract_runs_after_gate() {
        let registry = default_registry();
        let mut trace = ExtractionTrace::default();

        let draft = registry
            .run_with(&bigbasket_mail(), &mut trace, Extractor::extract)
            .unwrap();

        assert_eq!(draft, registry.try_extract(&bigbasket_mail()).unwrap());
        assert_eq!(trace.events_for(Stage::Gate).count(), 1);
    }

    #[test]
    fn test_panic_message_payloads() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "unknown panic");
    }
}
