//! Structured trace of one extraction call

use crate::error::ExtractError;
use crate::types::PlatformId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pipeline stage an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Classify,
    Gate,
    OrderId,
    Amount,
    Items,
    Date,
    Status,
    Metadata,
    Confidence,
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub stage: Stage,
    pub detail: String,
}

/// What happened during one call, returned next to the result instead of
/// being written to a logger. Events are mirrored as `tracing` debug events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionTrace {
    pub platform: Option<PlatformId>,
    pub events: Vec<TraceEvent>,

    /// Reason the call produced no draft
    pub declined: Option<String>,
}

impl ExtractionTrace {
    pub fn record(&mut self, stage: Stage, detail: impl Into<String>) {
        let detail = detail.into();
        debug!("{:?}: {}", stage, detail);
        self.events.push(TraceEvent { stage, detail });
    }

    pub fn decline(&mut self, reason: &ExtractError) {
        let message = reason.to_string();
        self.record(Stage::Outcome, format!("declined: {message}"));
        self.declined = Some(message);
    }

    pub fn events_for(&self, stage: Stage) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |e| e.stage == stage)
    }

    #[must_use]
    pub const fn is_declined(&self) -> bool {
        self.declined.is_some()
    }
}
