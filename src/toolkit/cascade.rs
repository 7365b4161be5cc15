//! Generic pattern-cascade evaluator

use regex::{Captures, Regex};
use std::cmp::Ordering;

/// Matches considered per rule; keeps a pathological body from fanning out
const MAX_MATCHES_PER_RULE: usize = 32;

/// One extraction rule as written in a platform table.
///
/// The value is read from the named group `v` when present, else from the
/// first capture group, else from the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    pub label: &'static str,
    pub pattern: &'static str,
    pub priority: u8,
}

impl RuleSpec {
    #[must_use]
    pub const fn new(label: &'static str, pattern: &'static str, priority: u8) -> Self {
        Self {
            label,
            pattern,
            priority,
        }
    }
}

/// A compiled [`RuleSpec`]
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub label: &'static str,
    pub priority: u8,
    regex: Regex,
}

impl FieldRule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, regex::Error> {
        Ok(Self {
            label: spec.label,
            priority: spec.priority,
            regex: Regex::new(spec.pattern)?,
        })
    }

    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Bounded iterator over the capture sets of this rule in `text`
    pub fn captures<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = Captures<'t>> + 'r
    where
        't: 'r,
    {
        self.regex.captures_iter(text).take(MAX_MATCHES_PER_RULE)
    }

    /// Bounded iterator over `(position, value)` pairs
    pub fn values<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = (usize, &'t str)> + 'r
    where
        't: 'r,
    {
        self.captures(text).filter_map(|caps| {
            let m = caps
                .name("v")
                .or_else(|| caps.get(1))
                .or_else(|| caps.get(0))?;
            Some((m.start(), m.as_str()))
        })
    }
}

/// A validator-passing match
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    pub value: T,
    pub priority: u8,
    pub position: usize,
    pub rule: &'static str,
}

/// Ordered rule list for one field
#[derive(Debug, Clone)]
pub struct Cascade {
    field: &'static str,
    rules: Vec<FieldRule>,
}

impl Cascade {
    /// Compile `specs` in order; rules are then kept sorted by descending priority
    pub fn compile<'s>(
        field: &'static str,
        specs: impl IntoIterator<Item = &'s RuleSpec>,
    ) -> Result<Self, regex::Error> {
        let mut rules = specs
            .into_iter()
            .map(FieldRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        // stable: equal priorities keep table order
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(Self { field, rules })
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every candidate that passes `accept`, across all rules
    pub fn candidates<T>(
        &self,
        text: &str,
        mut accept: impl FnMut(&str) -> Option<T>,
    ) -> Vec<Candidate<T>> {
        let mut out = Vec::new();
        for rule in &self.rules {
            for (position, raw) in rule.values(text) {
                if let Some(value) = accept(raw) {
                    out.push(Candidate {
                        value,
                        priority: rule.priority,
                        position,
                        rule: rule.label,
                    });
                }
            }
        }
        out
    }

    /// Highest priority, then earliest position
    pub fn first<T>(&self, text: &str, accept: impl FnMut(&str) -> Option<T>) -> Option<Candidate<T>> {
        select_by_priority(self.candidates(text, accept))
    }
}

/// Pick the highest-priority candidate; ties go to the earliest match
#[must_use]
pub fn select_by_priority<T>(candidates: Vec<Candidate<T>>) -> Option<Candidate<T>> {
    candidates.into_iter().min_by(compare_priority)
}

/// Priority+magnitude voting: highest priority, then the largest value,
/// then the earliest match. Used for amounts, where a labelled total must
/// beat bare currency figures wherever they appear.
#[must_use]
pub fn select_by_priority_magnitude(candidates: Vec<Candidate<f64>>) -> Option<Candidate<f64>> {
    candidates.into_iter().min_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.value.total_cmp(&a.value))
            .then_with(|| a.position.cmp(&b.position))
    })
}

fn compare_priority<T>(a: &Candidate<T>, b: &Candidate<T>) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| a.position.cmp(&b.position))
}
