//! Human-readable transition log.
//!
//! Every step produces an ordered list of [`NarrativeEntry`] values: the
//! operator headline, its effects, any scheduler events, and the outcome.
//! Entries are stored on the snapshot that the step produced and forwarded
//! to the session's [`NarrativeSink`].

use serde::{Deserialize, Serialize};

use super::role::RoleId;

/// What produced a narrative entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Operator headline.
    Action,
    /// Effect of a delta or note.
    Effect,
    /// Effect from a stochastic branch.
    Chance {
        /// Whether the branch's `hit` side was taken.
        hit: bool,
    },
    /// The operator's costs could not be paid.
    Shortfall,
    /// Scheduler event (skip, bonus, periodic effect).
    Schedule,
    /// Season change.
    Season,
    /// Game over.
    Outcome,
}

/// A single line of the transition log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeEntry {
    /// Step that produced the entry.
    pub step: u32,

    /// Role the entry concerns, if any.
    pub role: Option<RoleId>,

    /// Entry category.
    pub kind: EntryKind,

    /// Display text.
    pub text: String,
}

impl NarrativeEntry {
    /// Create a new entry.
    pub fn new(step: u32, role: Option<RoleId>, kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            step,
            role,
            kind,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for NarrativeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outbound receiver of narrative entries (a view layer, a log, a test).
pub trait NarrativeSink {
    /// Receive one entry.
    fn record(&mut self, entry: &NarrativeEntry);
}

impl NarrativeSink for Vec<NarrativeEntry> {
    fn record(&mut self, entry: &NarrativeEntry) {
        self.push(entry.clone());
    }
}

/// Discards every entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NarrativeSink for NullSink {
    fn record(&mut self, _entry: &NarrativeEntry) {}
}

/// Forwards entries to `tracing` at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NarrativeSink for TracingSink {
    fn record(&mut self, entry: &NarrativeEntry) {
        tracing::info!(
            target: "stakeholder_sim::narrative",
            step = entry.step,
            role = entry.role.map(|r| r.0),
            kind = ?entry.kind,
            "{}",
            entry.text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<NarrativeEntry> = Vec::new();
        sink.record(&NarrativeEntry::new(1, Some(RoleId::new(0)), EntryKind::Action, "Acted."));
        sink.record(&NarrativeEntry::new(1, None, EntryKind::Schedule, "Skipped."));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].to_string(), "Acted.");
        assert_eq!(sink[1].kind, EntryKind::Schedule);
    }

    #[test]
    fn test_null_and_tracing_sinks_accept() {
        let entry = NarrativeEntry::new(3, None, EntryKind::Chance { hit: true }, "Lucky.");
        NullSink.record(&entry);
        TracingSink.record(&entry);
    }
}
