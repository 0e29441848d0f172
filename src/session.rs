//! Play sessions: the explicit context passed to every operator application.
//!
//! A [`Session`] carries the random source and the narrative sink, so the
//! engine itself holds no global state. A [`Timeline`] owns the path of
//! snapshots a session has produced.

use crate::core::{
    EngineError, GameRng, GameRngState, NarrativeEntry, NarrativeSink, NullSink, OperatorId,
    RandomSource, State,
};
use crate::rules::Ruleset;

/// Context for applying operators.
pub struct Session {
    rng: Box<dyn RandomSource>,
    sink: Box<dyn NarrativeSink>,
}

impl Session {
    /// Create a session from a random source and a sink.
    pub fn new(rng: impl RandomSource + 'static, sink: impl NarrativeSink + 'static) -> Self {
        Self {
            rng: Box::new(rng),
            sink: Box::new(sink),
        }
    }

    /// A session with a seeded [`GameRng`] that discards narration.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed), NullSink)
    }

    /// Replace the narrative sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl NarrativeSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// The random source.
    pub fn rng_mut(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Capture the random source's position, if it supports it.
    #[must_use]
    pub fn rng_state(&self) -> Option<GameRngState> {
        self.rng.snapshot()
    }

    /// Forward an entry to the sink.
    pub fn record(&mut self, entry: &NarrativeEntry) {
        self.sink.record(entry);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("rng", &self.rng.snapshot())
            .finish_non_exhaustive()
    }
}

/// The singly-linked path of snapshots from the initial state.
#[derive(Clone, Debug)]
pub struct Timeline {
    states: Vec<State>,
}

impl Timeline {
    /// Start a timeline at `initial`.
    #[must_use]
    pub fn new(initial: State) -> Self {
        Self {
            states: vec![initial],
        }
    }

    /// The latest snapshot.
    #[must_use]
    pub fn current(&self) -> &State {
        // A timeline always holds its initial state.
        &self.states[self.states.len() - 1]
    }

    /// Apply an operator to the latest snapshot and append the result.
    pub fn advance<R: Ruleset + ?Sized>(
        &mut self,
        ruleset: &R,
        session: &mut Session,
        operator: OperatorId,
    ) -> Result<&State, EngineError> {
        let next = ruleset.apply(session, self.current(), operator)?;
        self.states.push(next);
        Ok(self.current())
    }

    /// Number of snapshots (initial state included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Timelines always hold at least the initial state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }
}
