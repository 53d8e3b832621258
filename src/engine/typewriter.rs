//! Typewriter Driver
//!
//! Reveals a fixed string one character per tick. Completion is published
//! once through the driver's snapshot; dependents wait on a
//! [`CompletionSignal`] instead of polling shared flags.

use super::{spawn_driver, Driver, DriverHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Progress of a reveal.
///
/// `revealed` counts characters, not bytes, so multi-byte text is never split
/// inside a code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    source: Arc<str>,
    revealed: usize,
    total: usize,
}

impl RevealState {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let total = source.chars().count();
        Self {
            source,
            revealed: 0,
            total,
        }
    }

    /// The full text being revealed
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of characters currently visible
    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// Character count of the full text
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.total
    }

    /// The visible prefix
    pub fn visible(&self) -> &str {
        match self.source.char_indices().nth(self.revealed) {
            Some((end, _)) => &self.source[..end],
            None => &self.source,
        }
    }

    /// Reveal one more character. Returns `false` once complete.
    fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.revealed += 1;
        true
    }
}

/// Typewriter policy: one character per tick until the full text is visible.
#[derive(Debug, Clone)]
pub struct Typewriter {
    name: &'static str,
    state: RevealState,
}

impl Typewriter {
    pub fn new(name: &'static str, source: impl Into<Arc<str>>) -> Self {
        Self {
            name,
            state: RevealState::new(source),
        }
    }

    /// Mount the typewriter on its own schedule.
    pub fn spawn(self, period: Duration) -> DriverHandle<RevealState> {
        let name = self.name;
        spawn_driver(name, period, self)
    }
}

impl Driver for Typewriter {
    type State = RevealState;

    fn snapshot(&self) -> RevealState {
        self.state.clone()
    }

    fn is_terminal(&self) -> bool {
        self.state.is_complete()
    }

    fn advance(&mut self) {
        if self.state.step() && self.state.is_complete() {
            debug!(
                driver = self.name,
                chars = self.state.total_len(),
                "Typewriter complete"
            );
        }
    }
}

/// One-shot notification that a reveal has completed.
#[derive(Debug, Clone)]
pub struct CompletionSignal {
    rx: watch::Receiver<RevealState>,
}

impl CompletionSignal {
    pub fn new(rx: watch::Receiver<RevealState>) -> Self {
        Self { rx }
    }

    /// Whether the reveal has already completed
    pub fn is_complete(&self) -> bool {
        self.rx.borrow().is_complete()
    }

    /// Resolve to `true` once the reveal completes, or `false` if the
    /// typewriter was torn down first.
    pub async fn wait(mut self) -> bool {
        self.rx.wait_for(RevealState::is_complete).await.is_ok()
    }
}

impl DriverHandle<RevealState> {
    /// Completion signal for dependent drivers
    pub fn completion(&self) -> CompletionSignal {
        CompletionSignal::new(self.subscribe())
    }
}
