//! Staged Status Driver
//!
//! Walks an ordered list of labels once: the first label is visible at
//! mount, each tick moves one stage forward, and the last stage is final.

use super::{spawn_driver, Driver, DriverHandle};
use std::time::Duration;

/// Stages of the contact panel's connection indicator
pub const CONNECTION_STAGES: &[&str] = &[
    "CONNECTING",
    "CONNECTING.",
    "CONNECTING..",
    "CONNECTING...",
    "ONLINE",
];

/// Observable position in a stage sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSnapshot {
    pub index: usize,
    pub label: &'static str,
    pub is_final: bool,
}

/// One-shot stage policy over a non-empty label list
#[derive(Debug, Clone)]
pub struct StageSequence {
    labels: &'static [&'static str],
    index: usize,
}

impl StageSequence {
    /// `None` for an empty list: there would be no stage to show.
    pub fn new(labels: &'static [&'static str]) -> Option<Self> {
        if labels.is_empty() {
            return None;
        }
        Some(Self { labels, index: 0 })
    }

    /// The connection indicator sequence
    pub fn connection() -> Self {
        Self {
            labels: CONNECTION_STAGES,
            index: 0,
        }
    }

    pub fn current(&self) -> &'static str {
        self.labels[self.index]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn spawn(self, period: Duration) -> DriverHandle<StageSnapshot> {
        spawn_driver("stage_sequence", period, self)
    }
}

impl Driver for StageSequence {
    type State = StageSnapshot;

    fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            index: self.index,
            label: self.current(),
            is_final: self.is_terminal(),
        }
    }

    fn is_terminal(&self) -> bool {
        self.index + 1 >= self.labels.len()
    }

    fn advance(&mut self) {
        if !self.is_terminal() {
            self.index += 1;
        }
    }
}
