//! Progressive Counter Driver
//!
//! Raises a set of meters from zero toward their individual targets, one unit
//! per tick. Meters are created only when the prerequisite reveal completes;
//! until then there is nothing to advance.

use super::typewriter::CompletionSignal;
use super::{spawn_driver_after, Driver, DriverHandle};
use std::time::Duration;
use tracing::debug;

/// Highest value a meter may target
pub const MAX_TARGET: u8 = 100;

/// Static description of one meter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterSpec {
    pub label: String,
    /// Opaque glyph shown next to the label
    pub icon: String,
    pub target: u8,
}

impl MeterSpec {
    /// Targets above [`MAX_TARGET`] are clamped.
    pub fn new(label: impl Into<String>, icon: impl Into<String>, target: u8) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            target: target.min(MAX_TARGET),
        }
    }
}

/// A meter in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meter {
    pub label: String,
    pub icon: String,
    pub target: u8,
    pub current: u8,
}

impl Meter {
    fn from_spec(spec: &MeterSpec) -> Self {
        Self {
            label: spec.label.clone(),
            icon: spec.icon.clone(),
            target: spec.target,
            current: 0,
        }
    }

    pub fn is_at_target(&self) -> bool {
        self.current >= self.target
    }

    /// Fill ratio of the full 0–100 scale
    pub fn ratio(&self) -> f64 {
        f64::from(self.current) / f64::from(MAX_TARGET)
    }
}

/// Counter policy.
///
/// `meters` stays `None` until [`Driver::start`] runs; `advance` before that
/// is a no-op.
#[derive(Debug, Clone)]
pub struct ProgressiveCounter {
    specs: Vec<MeterSpec>,
    meters: Option<Vec<Meter>>,
}

impl ProgressiveCounter {
    pub fn new(specs: Vec<MeterSpec>) -> Self {
        Self {
            specs,
            meters: None,
        }
    }

    /// Create every meter at zero. Only the first call has an effect.
    pub fn initialize(&mut self) {
        if self.meters.is_none() {
            self.meters = Some(self.specs.iter().map(Meter::from_spec).collect());
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.meters.is_some()
    }

    /// Mount the counter; it arms only once `ready` reports completion.
    pub fn spawn(self, period: Duration, ready: CompletionSignal) -> DriverHandle<Option<Vec<Meter>>> {
        spawn_driver_after("skill_counter", period, self, ready.wait())
    }
}

impl Driver for ProgressiveCounter {
    type State = Option<Vec<Meter>>;

    fn snapshot(&self) -> Self::State {
        self.meters.clone()
    }

    fn is_terminal(&self) -> bool {
        self.meters
            .as_ref()
            .is_some_and(|meters| meters.iter().all(Meter::is_at_target))
    }

    fn advance(&mut self) {
        let Some(meters) = self.meters.as_mut() else {
            return;
        };
        for meter in meters.iter_mut().filter(|m| !m.is_at_target()) {
            meter.current += 1;
        }
    }

    fn start(&mut self) {
        self.initialize();
        debug!(meters = self.specs.len(), "Skill counters initialized");
    }
}
