//! Ambient loops: the hero cursor blink and the header clock.
//!
//! Neither ever reaches a terminal state; both run until their owner
//! disposes them.

use super::{spawn_driver, Driver, DriverHandle};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Blinking block cursor
#[derive(Debug, Clone, Default)]
pub struct CursorBlink {
    visible: bool,
}

impl CursorBlink {
    /// Starts visible
    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn spawn(self, period: Duration) -> DriverHandle<bool> {
        spawn_driver("cursor_blink", period, self)
    }
}

impl Driver for CursorBlink {
    type State = bool;

    fn snapshot(&self) -> bool {
        self.visible
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn advance(&mut self) {
        self.visible = !self.visible;
    }
}

/// Wall clock rendered as `HH:MM:SS`
#[derive(Debug, Clone)]
pub struct Clock {
    source: fn() -> DateTime<Local>,
    now: String,
}

impl Clock {
    pub const FORMAT: &'static str = "%H:%M:%S";

    pub fn new() -> Self {
        Self::with_source(Local::now)
    }

    /// Clock reading from a custom time source
    pub fn with_source(source: fn() -> DateTime<Local>) -> Self {
        let now = source().format(Self::FORMAT).to_string();
        Self { source, now }
    }

    pub fn spawn(self, period: Duration) -> DriverHandle<String> {
        spawn_driver("clock", period, self)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for Clock {
    type State = String;

    fn snapshot(&self) -> String {
        self.now.clone()
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn advance(&mut self) {
        self.now = (self.source)().format(Self::FORMAT).to_string();
    }
}
