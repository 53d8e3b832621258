//! Loading Glyph Driver
//!
//! Cycles a handful of frames while, and only while, an external gate is
//! open. Each time the gate opens a fresh cycle starts at the first frame;
//! when it closes the cycle's schedule is dropped and observers see `None`.

use super::interval::IntervalTask;
use super::{Driver, DriverHandle, DriverTicker};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::trace;

/// Frames appended to the submit button while transmitting
pub const LOADING_GLYPHS: &[&str] = &[".  ", ".. ", "..."];

/// Looping frame policy; never terminal
#[derive(Debug, Clone)]
pub struct GlyphCycle {
    frames: &'static [&'static str],
    cursor: usize,
}

impl GlyphCycle {
    /// `None` for an empty frame list
    pub fn new(frames: &'static [&'static str]) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self { frames, cursor: 0 })
    }

    pub fn current(&self) -> &'static str {
        self.frames[self.cursor]
    }
}

impl Driver for GlyphCycle {
    type State = Option<&'static str>;

    fn snapshot(&self) -> Self::State {
        Some(self.current())
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.frames.len();
    }
}

/// Mount a glyph cycle gated on an external mode.
///
/// `is_open` decides from the gate's current value whether the cycle should
/// run. The supervisor exits when the gate's sender is dropped.
pub fn spawn_gated_glyph<S, F>(
    frames: &'static [&'static str],
    period: Duration,
    mut gate: watch::Receiver<S>,
    is_open: F,
) -> DriverHandle<Option<&'static str>>
where
    S: Send + Sync + 'static,
    F: Fn(&S) -> bool + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(None);
    let publish = Arc::new(tx);
    let ticks = Arc::new(AtomicU64::new(0));
    let session_ticks = ticks.clone();

    let supervisor = IntervalTask::supervise("loading_glyph", async move {
        loop {
            if gate.wait_for(|mode| is_open(mode)).await.is_err() {
                break;
            }
            let Some(cycle) = GlyphCycle::new(frames) else {
                break;
            };

            trace!("Loading glyph gate opened");
            let session = IntervalTask::start(
                "loading_glyph",
                period,
                DriverTicker {
                    driver: cycle,
                    publish: publish.clone(),
                    ticks: session_ticks.clone(),
                },
            );

            let closed = gate.wait_for(|mode| !is_open(mode)).await.is_ok();
            drop(session);
            publish.send_replace(None);
            trace!("Loading glyph gate closed");

            if !closed {
                break;
            }
        }
    });

    DriverHandle::new(rx, supervisor, ticks)
}
