//! Timed Animation Engine
//!
//! Every animated widget in termfolio is a small state machine advanced by a
//! timer. The machines differ only in policy:
//! - [`typewriter`]: reveal a string one character per tick, then signal completion
//! - [`counter`]: raise several meters toward their targets once a prerequisite completes
//! - [`stages`]: walk an ordered list of labels once and freeze on the last one
//! - [`glyph`]: cycle a few frames only while an external gate stays open
//! - [`pulse`]: ambient loops (cursor blink, header clock) that never terminate
//!
//! The scheduling itself lives in [`interval::IntervalTask`]. A policy
//! implements [`Driver`]; [`spawn_driver`] pairs it with a task and publishes
//! a snapshot after every mutation through a `watch` channel, which is the only
//! way observers (the TUI, dependent drivers) see driver state.

pub mod counter;
pub mod glyph;
pub mod interval;
pub mod pulse;
pub mod stages;
pub mod typewriter;

pub use counter::{Meter, MeterSpec, ProgressiveCounter};
pub use glyph::{spawn_gated_glyph, GlyphCycle};
pub use interval::{IntervalTask, Tick, Ticker};
pub use pulse::{Clock, CursorBlink};
pub use stages::{StageSequence, StageSnapshot};
pub use typewriter::{CompletionSignal, RevealState, Typewriter};

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// A timed state machine policy.
///
/// The scheduler calls [`Driver::start`] once when the driver is armed, then
/// [`Driver::advance`] once per tick until [`Driver::is_terminal`] holds.
pub trait Driver: Send + 'static {
    /// Snapshot type published to observers
    type State: Clone + PartialEq + Send + Sync + 'static;

    /// Current state as observers should see it
    fn snapshot(&self) -> Self::State;

    /// Stop predicate: no tick is scheduled once this returns `true`
    fn is_terminal(&self) -> bool;

    /// Mutation for a single tick
    fn advance(&mut self);

    /// One-time initialization when the driver is armed
    fn start(&mut self) {}
}

/// Adapts a [`Driver`] to the [`Ticker`] interface and publishes snapshots.
struct DriverTicker<D: Driver> {
    driver: D,
    publish: Arc<watch::Sender<D::State>>,
    ticks: Arc<AtomicU64>,
}

impl<D: Driver> Ticker for DriverTicker<D> {
    fn on_start(&mut self) -> Tick {
        self.driver.start();
        // The mount snapshot is already in the channel; notify only if
        // arming changed it.
        let armed = self.driver.snapshot();
        self.publish.send_if_modified(|current| {
            if *current == armed {
                false
            } else {
                *current = armed;
                true
            }
        });
        Tick::stop_if(self.driver.is_terminal())
    }

    fn on_tick(&mut self) -> Tick {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        self.driver.advance();
        self.publish.send_replace(self.driver.snapshot());
        Tick::stop_if(self.driver.is_terminal())
    }
}

/// Owner's side of a running driver.
///
/// Holds the schedule and a receiver of the driver's snapshots. Dropping the
/// handle, or calling [`DriverHandle::dispose`], cancels anything pending.
#[derive(Debug)]
pub struct DriverHandle<S> {
    state: watch::Receiver<S>,
    task: IntervalTask,
    ticks: Arc<AtomicU64>,
}

impl<S: Clone> DriverHandle<S> {
    pub(crate) fn new(state: watch::Receiver<S>, task: IntervalTask, ticks: Arc<AtomicU64>) -> Self {
        Self { state, task, ticks }
    }

    /// Latest published snapshot
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// A receiver for observers that want change notifications
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    /// Number of ticks that have mutated the driver so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Whether a tick may still fire
    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    /// Cancel the pending schedule; the last snapshot stays readable.
    pub fn dispose(&mut self) {
        self.task.cancel();
    }

    /// Whether [`DriverHandle::dispose`] has been called
    pub fn is_disposed(&self) -> bool {
        self.task.is_cancelled()
    }
}

/// Mount a driver: publish its initial snapshot and start ticking.
///
/// A driver that is already terminal at mount schedules nothing.
pub fn spawn_driver<D: Driver>(name: &'static str, period: Duration, driver: D) -> DriverHandle<D::State> {
    spawn_driver_after(name, period, driver, std::future::ready(true))
}

/// Mount a driver whose schedule is armed only once `ready` resolves to `true`.
///
/// Until then observers see the initial snapshot and no tick fires.
pub fn spawn_driver_after<D, R>(
    name: &'static str,
    period: Duration,
    driver: D,
    ready: R,
) -> DriverHandle<D::State>
where
    D: Driver,
    R: Future<Output = bool> + Send + 'static,
{
    let (tx, rx) = watch::channel(driver.snapshot());
    let ticks = Arc::new(AtomicU64::new(0));

    let task = if driver.is_terminal() {
        IntervalTask::idle(name)
    } else {
        let ticker = DriverTicker {
            driver,
            publish: Arc::new(tx),
            ticks: ticks.clone(),
        };
        IntervalTask::start_after(name, period, ready, ticker)
    };

    DriverHandle::new(rx, task, ticks)
}

/// Default animation cadences
pub mod timing {
    use std::time::Duration;

    /// Hero name reveal, per character
    pub const HERO_TYPEWRITER: Duration = Duration::from_millis(150);

    /// About bio reveal, per character
    pub const BIO_TYPEWRITER: Duration = Duration::from_millis(10);

    /// Skill meter step
    pub const SKILL_COUNTER: Duration = Duration::from_millis(15);

    /// Connection status stage
    pub const CONNECTION_STATUS: Duration = Duration::from_millis(500);

    /// Submit button loading glyph
    pub const LOADING_GLYPH: Duration = Duration::from_millis(300);

    /// Hero cursor blink
    pub const CURSOR_BLINK: Duration = Duration::from_millis(500);

    /// Header clock refresh
    pub const CLOCK: Duration = Duration::from_millis(1000);

    /// Scale a cadence by a speed multiplier (2.0 = twice as fast).
    ///
    /// Non-positive or non-finite multipliers leave the cadence unchanged, and
    /// the result never drops below one millisecond.
    pub fn scaled(base: Duration, speed: f64) -> Duration {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            1.0
        };
        base.div_f64(speed).max(Duration::from_millis(1))
    }
}
