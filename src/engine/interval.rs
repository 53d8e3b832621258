//! Interval Task
//!
//! The one scheduling primitive every driver is built on: sleep for a fixed
//! period, run a single tick, reschedule. A task ends when a tick reports
//! [`Tick::Stop`] or when its owner cancels it. Ticks of one task are strictly
//! sequential; the next sleep starts only after the previous tick's mutation
//! has returned.
//!
//! Tasks are spawned on the ambient tokio runtime, so `start` must be called
//! from within one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// What a tick asks the scheduler to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Schedule another tick after the period
    Continue,
    /// Terminal state reached; nothing further is scheduled
    Stop,
}

impl Tick {
    /// `Stop` when `terminal` holds, `Continue` otherwise
    pub fn stop_if(terminal: bool) -> Self {
        if terminal {
            Tick::Stop
        } else {
            Tick::Continue
        }
    }
}

/// Work driven by an [`IntervalTask`]
pub trait Ticker: Send + 'static {
    /// Called once when the task is armed, before the first sleep.
    fn on_start(&mut self) -> Tick {
        Tick::Continue
    }

    /// Called once per elapsed period.
    fn on_tick(&mut self) -> Tick;
}

impl<F> Ticker for F
where
    F: FnMut() -> Tick + Send + 'static,
{
    fn on_tick(&mut self) -> Tick {
        self()
    }
}

/// Handle to a self-rescheduling timer task.
///
/// Dropping the handle cancels the task, so a widget that owns its handles
/// cannot leave a schedule running after it is torn down.
pub struct IntervalTask {
    name: &'static str,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl IntervalTask {
    /// Start ticking immediately: the first tick fires one `period` from now.
    pub fn start<T: Ticker>(name: &'static str, period: Duration, ticker: T) -> Self {
        Self::start_after(name, period, std::future::ready(true), ticker)
    }

    /// Arm the task once `ready` resolves to `true`.
    ///
    /// Nothing is scheduled while `ready` is pending, and nothing ever runs if
    /// it resolves to `false`.
    pub fn start_after<R, T>(name: &'static str, period: Duration, ready: R, mut ticker: T) -> Self
    where
        R: Future<Output = bool> + Send + 'static,
        T: Ticker,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let stop = cancelled.clone();

        let handle = tokio::spawn(async move {
            if !ready.await {
                trace!(task = name, "Interval task never armed");
                return;
            }
            if stop.load(Ordering::Acquire) {
                return;
            }

            debug!(
                task = name,
                period_ms = period.as_millis() as u64,
                "Interval task armed"
            );
            if ticker.on_start() == Tick::Stop {
                debug!(task = name, "Interval task terminal at start");
                return;
            }

            loop {
                tokio::time::sleep(period).await;
                if stop.load(Ordering::Acquire) {
                    break;
                }
                if ticker.on_tick() == Tick::Stop {
                    debug!(task = name, "Interval task reached terminal state");
                    break;
                }
            }
        });

        Self {
            name,
            cancelled,
            handle: Some(handle),
        }
    }

    /// Run an arbitrary supervising future under the same cancel semantics.
    ///
    /// Used by gated drivers whose supervisor owns inner interval tasks;
    /// cancelling the supervisor drops them. The future never polls the
    /// cancel flag: `cancel` aborts it, and the flag only records that the
    /// owner asked, for [`IntervalTask::is_cancelled`].
    pub(crate) fn supervise<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(future);
        Self {
            name,
            cancelled,
            handle: Some(handle),
        }
    }

    /// A handle with nothing scheduled (driver already terminal at mount).
    pub fn idle(name: &'static str) -> Self {
        Self {
            name,
            cancelled: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Task name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Cancel any pending tick. Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!(task = self.name, "Interval task cancelled");
            }
            handle.abort();
        }
    }

    /// Whether a tick may still fire
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether the task was cancelled by its owner
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for IntervalTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalTask")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish()
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
