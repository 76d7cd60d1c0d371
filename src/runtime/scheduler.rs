//! Draw cadence scheduling.
//!
//! The session never sleeps itself. It asks a [`Scheduler`] to call a tick
//! function every interval and keeps the returned [`CancelHandle`] for as
//! long as the round is running.
//!
//! - `TokioScheduler`: real time, one tokio task per schedule
//! - `ManualScheduler`: ticks only when a test calls [`ManualScheduler::fire`]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Function invoked on every tick.
pub type TickFn = Box<dyn FnMut() + Send + 'static>;

/// Something that can invoke a tick function on a fixed cadence.
pub trait Scheduler: Send {
    /// Call `tick` every `interval`, first after one full interval.
    fn schedule(&mut self, tick: TickFn, interval: Duration) -> CancelHandle;
}

/// Stops a schedule when cancelled or dropped.
#[must_use = "dropping a CancelHandle cancels the schedule"]
pub struct CancelHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl CancelHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the schedule now.
    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Real-time scheduler backed by `tokio::time::interval`.
///
/// Must be used from inside a tokio runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, mut tick: TickFn, interval: Duration) -> CancelHandle {
        let task = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                tick();
            }
        });
        debug!(interval_ms = interval.as_millis() as u64, "draw cadence armed");
        CancelHandle::new(move || {
            task.abort();
            debug!("draw cadence cancelled");
        })
    }
}

#[derive(Default)]
struct ManualSlot {
    next_id: u64,
    active: Option<(u64, TickFn, Duration)>,
    scheduled: usize,
}

/// Scheduler driven by hand, for tests and step-by-step play.
///
/// Clones share the same slot, so a test can keep one clone and hand the
/// other to a session.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    slot: Arc<Mutex<ManualSlot>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the active tick function once. Returns `false` when nothing
    /// is scheduled.
    pub fn fire(&self) -> bool {
        let mut slot = self.lock();
        match slot.active.as_mut() {
            Some((_, tick, _)) => {
                tick();
                true
            }
            None => false,
        }
    }

    /// Whether a schedule is active.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.lock().active.is_some()
    }

    /// Interval of the active schedule.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.lock().active.as_ref().map(|(_, _, interval)| *interval)
    }

    /// How many schedules were ever created.
    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.lock().scheduled
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualSlot> {
        // A panicking tick function must not wedge the scheduler
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, tick: TickFn, interval: Duration) -> CancelHandle {
        let id = {
            let mut slot = self.lock();
            let id = slot.next_id;
            slot.next_id += 1;
            slot.scheduled += 1;
            slot.active = Some((id, tick, interval));
            id
        };

        let shared = Arc::clone(&self.slot);
        CancelHandle::new(move || {
            let mut slot = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if matches!(slot.active, Some((active, _, _)) if active == id) {
                slot.active = None;
            }
        })
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("armed", &self.is_armed())
            .finish()
    }
}
