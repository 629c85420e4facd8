//! Periodic tick source driving hold progress.
//!
//! The clock is an explicit handle: it is started when a hold begins and
//! stopped when the hold ends, and an idle clock does no background work.
//! Every start from the stopped state opens a new *generation*; ticks carry
//! the generation that produced them so a tick queued before `stop()` is
//! rejected instead of leaking into a later hold.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::trace;

/// Reference tick granularity.
pub const DEFAULT_GRANULARITY: Duration = Duration::from_millis(10);

/// One tick emitted by a running clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// Generation of the clock run that produced this tick.
    pub generation: u64,
}

/// Where ticks come from once the clock is running.
#[derive(Debug, Clone)]
pub enum TickDriver {
    /// No background work; ticks are issued with [`ProgressClock::tick`].
    Manual,
    /// A background thread sends a tick down the channel every period.
    Thread(Sender<ClockTick>),
}

/// Background state of a running clock.
#[derive(Debug)]
enum Runner {
    Manual,
    Thread {
        running: Arc<AtomicBool>,
        handle: Option<JoinHandle<()>>,
    },
}

/// Cancellable periodic clock with a fixed granularity.
#[derive(Debug)]
pub struct ProgressClock {
    granularity: Duration,
    driver: TickDriver,
    generation: u64,
    runner: Option<Runner>,
}

impl ProgressClock {
    /// Create a stopped clock.
    pub fn new(granularity: Duration, driver: TickDriver) -> Self {
        Self {
            granularity,
            driver,
            generation: 0,
            runner: None,
        }
    }

    /// A stopped clock whose ticks are issued by the caller.
    pub fn manual(granularity: Duration) -> Self {
        Self::new(granularity, TickDriver::Manual)
    }

    /// A stopped clock that ticks on a background thread into `tx`.
    pub fn threaded(granularity: Duration, tx: Sender<ClockTick>) -> Self {
        Self::new(granularity, TickDriver::Thread(tx))
    }

    /// Fixed tick interval, also the elapsed increment per tick.
    #[must_use]
    pub fn granularity(&self) -> Duration {
        self.granularity
    }

    /// Generation of the current (or most recent) run.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether ticks are being delivered.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.runner.is_some()
    }

    /// Start delivering ticks.
    ///
    /// Starting a running clock keeps the existing tick source and its
    /// phase. Returns whether a new run was started.
    pub fn start(&mut self) -> bool {
        if self.runner.is_some() {
            return false;
        }

        self.generation = self.generation.wrapping_add(1);
        let tick = ClockTick {
            generation: self.generation,
        };
        self.runner = Some(match &self.driver {
            TickDriver::Manual => Runner::Manual,
            TickDriver::Thread(tx) => spawn_ticker(self.granularity, tx.clone(), tick),
        });
        trace!(generation = self.generation, "progress clock started");
        true
    }

    /// Halt tick delivery. Returns whether the clock was running.
    pub fn stop(&mut self) -> bool {
        let Some(runner) = self.runner.take() else {
            return false;
        };
        if let Runner::Thread {
            running,
            mut handle,
        } = runner
        {
            running.store(false, Ordering::Relaxed);
            if let Some(handle) = handle.take() {
                let _ = handle.join();
            }
        }
        trace!(generation = self.generation, "progress clock stopped");
        true
    }

    /// Issue a tick by hand; `None` while stopped.
    pub fn tick(&self) -> Option<ClockTick> {
        self.runner.as_ref().map(|_| ClockTick {
            generation: self.generation,
        })
    }

    /// Whether `tick` belongs to the live run of this clock.
    #[must_use]
    pub fn accepts(&self, tick: ClockTick) -> bool {
        self.is_running() && tick.generation == self.generation
    }
}

impl Drop for ProgressClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_ticker(period: Duration, tx: Sender<ClockTick>, tick: ClockTick) -> Runner {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    let handle = thread::spawn(move || {
        while running_clone.load(Ordering::Relaxed) {
            thread::sleep(period);
            if !running_clone.load(Ordering::Relaxed) {
                break;
            }
            // Receiver gone: the host shut down.
            if tx.send(tick).is_err() {
                break;
            }
        }
    });

    Runner::Thread {
        running,
        handle: Some(handle),
    }
}
