//! Cooperative round clock for Snarky Hangman.
//!
//! A [`RoundClock`] delivers one tick per period (1 s by default). It does
//! not own the round; the round actor awaits [`RoundClock::wait_for_tick`]
//! inside its `tokio::select!` loop and applies each tick to the round:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* guess, hint, snapshot */ }
//!         info = clock.wait_for_tick() => {
//!             if round.tick() != TickOutcome::Running { .. } { clock.stop(); }
//!         }
//!     }
//! }
//! ```
//!
//! A paused or stopped clock pends forever, so the other `select!` branches
//! keep running.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do when the clock wakes up late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum LatePolicy {
    /// Deliver one tick, report how many periods were missed, and schedule
    /// the next tick a full period from now.
    #[default]
    Skip,
    /// Deliver missed ticks back-to-back, at most `max_catchup` of them.
    /// Anything beyond the cap is reported as missed.
    CatchUp { max_catchup: u32 },
}

/// Clock settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Time between ticks. Default: 1 s. A zero period is raised to 1 ms.
    pub period: Duration,
    pub late_policy: LatePolicy,
    /// Random delay (0..max) added to the first tick so rounds started
    /// together don't all tick on the same instant. Drawn in whole
    /// milliseconds. Default: 5 ms.
    pub initial_jitter: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            late_policy: LatePolicy::default(),
            initial_jitter: Duration::from_millis(5),
        }
    }
}

impl ClockConfig {
    /// Shortest period the clock accepts.
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// A config with the given period and default everything else.
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values. Called by [`RoundClock::new`].
    pub fn validated(mut self) -> Self {
        if self.period < Self::MIN_PERIOD {
            warn!(period = ?self.period, "clock period too short, raising to 1 ms");
            self.period = Self::MIN_PERIOD;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tick info
// ---------------------------------------------------------------------------

/// Returned by [`RoundClock::wait_for_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInfo {
    /// Starts at 1 and increases by one per delivered tick.
    pub tick: u64,
    /// `true` if the clock woke up more than 10% of a period late.
    pub late: bool,
    /// Whole periods that elapsed without a tick being delivered for them.
    pub missed: u64,
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Per-round tick source.
#[derive(Debug)]
pub struct RoundClock {
    config: ClockConfig,
    next_tick: Instant,
    tick_count: u64,
    paused: bool,
    stopped: bool,
}

impl RoundClock {
    /// Creates a running clock; the first tick is due one period (plus
    /// jitter) from now.
    pub fn new(config: ClockConfig) -> Self {
        let config = config.validated();

        // Whole milliseconds: the timer wheel rounds anything finer up.
        let jitter = match config.initial_jitter.as_millis() as u64 {
            0 => Duration::ZERO,
            max => Duration::from_millis(rand::rng().random_range(0..max)),
        };

        debug!(
            period_ms = config.period.as_millis() as u64,
            policy = ?config.late_policy,
            "round clock created"
        );

        Self {
            next_tick: Instant::now() + config.period + jitter,
            config,
            tick_count: 0,
            paused: false,
            stopped: false,
        }
    }

    /// A 1 Hz clock with the default late policy.
    pub fn per_second() -> Self {
        Self::new(ClockConfig::default())
    }

    /// Waits for the next tick.
    ///
    /// Pends forever while the clock is paused or stopped.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        if self.paused || self.stopped {
            std::future::pending::<()>().await;
        }

        let due = self.next_tick;
        time::sleep_until(due).await;

        let now = Instant::now();
        let period = self.config.period;
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(due);
        let late = late_by > period / 10;
        let behind = (late_by.as_nanos() / period.as_nanos()) as u64;
        let mut missed = 0;

        self.next_tick = match self.config.late_policy {
            LatePolicy::Skip => {
                missed = behind;
                if missed > 0 {
                    warn!(
                        tick = self.tick_count,
                        missed,
                        late_ms = late_by.as_millis() as u64,
                        "round clock late, skipping ahead"
                    );
                }
                now + period
            }
            LatePolicy::CatchUp { max_catchup } => {
                if behind == 0 {
                    due + period
                } else if behind <= u64::from(max_catchup) {
                    warn!(tick = self.tick_count, behind, "round clock late, catching up");
                    due + period
                } else {
                    missed = behind - u64::from(max_catchup);
                    warn!(
                        tick = self.tick_count,
                        behind,
                        missed,
                        "round clock late beyond catch-up cap of {max_catchup}"
                    );
                    // The next `max_catchup` deadlines are already due.
                    let backlog = period.saturating_mul(max_catchup);
                    (now + period).checked_sub(backlog).unwrap_or(now)
                }
            }
        };

        trace!(tick = self.tick_count, late, "round clock ticked");

        TickInfo {
            tick: self.tick_count,
            late,
            missed,
        }
    }

    /// Stops delivering ticks until [`resume`](Self::resume). Idempotent.
    pub fn pause(&mut self) {
        if !self.paused && !self.stopped {
            self.paused = true;
            debug!(tick = self.tick_count, "round clock paused");
        }
    }

    /// Restarts a paused clock. The next tick is a full period from now, so
    /// time spent paused produces no burst. Idempotent; no effect once stopped.
    pub fn resume(&mut self) {
        if self.paused && !self.stopped {
            self.paused = false;
            self.next_tick = Instant::now() + self.config.period;
            debug!(tick = self.tick_count, "round clock resumed");
        }
    }

    /// Stops the clock for good.
    pub fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.paused = false;
            debug!(tick = self.tick_count, "round clock stopped");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Ticks delivered so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn period(&self) -> Duration {
        self.config.period
    }

    pub fn late_policy(&self) -> LatePolicy {
        self.config.late_policy
    }
}
