//! Integration tests for the round clock.
//!
//! Every async test runs with Tokio's clock paused, so sleeps resolve as
//! soon as the runtime is idle and `advance` can fake a late wake-up.

use std::time::Duration;

use hangman_tick::{ClockConfig, LatePolicy, RoundClock, TickInfo};
use tokio::time::{self, Instant};

// =========================================================================
// Helpers
// =========================================================================

fn no_jitter(late_policy: LatePolicy) -> ClockConfig {
    ClockConfig {
        late_policy,
        initial_jitter: Duration::ZERO,
        ..ClockConfig::default()
    }
}

fn clock() -> RoundClock {
    RoundClock::new(no_jitter(LatePolicy::Skip))
}

// =========================================================================
// ClockConfig
// =========================================================================

#[test]
fn test_default_config_ticks_every_second() {
    let cfg = ClockConfig::default();
    assert_eq!(cfg.period, Duration::from_secs(1));
    assert_eq!(cfg.late_policy, LatePolicy::Skip);
}

#[test]
fn test_validated_raises_zero_period() {
    let cfg = ClockConfig::with_period(Duration::ZERO).validated();
    assert_eq!(cfg.period, ClockConfig::MIN_PERIOD);
}

#[tokio::test]
async fn test_new_clock_initial_state() {
    let c = clock();
    assert_eq!(c.tick_count(), 0);
    assert_eq!(c.period(), Duration::from_secs(1));
    assert!(!c.is_paused());
    assert!(!c.is_stopped());
}

// =========================================================================
// Tick delivery
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_wait_for_tick_fires_after_one_period() {
    let start = Instant::now();
    let mut c = clock();

    let info = c.wait_for_tick().await;

    assert_eq!(
        info,
        TickInfo {
            tick: 1,
            late: false,
            missed: 0
        }
    );
    assert_eq!(Instant::now() - start, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_ticks_are_numbered_monotonically() {
    let start = Instant::now();
    let mut c = clock();

    for expected in 1..=5 {
        assert_eq!(c.wait_for_tick().await.tick, expected);
    }
    assert_eq!(c.tick_count(), 5);
    assert_eq!(Instant::now() - start, Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_jitter_is_bounded() {
    for _ in 0..50 {
        let start = Instant::now();
        let mut c = RoundClock::per_second();

        c.wait_for_tick().await;

        let elapsed = Instant::now() - start;
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1_005), "elapsed {elapsed:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_jitter_below_one_millisecond_is_dropped() {
    let start = Instant::now();
    let mut c = RoundClock::new(ClockConfig {
        initial_jitter: Duration::from_micros(900),
        ..ClockConfig::default()
    });

    c.wait_for_tick().await;

    assert_eq!(Instant::now() - start, Duration::from_secs(1));
}

// =========================================================================
// Pause / resume / stop
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_prevents_ticks() {
    let mut c = clock();
    c.wait_for_tick().await;

    c.pause();
    assert!(c.is_paused());

    let result = time::timeout(Duration::from_secs(10), c.wait_for_tick()).await;
    assert!(result.is_err(), "paused clock should pend");
    assert_eq!(c.tick_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_resume_rebases_deadline_without_burst() {
    let mut c = clock();
    c.wait_for_tick().await;
    c.pause();
    time::advance(Duration::from_secs(30)).await;

    c.resume();
    let resumed_at = Instant::now();
    let info = c.wait_for_tick().await;

    assert_eq!(info.tick, 2);
    assert_eq!(info.missed, 0);
    assert!(!info.late);
    assert_eq!(Instant::now() - resumed_at, Duration::from_secs(1));
}

#[tokio::test]
async fn test_pause_resume_idempotent() {
    let mut c = clock();

    c.pause();
    c.pause();
    assert!(c.is_paused());

    c.resume();
    c.resume();
    assert!(!c.is_paused());
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_permanent() {
    let mut c = clock();
    c.wait_for_tick().await;

    c.stop();
    c.resume();
    assert!(c.is_stopped());
    assert!(!c.is_paused());

    let result = time::timeout(Duration::from_secs(10), c.wait_for_tick()).await;
    assert!(result.is_err(), "stopped clock should pend");
}

#[tokio::test(start_paused = true)]
async fn test_pause_after_stop_is_ignored() {
    let mut c = clock();
    c.stop();
    c.pause();
    assert!(!c.is_paused());
    assert!(c.is_stopped());
}

// =========================================================================
// Late wake-ups
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_skip_reports_missed_periods() {
    let mut c = clock();
    time::advance(Duration::from_millis(3_500)).await;

    let info = c.wait_for_tick().await;
    assert!(info.late);
    assert_eq!(info.missed, 2);

    let before = Instant::now();
    let next = c.wait_for_tick().await;
    assert_eq!(next.missed, 0);
    assert_eq!(Instant::now() - before, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_catch_up_delivers_missed_ticks_back_to_back() {
    let mut c = RoundClock::new(no_jitter(LatePolicy::CatchUp { max_catchup: 5 }));
    time::advance(Duration::from_millis(3_500)).await;
    let woke = Instant::now();

    let mut infos = Vec::new();
    for _ in 0..3 {
        infos.push(c.wait_for_tick().await);
    }

    assert_eq!(Instant::now(), woke, "catch-up ticks should not sleep");
    assert!(infos.iter().all(|i| i.missed == 0));
    assert_eq!(infos.last().map(|i| i.tick), Some(3));

    // Back on the original cadence: next deadline is start + 4 s.
    c.wait_for_tick().await;
    assert_eq!(Instant::now() - woke, Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_catch_up_beyond_cap_reports_missed() {
    let mut c = RoundClock::new(no_jitter(LatePolicy::CatchUp { max_catchup: 1 }));
    time::advance(Duration::from_millis(5_500)).await;
    let woke = Instant::now();

    let first = c.wait_for_tick().await;
    assert_eq!(first.missed, 3);

    let replayed = c.wait_for_tick().await;
    assert_eq!(replayed.tick, 2);
    assert_eq!(Instant::now(), woke);

    c.wait_for_tick().await;
    assert_eq!(Instant::now() - woke, Duration::from_secs(1));
}
