//! # Snarky Hangman
//!
//! Timed, scored hangman rounds with hints, daily play limits, and
//! shareable challenges.
//!
//! The round rules live in `hangman-round` as plain data. This crate runs
//! each round in its own Tokio task, feeds it a 1 Hz clock, and wires in
//! the collaborators a host provides: a [`WordSupply`], a [`StatsSink`]
//! and a [`ChallengeStore`]. In-memory versions of all three are included.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hangman::prelude::*;
//!
//! # async fn run() -> Result<(), HangmanError> {
//! let service = GameService::in_memory(GameConfig::default());
//! let mut round = service.start_round(Identity::guest("guest-1"), Difficulty::Easy).await?;
//!
//! round.handle.guess('e').await?;
//! while let Some(event) = round.events.recv().await {
//!     if event.is_finished() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod challenge;
mod config;
mod error;
mod round;
mod service;
mod stats;
mod supply;
mod words;

use std::time::{SystemTime, UNIX_EPOCH};

pub use challenge::{
    ChallengeError, ChallengeExport, ChallengeStore, DEFAULT_CHALLENGE_TTL,
    InMemoryChallengeStore,
};
pub use config::GameConfig;
pub use error::HangmanError;
pub use round::{RoundEvents, RoundHandle, RoundId, StartedRound, TIME_LOW_THRESHOLDS};
pub use service::{GameService, GameServiceBuilder};
pub use stats::{InMemoryStatsSink, PlayerStats, RoundOutcome, StatsError, StatsSink};
pub use supply::{InMemoryWordSupply, SupplyError, WordSupply};

/// Current time in unix seconds. A clock set before 1970 reads as 0.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Everything a host usually needs, in one import.
pub mod prelude {
    pub use hangman_protocol::{
        Category, ChallengeId, DeclineReason, Difficulty, HintPayload, HintType, Identity,
        PlayerId, RoundEvent, RoundStatus, Word,
    };
    pub use hangman_round::{GuessOutcome, HintOutcome, IgnoreReason, RoundSnapshot};
    pub use hangman_session::{GuestProvider, IdentityProvider, PlayAllowance, SessionError};

    pub use crate::{
        ChallengeExport, GameConfig, GameService, HangmanError, RoundHandle, StartedRound,
    };
}
