//! The round engine for Snarky Hangman.
//!
//! A [`Round`] owns everything about one play-through of one word: the
//! guessed letters, the remaining wrong-guess budget, the clock, the hint
//! budget, and the derived status. It is plain data. No I/O, no timers,
//! no threads. Callers drive it with three operations:
//!
//! - [`Round::submit_guess`]: a letter from the player
//! - [`Round::consume_hint`]: a hint request from the player
//! - [`Round::tick`]: one second elapsed (from an external clock)
//!
//! Each returns an outcome value the host renders from. Redundant input
//! (a repeated letter, anything after the round ended) comes back as an
//! `Ignored` outcome, never as an error.
//!
//! # Key types
//!
//! - [`DifficultyProfile`]: per-difficulty guess, time, hint and point budgets
//! - [`Round`]: the state machine
//! - [`ScoreBreakdown`]: the scoring formula's parts
//! - [`RoundSnapshot`]: serializable read-only view for the host

mod config;
pub mod hints;
mod round;
pub mod scoring;
mod snapshot;

pub use config::{
    CORRECT_GUESS_BONUS_SECS, DifficultyProfile, HINT_BONUS_SECS, PENALTY_FLOOR_SECS,
    WRONG_GUESS_PENALTY_SECS,
};
pub use round::{
    GuessOutcome, GuessResult, HintGrant, HintOutcome, IgnoreReason, Round, TickOutcome,
};
pub use scoring::ScoreBreakdown;
pub use snapshot::RoundSnapshot;
