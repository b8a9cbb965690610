//! The round state machine.

use std::collections::BTreeSet;

use hangman_protocol::{DeclineReason, HintPayload, HintType, RoundStatus, Word};
use rand::Rng;

use crate::config::{
    CORRECT_GUESS_BONUS_SECS, HINT_BONUS_SECS, PENALTY_FLOOR_SECS, WRONG_GUESS_PENALTY_SECS,
};
use crate::{DifficultyProfile, RoundSnapshot, ScoreBreakdown, hints, scoring};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why an input left the round untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The input wasn't an ASCII letter.
    NotALetter,
    /// The letter was guessed earlier in the round.
    AlreadyGuessed,
    /// The round is already won or lost.
    RoundOver,
}

/// What a guess did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    /// The guess, upper-cased.
    pub letter: char,
    /// `true` if the letter is in the word.
    pub correct: bool,
    pub status: RoundStatus,
    pub time_remaining: u32,
    pub remaining_guesses: u32,
    /// Set when this guess ended the round (0 for a loss).
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Applied(GuessResult),
    Ignored(IgnoreReason),
}

impl GuessOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn result(&self) -> Option<&GuessResult> {
        match self {
            Self::Applied(r) => Some(r),
            Self::Ignored(_) => None,
        }
    }
}

/// A granted, charged hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintGrant {
    pub hint: HintType,
    pub payload: HintPayload,
    pub hints_remaining: u32,
    pub time_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    Granted(HintGrant),
    /// Not granted; nothing charged. The host shows the reason.
    Declined(DeclineReason),
    /// Accepted but there was nothing to reveal, so nothing was charged
    /// and the type stays available.
    Refunded(HintType),
    Ignored(IgnoreReason),
}

/// What one clock tick did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still playing.
    Running { time_remaining: u32 },
    /// This tick ran the clock out; the round is now lost.
    Expired,
    /// The round had already ended; the clock should stop calling.
    Stopped,
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

/// One play-through of one word.
///
/// Invariants, true after every operation:
/// - `wrong_guess_count() + remaining_guesses() == profile.max_wrong_guesses`
///   while in progress;
/// - `time_remaining() <= profile.max_time`;
/// - once `status()` is terminal nothing changes again, and the score has
///   been evaluated exactly once.
#[derive(Debug, Clone)]
pub struct Round {
    word: Word,
    profile: DifficultyProfile,
    guessed: BTreeSet<char>,
    time_remaining: u32,
    hints_remaining: u32,
    used_hints: BTreeSet<HintType>,
    status: RoundStatus,
    final_score: Option<ScoreBreakdown>,
}

impl Round {
    /// Starts a round with the profile of the word's difficulty.
    pub fn new(word: Word) -> Self {
        let profile = DifficultyProfile::for_difficulty(word.difficulty());
        Self::with_profile(word, profile)
    }

    /// Starts a round with an explicit profile.
    pub fn with_profile(word: Word, profile: DifficultyProfile) -> Self {
        tracing::debug!(
            difficulty = %word.difficulty(),
            category = %word.category(),
            letters = word.len(),
            "round created"
        );
        Self {
            word,
            time_remaining: profile.initial_time.min(profile.max_time),
            hints_remaining: profile.hint_slots,
            profile,
            guessed: BTreeSet::new(),
            used_hints: BTreeSet::new(),
            status: RoundStatus::InProgress,
            final_score: None,
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn wrong_guess_count(&self) -> u32 {
        self.guessed.iter().filter(|l| !self.word.contains(**l)).count() as u32
    }

    pub fn remaining_guesses(&self) -> u32 {
        self.profile
            .max_wrong_guesses
            .saturating_sub(self.wrong_guess_count())
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn hints_used(&self) -> u32 {
        self.used_hints.len() as u32
    }

    pub fn used_hint_types(&self) -> &BTreeSet<HintType> {
        &self.used_hints
    }

    /// `true` when every letter of the word has been guessed.
    pub fn is_word_covered(&self) -> bool {
        self.word.letters().all(|l| self.guessed.contains(&l))
    }

    /// The word as revealed so far, e.g. `C _ T`.
    pub fn masked_word(&self) -> String {
        hints::word_pattern(&self.word, &self.guessed)
    }

    /// Final score: 0 until the round is won, and forever 0 if it is lost.
    pub fn score(&self) -> u32 {
        self.final_score.map(|s| s.total).unwrap_or(0)
    }

    /// The scoring breakdown, once the round is terminal.
    pub fn score_breakdown(&self) -> Option<ScoreBreakdown> {
        self.final_score
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::of(self)
    }

    // -- Operations --------------------------------------------------------

    /// Applies a guessed letter.
    ///
    /// Lowercase input is accepted. A repeated letter, a non-letter, or any
    /// guess after the round ended is ignored and changes nothing.
    pub fn submit_guess(&mut self, input: char) -> GuessOutcome {
        if self.status.is_terminal() {
            return GuessOutcome::Ignored(IgnoreReason::RoundOver);
        }
        if !input.is_ascii_alphabetic() {
            return GuessOutcome::Ignored(IgnoreReason::NotALetter);
        }
        let letter = input.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed);
        }

        let correct = self.word.contains(letter);
        if correct {
            self.add_time(CORRECT_GUESS_BONUS_SECS);
        } else {
            self.apply_wrong_guess_penalty();
        }
        self.refresh_status();

        tracing::trace!(
            %letter,
            correct,
            time_remaining = self.time_remaining,
            status = %self.status,
            "guess applied"
        );

        GuessOutcome::Applied(GuessResult {
            letter,
            correct,
            status: self.status,
            time_remaining: self.time_remaining,
            remaining_guesses: self.remaining_guesses(),
            score: self.final_score.map(|s| s.total),
        })
    }

    /// Spends a hint slot on the given hint type.
    ///
    /// Each type can be used once per round. Requests for a used type or
    /// with no slots left are declined without charge. A letter reveal
    /// with nothing left to reveal is refunded.
    pub fn consume_hint<R: Rng + ?Sized>(&mut self, hint: HintType, rng: &mut R) -> HintOutcome {
        if self.status.is_terminal() {
            return HintOutcome::Ignored(IgnoreReason::RoundOver);
        }
        if self.used_hints.contains(&hint) {
            return HintOutcome::Declined(DeclineReason::AlreadyUsed);
        }
        if self.hints_remaining == 0 {
            return HintOutcome::Declined(DeclineReason::NoHintsRemaining);
        }

        let Some(payload) = hints::generate(hint, &self.word, &self.guessed, rng) else {
            tracing::debug!(%hint, "nothing to reveal, hint refunded");
            return HintOutcome::Refunded(hint);
        };

        self.hints_remaining -= 1;
        self.used_hints.insert(hint);
        self.add_time(HINT_BONUS_SECS);

        tracing::trace!(%hint, hints_remaining = self.hints_remaining, "hint granted");

        HintOutcome::Granted(HintGrant {
            hint,
            payload,
            hints_remaining: self.hints_remaining,
            time_remaining: self.time_remaining,
        })
    }

    /// One second of play elapsed.
    ///
    /// Reaching zero loses the round even if guesses remain.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status.is_terminal() {
            return TickOutcome::Stopped;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.refresh_status();
        if self.status.is_terminal() {
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                time_remaining: self.time_remaining,
            }
        }
    }

    // -- Internals ---------------------------------------------------------

    fn add_time(&mut self, secs: u32) {
        self.time_remaining = (self.time_remaining + secs).min(self.profile.max_time);
    }

    /// Takes the penalty off the clock without crossing the floor. A clock
    /// already at or below the floor (only possible through ticks) is left
    /// alone rather than lifted to the floor as a bare `max(30, t - 5)`
    /// would do: a wrong guess never adds time.
    fn apply_wrong_guess_penalty(&mut self) {
        let penalized = self
            .time_remaining
            .saturating_sub(WRONG_GUESS_PENALTY_SECS)
            .max(PENALTY_FLOOR_SECS);
        self.time_remaining = penalized.min(self.time_remaining);
    }

    /// Recomputes the status from guesses first, then time, so a guess
    /// that completes the word always wins.
    fn refresh_status(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = if self.is_word_covered() {
            RoundStatus::Won
        } else if self.remaining_guesses() == 0 || self.time_remaining == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        };
        if self.status.is_terminal() {
            self.finalize();
        }
    }

    fn finalize(&mut self) {
        let breakdown = match self.status {
            RoundStatus::Won => scoring::calculate(
                &self.word,
                &self.guessed,
                &self.profile,
                self.hints_used(),
                self.time_remaining,
            ),
            _ => ScoreBreakdown::default(),
        };
        self.final_score = Some(breakdown);
        tracing::debug!(
            status = %self.status,
            score = breakdown.total,
            time_remaining = self.time_remaining,
            "round finished"
        );
    }
}
