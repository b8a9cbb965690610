//! Serializable read-only view of a round.

use hangman_protocol::{Category, Difficulty, HintType, RoundStatus};
use serde::{Deserialize, Serialize};

use crate::Round;

/// Everything the host needs to draw a round, without the answer.
///
/// `word` stays `None` while the round is in progress so a snapshot can
/// be shipped to a client without leaking the solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub difficulty: Difficulty,
    pub category: Category,
    /// Revealed letters and blanks, e.g. `C _ T`.
    pub pattern: String,
    /// The full word; only present once the round is terminal.
    pub word: Option<String>,
    pub word_len: usize,
    /// Alphabetical.
    pub guessed_letters: Vec<char>,
    pub wrong_guesses: u32,
    pub remaining_guesses: u32,
    pub time_remaining: u32,
    pub max_time: u32,
    pub hints_remaining: u32,
    pub hints_used: u32,
    pub used_hint_types: Vec<HintType>,
    pub status: RoundStatus,
    pub score: u32,
}

impl RoundSnapshot {
    pub(crate) fn of(round: &Round) -> Self {
        let word = round.word();
        Self {
            difficulty: word.difficulty(),
            category: word.category(),
            pattern: round.masked_word(),
            word: round
                .status()
                .is_terminal()
                .then(|| word.text().to_string()),
            word_len: word.len(),
            guessed_letters: round.guessed_letters().iter().copied().collect(),
            wrong_guesses: round.wrong_guess_count(),
            remaining_guesses: round.remaining_guesses(),
            time_remaining: round.time_remaining(),
            max_time: round.profile().max_time,
            hints_remaining: round.hints_remaining(),
            hints_used: round.hints_used(),
            used_hint_types: round.used_hint_types().iter().copied().collect(),
            status: round.status(),
            score: round.score(),
        }
    }

    pub fn is_won(&self) -> bool {
        self.status == RoundStatus::Won
    }
}
