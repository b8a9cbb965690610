//! The scoring formula.
//!
//! ```text
//! base         = distinct letters in word × points_per_letter
//! wrong        = wrong guesses × 5
//! hint_penalty = hints used × hint_cost
//! time_bonus   = ⌊time_remaining / 10⌋ × 5
//! total        = max(0, base − wrong − hint_penalty + time_bonus)
//! ```
//!
//! Only a won round is scored; a lost round is worth 0 and never reaches
//! this module.

use std::collections::BTreeSet;

use hangman_protocol::Word;
use serde::{Deserialize, Serialize};

use crate::DifficultyProfile;

/// Points deducted per wrong guess, at every difficulty.
pub const WRONG_GUESS_POINTS: u32 = 5;

/// Every full 10 seconds left on the clock is worth this many points.
pub const TIME_BONUS_POINTS: u32 = 5;

/// The formula's parts, kept so the host can show where a score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub wrong_guess_penalty: u32,
    pub hint_penalty: u32,
    pub time_bonus: u32,
    /// Never negative: clamped at zero.
    pub total: u32,
}

/// Scores a finished round.
pub fn calculate(
    word: &Word,
    guessed: &BTreeSet<char>,
    profile: &DifficultyProfile,
    hints_used: u32,
    time_remaining: u32,
) -> ScoreBreakdown {
    let unique_letters = word.distinct_letters().len() as u32;
    let wrong_guesses = guessed.iter().filter(|l| !word.contains(**l)).count() as u32;

    let base = unique_letters * profile.points_per_letter;
    let wrong_guess_penalty = wrong_guesses * WRONG_GUESS_POINTS;
    let hint_penalty = hints_used * profile.hint_cost;
    let time_bonus = (time_remaining / 10) * TIME_BONUS_POINTS;

    let total = (base + time_bonus).saturating_sub(wrong_guess_penalty + hint_penalty);

    ScoreBreakdown {
        base,
        wrong_guess_penalty,
        hint_penalty,
        time_bonus,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangman_protocol::{Category, Difficulty};

    fn cat() -> Word {
        Word::new("CAT", Category::Animals, Difficulty::Easy).unwrap()
    }

    fn set(letters: &str) -> BTreeSet<char> {
        letters.chars().collect()
    }

    #[test]
    fn test_calculate_clean_win_at_ninety_seconds() {
        let score = calculate(&cat(), &set("CAT"), &DifficultyProfile::EASY, 0, 90);
        assert_eq!(score.base, 30);
        assert_eq!(score.time_bonus, 45);
        assert_eq!(score.total, 75);
    }

    #[test]
    fn test_calculate_one_wrong_guess_subtracts_five() {
        let score = calculate(&cat(), &set("CATZ"), &DifficultyProfile::EASY, 0, 85);
        assert_eq!(score.wrong_guess_penalty, 5);
        assert_eq!(score.time_bonus, 40);
        assert_eq!(score.total, 30 - 5 + 40);
    }

    #[test]
    fn test_calculate_hint_penalty_uses_profile_cost() {
        let word = Word::new("MATRIX", Category::Arts, Difficulty::Medium).unwrap();
        let score = calculate(&word, &set("MATRIX"), &DifficultyProfile::MEDIUM, 2, 0);
        assert_eq!(score.base, 6 * 20);
        assert_eq!(score.hint_penalty, 2 * 10);
        assert_eq!(score.total, 100);
    }

    #[test]
    fn test_calculate_counts_distinct_letters_only() {
        let word = Word::new("BANANA", Category::Food, Difficulty::Easy).unwrap();
        let score = calculate(&word, &set("BAN"), &DifficultyProfile::EASY, 0, 0);
        assert_eq!(score.base, 30);
    }

    #[test]
    fn test_calculate_time_bonus_floors_to_tens() {
        let score = calculate(&cat(), &set("CAT"), &DifficultyProfile::EASY, 0, 39);
        assert_eq!(score.time_bonus, 15);
    }

    #[test]
    fn test_calculate_clamps_at_zero() {
        let word = Word::new("OX", Category::Animals, Difficulty::Hard).unwrap();
        let score = calculate(&word, &set("OXABCD"), &DifficultyProfile::HARD, 1, 0);
        // 60 − 20 − 15 + 0 = 25, still positive; pile on a harsher profile.
        assert_eq!(score.total, 25);

        let stingy = DifficultyProfile {
            points_per_letter: 1,
            ..DifficultyProfile::HARD
        };
        let score = calculate(&word, &set("OXABCD"), &stingy, 1, 0);
        assert_eq!(score.total, 0);
    }
}
