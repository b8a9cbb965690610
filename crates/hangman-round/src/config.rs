//! Difficulty profiles and the fixed time rules.

use hangman_protocol::Difficulty;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Time rules
// ---------------------------------------------------------------------------

/// Seconds taken off the clock by a wrong guess.
pub const WRONG_GUESS_PENALTY_SECS: u32 = 5;

/// A wrong-guess penalty never pushes the clock below this.
/// Only the tick can take the clock to zero.
pub const PENALTY_FLOOR_SECS: u32 = 30;

/// Seconds added by a correct guess (capped at the profile's `max_time`).
pub const CORRECT_GUESS_BONUS_SECS: u32 = 10;

/// Seconds added when a hint is granted (capped at `max_time`).
pub const HINT_BONUS_SECS: u32 = 5;

// ---------------------------------------------------------------------------
// DifficultyProfile
// ---------------------------------------------------------------------------

/// Budgets and rates for one difficulty tier.
///
/// | Difficulty | Wrong guesses | Points/letter | Hint slots | Hint cost | Initial time | Max time |
/// |---|---|---|---|---|---|---|
/// | easy   | 8 | 10 | 3 | 5  | 90s  | 120s |
/// | medium | 6 | 20 | 2 | 10 | 120s | 150s |
/// | hard   | 4 | 30 | 1 | 15 | 180s | 210s |
///
/// A round normally takes its profile from its word's difficulty
/// ([`Round::new`](crate::Round::new)); tests and tools may hand a
/// custom one to [`Round::with_profile`](crate::Round::with_profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Wrong guesses allowed before the round is lost.
    pub max_wrong_guesses: u32,

    /// Score per distinct letter of the word.
    pub points_per_letter: u32,

    /// Hints available in a round.
    pub hint_slots: u32,

    /// Points deducted from the final score per hint used.
    pub hint_cost: u32,

    /// Starting clock, in seconds.
    pub initial_time: u32,

    /// Ceiling that time bonuses can't exceed, in seconds.
    pub max_time: u32,
}

impl DifficultyProfile {
    pub const EASY: Self = Self {
        max_wrong_guesses: 8,
        points_per_letter: 10,
        hint_slots: 3,
        hint_cost: 5,
        initial_time: 90,
        max_time: 120,
    };

    pub const MEDIUM: Self = Self {
        max_wrong_guesses: 6,
        points_per_letter: 20,
        hint_slots: 2,
        hint_cost: 10,
        initial_time: 120,
        max_time: 150,
    };

    pub const HARD: Self = Self {
        max_wrong_guesses: 4,
        points_per_letter: 30,
        hint_slots: 1,
        hint_cost: 15,
        initial_time: 180,
        max_time: 210,
    };

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::EASY,
            Difficulty::Medium => Self::MEDIUM,
            Difficulty::Hard => Self::HARD,
        }
    }
}

impl From<Difficulty> for DifficultyProfile {
    fn from(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_difficulty_easy_values() {
        let p = DifficultyProfile::for_difficulty(Difficulty::Easy);
        assert_eq!(p.max_wrong_guesses, 8);
        assert_eq!(p.points_per_letter, 10);
        assert_eq!(p.hint_slots, 3);
        assert_eq!(p.hint_cost, 5);
        assert_eq!(p.initial_time, 90);
        assert_eq!(p.max_time, 120);
    }

    #[test]
    fn test_for_difficulty_medium_values() {
        let p = DifficultyProfile::from(Difficulty::Medium);
        assert_eq!(
            (p.max_wrong_guesses, p.points_per_letter, p.hint_slots, p.hint_cost),
            (6, 20, 2, 10)
        );
        assert_eq!((p.initial_time, p.max_time), (120, 150));
    }

    #[test]
    fn test_for_difficulty_hard_values() {
        let p = DifficultyProfile::from(Difficulty::Hard);
        assert_eq!(
            (p.max_wrong_guesses, p.points_per_letter, p.hint_slots, p.hint_cost),
            (4, 30, 1, 15)
        );
        assert_eq!((p.initial_time, p.max_time), (180, 210));
    }

    #[test]
    fn test_every_profile_starts_under_its_ceiling() {
        for d in Difficulty::ALL {
            let p = DifficultyProfile::for_difficulty(d);
            assert!(p.initial_time <= p.max_time, "{d}");
            assert!(p.initial_time > PENALTY_FLOOR_SECS, "{d}");
            assert!(p.hint_slots as usize <= hangman_protocol::HintType::ALL.len());
        }
    }
}
