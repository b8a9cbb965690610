//! Stats sink: where finished rounds are reported.
//!
//! Reporting is fire-and-forget. The round actor spawns the call once the
//! round is over; a failure is logged and never changes the outcome the
//! player already saw.

use std::collections::HashMap;
use std::future::Future;

use hangman_protocol::{Category, Difficulty, Identity, PlayerId};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Errors from a [`StatsSink`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("stats sink unavailable: {0}")]
    Unavailable(String),
}

/// The terminal outcome of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub identity: Identity,
    pub difficulty: Difficulty,
    pub category: Category,
    pub won: bool,
    /// 0 for a lost round.
    pub score: u32,
    pub wrong_guesses: u32,
    pub hints_used: u32,
}

impl RoundOutcome {
    /// Won without a single wrong guess.
    pub fn is_perfect(&self) -> bool {
        self.won && self.wrong_guesses == 0
    }
}

/// Receives finished rounds.
pub trait StatsSink: Send + Sync + 'static {
    fn record_outcome(
        &self,
        outcome: &RoundOutcome,
    ) -> impl Future<Output = Result<(), StatsError>> + Send;
}

// ---------------------------------------------------------------------------
// InMemoryStatsSink
// ---------------------------------------------------------------------------

/// Running totals for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    pub total_score: u64,
    pub best_score: u32,
    /// Consecutive wins up to the latest game.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub perfect_games: u32,
    pub easy_games: u32,
    pub medium_games: u32,
    pub hard_games: u32,
}

impl PlayerStats {
    fn apply(&mut self, outcome: &RoundOutcome) {
        self.games_played += 1;
        match outcome.difficulty {
            Difficulty::Easy => self.easy_games += 1,
            Difficulty::Medium => self.medium_games += 1,
            Difficulty::Hard => self.hard_games += 1,
        }

        if outcome.won {
            self.games_won += 1;
            self.total_score += u64::from(outcome.score);
            self.best_score = self.best_score.max(outcome.score);
            self.current_streak += 1;
            self.longest_streak = self.longest_streak.max(self.current_streak);
            if outcome.is_perfect() {
                self.perfect_games += 1;
            }
        } else {
            self.current_streak = 0;
        }
    }

    /// Games played at the given difficulty.
    pub fn games_at(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_games,
            Difficulty::Medium => self.medium_games,
            Difficulty::Hard => self.hard_games,
        }
    }
}

/// Keeps [`PlayerStats`] per player in memory. Guest outcomes are accepted
/// and dropped.
#[derive(Debug, Default)]
pub struct InMemoryStatsSink {
    players: Mutex<HashMap<PlayerId, PlayerStats>>,
}

impl InMemoryStatsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stats(&self, player: PlayerId) -> Option<PlayerStats> {
        self.players.lock().await.get(&player).cloned()
    }

    /// Number of players with at least one recorded game.
    pub async fn player_count(&self) -> usize {
        self.players.lock().await.len()
    }
}

impl StatsSink for InMemoryStatsSink {
    async fn record_outcome(&self, outcome: &RoundOutcome) -> Result<(), StatsError> {
        let Some(player) = outcome.identity.player_id() else {
            tracing::trace!(identity = %outcome.identity, "guest outcome not stored");
            return Ok(());
        };
        let mut players = self.players.lock().await;
        let stats = players.entry(player).or_default();
        stats.apply(outcome);
        tracing::debug!(
            %player,
            won = outcome.won,
            score = outcome.score,
            streak = stats.current_streak,
            "outcome recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(won: bool, score: u32, wrong_guesses: u32) -> RoundOutcome {
        RoundOutcome {
            identity: Identity::player(1),
            difficulty: Difficulty::Easy,
            category: Category::Animals,
            won,
            score,
            wrong_guesses,
            hints_used: 0,
        }
    }

    #[tokio::test]
    async fn test_record_outcome_accumulates_totals() {
        let sink = InMemoryStatsSink::new();

        sink.record_outcome(&outcome(true, 75, 0)).await.unwrap();
        sink.record_outcome(&outcome(true, 40, 2)).await.unwrap();
        sink.record_outcome(&outcome(false, 0, 8)).await.unwrap();

        let stats = sink.stats(PlayerId(1)).await.unwrap();
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.total_score, 115);
        assert_eq!(stats.best_score, 75);
        assert_eq!(stats.perfect_games, 1);
        assert_eq!(stats.games_at(Difficulty::Easy), 3);
    }

    #[tokio::test]
    async fn test_record_outcome_streaks() {
        let sink = InMemoryStatsSink::new();
        for won in [true, true, true, false, true] {
            sink.record_outcome(&outcome(won, if won { 10 } else { 0 }, 1))
                .await
                .unwrap();
        }

        let stats = sink.stats(PlayerId(1)).await.unwrap();
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
    }

    #[tokio::test]
    async fn test_record_outcome_guest_is_not_stored() {
        let sink = InMemoryStatsSink::new();
        let guest = RoundOutcome {
            identity: Identity::guest("guest-1"),
            ..outcome(true, 75, 0)
        };

        sink.record_outcome(&guest).await.unwrap();

        assert_eq!(sink.player_count().await, 0);
    }

    #[test]
    fn test_is_perfect_requires_win() {
        assert!(outcome(true, 75, 0).is_perfect());
        assert!(!outcome(false, 0, 0).is_perfect());
        assert!(!outcome(true, 70, 1).is_perfect());
    }
}
