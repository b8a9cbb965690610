//! Error types for the session layer.

use hangman_protocol::PlayerId;

/// Errors from identity resolution and play limiting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The token was rejected by the [`IdentityProvider`](crate::IdentityProvider).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The player has used up today's plays.
    /// `resets_at` is a Unix timestamp in seconds.
    #[error("player {player} reached the daily play limit; resets at {resets_at}")]
    DailyLimitReached { player: PlayerId, resets_at: u64 },
}
