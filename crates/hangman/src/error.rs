//! Unified error type for Snarky Hangman.

use hangman_protocol::ProtocolError;
use hangman_session::SessionError;

use crate::round::RoundId;
use crate::{ChallengeError, StatsError, SupplyError};

/// Top-level error that wraps every crate- and collaborator-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HangmanError {
    /// Invalid word text, unknown difficulty name, encode/decode failure.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Authentication failure or daily play limit.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Supply(#[from] SupplyError),

    /// Never returned by the service: round outcomes are recorded in the
    /// background and failures only logged. Lets host code that calls a
    /// [`StatsSink`](crate::StatsSink) directly use `?`.
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Challenge(#[from] ChallengeError),

    /// The round's task has exited (acknowledged or dropped).
    #[error("round {0} is closed")]
    RoundClosed(RoundId),
}

impl HangmanError {
    /// `true` if the same call may succeed later without the caller
    /// changing anything.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Supply(_) | Self::Stats(_) => true,
            Self::Challenge(ChallengeError::Storage(_)) => true,
            Self::Protocol(_) | Self::Session(_) | Self::Challenge(_) | Self::RoundClosed(_) => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hangman_protocol::{Category, ChallengeId, Difficulty, PlayerId};

    use super::*;

    #[test]
    fn test_from_supply_error_is_retryable() {
        let err: HangmanError = SupplyError::NoWordAvailable {
            difficulty: Difficulty::Hard,
            category: Category::Arts,
        }
        .into();
        assert!(matches!(err, HangmanError::Supply(_)));
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "no hard word available in arts");
    }

    #[test]
    fn test_from_session_error_is_not_retryable() {
        let err: HangmanError = SessionError::DailyLimitReached {
            player: PlayerId(3),
            resets_at: 42,
        }
        .into();
        assert!(matches!(err, HangmanError::Session(_)));
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("P-3"));
    }

    #[test]
    fn test_stats_error_converts_with_question_mark() {
        fn read_leaderboard() -> Result<(), HangmanError> {
            let fetched: Result<(), StatsError> = Err(StatsError::Unavailable("db down".into()));
            fetched?;
            Ok(())
        }

        let err = read_leaderboard().unwrap_err();
        assert!(matches!(err, HangmanError::Stats(StatsError::Unavailable(_))));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_from_protocol_error() {
        let err: HangmanError = ProtocolError::InvalidWord("c4t".into()).into();
        assert!(matches!(err, HangmanError::Protocol(_)));
    }

    #[test]
    fn test_challenge_errors_retryable_only_for_storage() {
        let storage: HangmanError = ChallengeError::Storage("down".into()).into();
        let missing: HangmanError = ChallengeError::NotFound(ChallengeId("x".into())).into();
        assert!(storage.is_retryable());
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_round_closed_message() {
        let err = HangmanError::RoundClosed(RoundId(7));
        assert_eq!(err.to_string(), "round R-7 is closed");
        assert!(!err.is_retryable());
    }
}
