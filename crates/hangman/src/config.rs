//! Service configuration.

use std::time::Duration;

use hangman_session::LimitConfig;
use hangman_tick::ClockConfig;
use serde::{Deserialize, Serialize};

use crate::challenge::DEFAULT_CHALLENGE_TTL;

/// Settings for a [`GameService`](crate::GameService).
///
/// Every field has a default; override only what you need:
///
/// ```rust
/// use hangman::GameConfig;
///
/// let config = GameConfig {
///     replenish_threshold: 10,
///     ..GameConfig::default()
/// };
/// assert_eq!(config.recent_word_memory, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// When a bucket holds fewer fresh words than this after a request,
    /// the service replenishes it in the background. Default: 5.
    pub replenish_threshold: usize,

    /// How many of a player's recent words are excluded from new rounds.
    /// Default: 20.
    pub recent_word_memory: usize,

    /// How long a shared challenge can be accepted. Default: 24 h.
    pub challenge_ttl: Duration,

    /// Capacity of each round's command channel. Default: 32.
    pub command_channel_size: usize,

    /// The round clock.
    pub clock: ClockConfig,

    /// The daily play ceiling.
    pub limits: LimitConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            replenish_threshold: 5,
            recent_word_memory: 20,
            challenge_ttl: DEFAULT_CHALLENGE_TTL,
            command_channel_size: 32,
            clock: ClockConfig::default(),
            limits: LimitConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = GameConfig::default();
        assert_eq!(config.replenish_threshold, 5);
        assert_eq!(config.recent_word_memory, 20);
        assert_eq!(config.challenge_ttl, Duration::from_secs(86_400));
        assert_eq!(config.limits.daily_limit, 10);
        assert_eq!(config.clock.period, Duration::from_secs(1));
    }

    #[test]
    fn test_config_json_round_trip_keeps_overrides() {
        let config = GameConfig {
            command_channel_size: 4,
            ..GameConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
