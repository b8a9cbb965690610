//! The daily play ceiling.
//!
//! Each signed-in player may start `daily_limit` rounds per window. A
//! window opens with the player's first play and lasts `window_secs`;
//! once it has passed, the next check starts a fresh one. Nothing runs on
//! a timer: windows are reset lazily when the player is next seen.
//!
//! Guests are never limited because there is no profile to count against.
//!
//! # Concurrency note
//!
//! Like the rest of this crate's state, `PlayLimiter` is a plain
//! `HashMap`. The game service keeps it behind a mutex.

use std::collections::HashMap;

use hangman_protocol::{Identity, PlayerId};
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Limiter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Plays per window. Default: 10.
    pub daily_limit: u32,
    /// Window length in seconds. Default: 86 400 (24 h).
    pub window_secs: u64,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            daily_limit: 10,
            window_secs: 86_400,
        }
    }
}

/// A player's standing after a check or a recorded play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayAllowance {
    /// Plays left in the current window.
    pub remaining: u32,
    pub limit: u32,
    /// Unix seconds when the window ends. For a player with no open
    /// window, when it would end if they played now.
    pub resets_at: u64,
}

impl PlayAllowance {
    /// The host nags at three, two and one plays left.
    pub fn is_running_low(&self) -> bool {
        (1..=3).contains(&self.remaining)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct DailyPlays {
    used: u32,
    resets_at: u64,
}

/// Counts plays per player per window.
#[derive(Debug, Default)]
pub struct PlayLimiter {
    plays: HashMap<PlayerId, DailyPlays>,
    config: LimitConfig,
}

impl PlayLimiter {
    pub fn new(config: LimitConfig) -> Self {
        Self {
            plays: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &LimitConfig {
        &self.config
    }

    /// The player's allowance at `now`, without consuming anything.
    pub fn allowance(&self, player: PlayerId, now: u64) -> PlayAllowance {
        let limit = self.config.daily_limit;
        match self.plays.get(&player) {
            Some(p) if now < p.resets_at => PlayAllowance {
                remaining: limit.saturating_sub(p.used),
                limit,
                resets_at: p.resets_at,
            },
            _ => PlayAllowance {
                remaining: limit,
                limit,
                resets_at: now.saturating_add(self.config.window_secs),
            },
        }
    }

    /// Fails if the player has no plays left at `now`. Consumes nothing.
    ///
    /// # Errors
    /// [`SessionError::DailyLimitReached`] with the window's reset time.
    pub fn check(&self, player: PlayerId, now: u64) -> Result<PlayAllowance, SessionError> {
        let allowance = self.allowance(player, now);
        if allowance.is_exhausted() {
            return Err(SessionError::DailyLimitReached {
                player,
                resets_at: allowance.resets_at,
            });
        }
        Ok(allowance)
    }

    /// Consumes one play for the identity.
    ///
    /// Returns `Ok(None)` for guests, who are not counted, and the
    /// remaining allowance for players.
    ///
    /// # Errors
    /// [`SessionError::DailyLimitReached`] if the player has no plays left;
    /// nothing is consumed in that case.
    pub fn record_play(
        &mut self,
        identity: &Identity,
        now: u64,
    ) -> Result<Option<PlayAllowance>, SessionError> {
        let Some(player) = identity.player_id() else {
            return Ok(None);
        };
        self.check(player, now)?;

        let window_secs = self.config.window_secs;
        let entry = self.plays.entry(player).or_insert(DailyPlays {
            used: 0,
            resets_at: now.saturating_add(window_secs),
        });
        if now >= entry.resets_at {
            tracing::debug!(%player, "play window expired, starting a new one");
            *entry = DailyPlays {
                used: 0,
                resets_at: now.saturating_add(window_secs),
            };
        }
        entry.used += 1;

        let allowance = self.allowance(player, now);
        tracing::debug!(
            %player,
            remaining = allowance.remaining,
            resets_at = allowance.resets_at,
            "play recorded"
        );
        Ok(Some(allowance))
    }

    /// Drops every window that has ended. Returns how many were dropped.
    pub fn prune(&mut self, now: u64) -> usize {
        let before = self.plays.len();
        self.plays.retain(|_, p| now < p.resets_at);
        let removed = before - self.plays.len();
        if removed > 0 {
            tracing::debug!(removed, "pruned expired play windows");
        }
        removed
    }

    /// Number of players with an open or not-yet-pruned window.
    pub fn tracked_players(&self) -> usize {
        self.plays.len()
    }
}
