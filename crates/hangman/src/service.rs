//! `GameService` builder and entry points.
//!
//! The service ties the layers together: identity and play limits
//! (session) → word choice (supply) → a round actor per game, whose
//! outcome goes to the stats sink. Challenges are exported from and
//! accepted into the same flow.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use hangman_protocol::{Category, ChallengeId, Difficulty, Identity, PlayerId, Word};
use hangman_round::{Round, RoundSnapshot};
use hangman_session::{PlayAllowance, PlayLimiter};
use rand::Rng;
use tokio::sync::Mutex;

use crate::round::spawn_round;
use crate::{
    ChallengeError, ChallengeExport, ChallengeStore, GameConfig, HangmanError,
    InMemoryChallengeStore, InMemoryStatsSink, InMemoryWordSupply, StartedRound, StatsSink,
    SupplyError, WordSupply, unix_now,
};

/// Shared service state, cloned into background tasks.
struct ServiceState<W: WordSupply, S: StatsSink, C: ChallengeStore> {
    supply: W,
    stats: Arc<S>,
    challenges: C,
    limiter: Mutex<PlayLimiter>,
    recent_words: Mutex<HashMap<PlayerId, RecentWords>>,
    config: GameConfig,
}

/// A player's recently served words, most recent last.
#[derive(Debug, Default)]
struct RecentWords {
    words: VecDeque<String>,
    last_played: u64,
}

/// Builder for a [`GameService`].
///
/// # Example
///
/// ```rust
/// use hangman::{GameService, InMemoryChallengeStore, InMemoryStatsSink, InMemoryWordSupply};
///
/// let service = GameService::builder()
///     .replenish_threshold(3)
///     .build(
///         InMemoryWordSupply::seeded(),
///         InMemoryStatsSink::new(),
///         InMemoryChallengeStore::new(),
///     );
/// assert_eq!(service.config().replenish_threshold, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameServiceBuilder {
    config: GameConfig,
}

impl GameServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn replenish_threshold(mut self, threshold: usize) -> Self {
        self.config.replenish_threshold = threshold;
        self
    }

    pub fn recent_word_memory(mut self, words: usize) -> Self {
        self.config.recent_word_memory = words;
        self
    }

    pub fn daily_limit(mut self, plays: u32) -> Self {
        self.config.limits.daily_limit = plays;
        self
    }

    pub fn clock(mut self, clock: hangman_tick::ClockConfig) -> Self {
        self.config.clock = clock;
        self
    }

    /// Builds the service around the given collaborators.
    pub fn build<W, S, C>(self, supply: W, stats: S, challenges: C) -> GameService<W, S, C>
    where
        W: WordSupply,
        S: StatsSink,
        C: ChallengeStore,
    {
        tracing::debug!(config = ?self.config, "game service built");
        let limiter = PlayLimiter::new(self.config.limits.clone());
        GameService {
            state: Arc::new(ServiceState {
                supply,
                stats: Arc::new(stats),
                challenges,
                limiter: Mutex::new(limiter),
                recent_words: Mutex::new(HashMap::new()),
                config: self.config,
            }),
        }
    }
}

/// Starts rounds and handles challenges. Cheap to clone.
pub struct GameService<W: WordSupply, S: StatsSink, C: ChallengeStore> {
    state: Arc<ServiceState<W, S, C>>,
}

impl<W: WordSupply, S: StatsSink, C: ChallengeStore> Clone for GameService<W, S, C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl GameService<InMemoryWordSupply, InMemoryStatsSink, InMemoryChallengeStore> {
    /// A builder. The collaborators are chosen at [`GameServiceBuilder::build`].
    pub fn builder() -> GameServiceBuilder {
        GameServiceBuilder::new()
    }

    /// A service with the built-in word list and in-memory collaborators.
    pub fn in_memory(config: GameConfig) -> Self {
        GameServiceBuilder::new().config(config).build(
            InMemoryWordSupply::seeded(),
            InMemoryStatsSink::new(),
            InMemoryChallengeStore::new(),
        )
    }
}

impl<W: WordSupply, S: StatsSink, C: ChallengeStore> GameService<W, S, C> {
    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn supply(&self) -> &W {
        &self.state.supply
    }

    pub fn stats(&self) -> &S {
        &self.state.stats
    }

    pub fn challenges(&self) -> &C {
        &self.state.challenges
    }

    /// The player's plays left today; `None` for guests.
    pub async fn allowance(&self, identity: &Identity) -> Option<PlayAllowance> {
        let player = identity.player_id()?;
        let limiter = self.state.limiter.lock().await;
        Some(limiter.allowance(player, unix_now()))
    }

    /// Players whose recently served words are still remembered.
    pub async fn remembered_players(&self) -> usize {
        self.state.recent_words.lock().await.len()
    }

    /// Forgets play windows that have ended and recent-word memory of
    /// players who haven't played for a whole limit window. Hosts call this
    /// periodically. Returns how many entries were dropped.
    pub async fn prune(&self, now: u64) -> usize {
        let windows = self.state.limiter.lock().await.prune(now);

        let window_secs = self.state.config.limits.window_secs;
        let mut recent = self.state.recent_words.lock().await;
        let before = recent.len();
        recent.retain(|_, r| now < r.last_played.saturating_add(window_secs));
        let forgotten = before - recent.len();

        if windows + forgotten > 0 {
            tracing::debug!(windows, forgotten, "pruned stale player state");
        }
        windows + forgotten
    }

    /// Starts a round at the given difficulty in a random playable category.
    ///
    /// # Errors
    /// - [`SessionError::DailyLimitReached`](hangman_session::SessionError) if
    ///   the player has no plays left; nothing is consumed.
    /// - [`SupplyError`] if no word could be found; retryable, nothing is
    ///   consumed.
    pub async fn start_round(
        &self,
        identity: Identity,
        difficulty: Difficulty,
    ) -> Result<StartedRound, HangmanError> {
        self.check_limit(&identity).await?;

        let category = {
            let mut rng = rand::rng();
            Category::PLAYABLE[rng.random_range(0..Category::PLAYABLE.len())]
        };
        let word = self.request_word(&identity, difficulty, category).await?;
        self.maybe_replenish(difficulty, category).await;

        self.launch(identity, word).await
    }

    /// Starts a round from a shared challenge: same word, same difficulty,
    /// category `challenge`. The word supply is not consulted.
    ///
    /// # Errors
    /// [`ChallengeError::NotFound`] or [`ChallengeError::Expired`], and the
    /// same limit error as [`start_round`](Self::start_round).
    pub async fn accept_challenge(
        &self,
        identity: Identity,
        id: &ChallengeId,
    ) -> Result<StartedRound, HangmanError> {
        let record = self
            .state
            .challenges
            .load(id)
            .await?
            .ok_or_else(|| ChallengeError::NotFound(id.clone()))?;
        if record.is_expired(unix_now()) {
            return Err(ChallengeError::Expired(id.clone()).into());
        }

        self.check_limit(&identity).await?;
        let word = Word::new(&record.word, Category::Challenge, record.difficulty)?;
        tracing::info!(
            challenge = %id,
            identity = %identity,
            difficulty = %record.difficulty,
            "challenge accepted"
        );
        self.launch(identity, word).await
    }

    /// Turns a won round into a stored, shareable challenge.
    ///
    /// # Errors
    /// [`ChallengeError::NotWon`] for a round that isn't won, or the store's
    /// error if saving fails.
    pub async fn create_challenge(
        &self,
        snapshot: &RoundSnapshot,
        creator: &Identity,
    ) -> Result<ChallengeExport, HangmanError> {
        let export = {
            let mut rng = rand::rng();
            ChallengeExport::from_snapshot(
                snapshot,
                creator,
                unix_now(),
                self.state.config.challenge_ttl,
                &mut rng,
            )?
        };
        self.state.challenges.save(export.record.clone()).await?;
        tracing::info!(challenge = %export.record.id, creator = %creator, "challenge created");
        Ok(export)
    }

    // -- Internals ---------------------------------------------------------

    async fn check_limit(&self, identity: &Identity) -> Result<(), HangmanError> {
        if let Some(player) = identity.player_id() {
            let limiter = self.state.limiter.lock().await;
            limiter.check(player, unix_now())?;
        }
        Ok(())
    }

    /// Asks the supply for a word the player hasn't seen recently. If the
    /// player has seen the whole bucket, repeats are allowed.
    async fn request_word(
        &self,
        identity: &Identity,
        difficulty: Difficulty,
        category: Category,
    ) -> Result<Word, HangmanError> {
        let exclude: Vec<String> = match identity.player_id() {
            Some(player) => {
                let recent = self.state.recent_words.lock().await;
                recent
                    .get(&player)
                    .map(|r| r.words.iter().cloned().collect())
                    .unwrap_or_default()
            }
            None => Vec::new(),
        };

        let supply = &self.state.supply;
        match supply.request(difficulty, category, &exclude).await {
            Err(SupplyError::NoWordAvailable { .. }) if !exclude.is_empty() => {
                tracing::debug!(
                    %identity,
                    %difficulty,
                    %category,
                    "every word was recent, allowing repeats"
                );
                Ok(supply.request(difficulty, category, &[]).await?)
            }
            result => Ok(result?),
        }
    }

    /// Spawns a background replenish if the bucket is running low.
    async fn maybe_replenish(&self, difficulty: Difficulty, category: Category) {
        let available = match self.state.supply.available(difficulty, category).await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(%difficulty, %category, error = %e, "word supply check failed");
                return;
            }
        };
        if available >= self.state.config.replenish_threshold {
            return;
        }

        tracing::debug!(%difficulty, %category, available, "word pool low, replenishing");
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            if let Err(e) = state.supply.replenish(difficulty, category).await {
                tracing::warn!(%difficulty, %category, error = %e, "word pool replenish failed");
            }
        });
    }

    /// Consumes a play, remembers the word and spawns the round actor.
    async fn launch(&self, identity: Identity, word: Word) -> Result<StartedRound, HangmanError> {
        let now = unix_now();
        let allowance = {
            let mut limiter = self.state.limiter.lock().await;
            limiter.record_play(&identity, now)?
        };
        self.remember(&identity, word.text(), now).await;

        let config = &self.state.config;
        let (handle, events) = spawn_round(
            Round::new(word),
            identity,
            config.clock.clone(),
            Arc::clone(&self.state.stats),
            config.command_channel_size,
        );

        Ok(StartedRound {
            handle,
            events,
            allowance,
        })
    }

    /// Guests aren't remembered: every visitor gets a fresh label.
    async fn remember(&self, identity: &Identity, word: &str, now: u64) {
        let memory = self.state.config.recent_word_memory;
        let Some(player) = identity.player_id() else {
            return;
        };
        if memory == 0 {
            return;
        }
        let mut recent = self.state.recent_words.lock().await;
        let entry = recent.entry(player).or_default();
        entry.last_played = now;
        entry.words.push_back(word.to_string());
        while entry.words.len() > memory {
            entry.words.pop_front();
        }
    }
}
