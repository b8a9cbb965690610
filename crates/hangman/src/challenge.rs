//! Challenges: share a won round so a friend can try to beat it.
//!
//! A won round becomes a [`ChallengeExport`]: a persisted
//! [`ChallengeRecord`] plus a taunting message for the share sheet. The
//! friend later accepts the challenge by id and plays the same word at
//! the same difficulty (see `GameService::accept_challenge`).

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use hangman_protocol::{ChallengeId, ChallengeRecord, Codec, Identity, JsonCodec};
use hangman_round::RoundSnapshot;
use rand::Rng;
use tokio::sync::Mutex;

/// How long a challenge can be accepted. Default: 24 h.
pub const DEFAULT_CHALLENGE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors from exporting, storing or accepting a challenge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChallengeError {
    /// Only a won round can be turned into a challenge.
    #[error("only a won round can be shared as a challenge")]
    NotWon,

    #[error("challenge {0} not found")]
    NotFound(ChallengeId),

    #[error("challenge {0} has expired")]
    Expired(ChallengeId),

    #[error("challenge store error: {0}")]
    Storage(String),
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// A challenge ready to share: the record to persist and the message to
/// post alongside the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeExport {
    pub record: ChallengeRecord,
    pub message: String,
}

impl ChallengeExport {
    /// Builds a challenge from a won round.
    ///
    /// `now` is unix seconds; the record expires `ttl` later. The message
    /// template and the id are drawn from `rng`.
    ///
    /// # Errors
    /// [`ChallengeError::NotWon`] unless the snapshot is of a won round.
    pub fn from_snapshot<R: Rng + ?Sized>(
        snapshot: &RoundSnapshot,
        creator: &Identity,
        now: u64,
        ttl: Duration,
        rng: &mut R,
    ) -> Result<Self, ChallengeError> {
        let word = match (&snapshot.word, snapshot.is_won()) {
            (Some(word), true) => word.clone(),
            _ => return Err(ChallengeError::NotWon),
        };

        let record = ChallengeRecord {
            id: generate_id(rng),
            creator: creator.player_id(),
            word,
            difficulty: snapshot.difficulty,
            score: snapshot.score,
            time_remaining: snapshot.time_remaining,
            hints_used: snapshot.hints_used,
            created_at: now,
            expires_at: now.saturating_add(ttl.as_secs()),
        };
        let message = taunt(&record, rng.random_range(0..TEMPLATE_COUNT));

        Ok(Self { record, message })
    }

    /// A share link: `base` with the challenge id as a query parameter.
    pub fn link(&self, base: &str) -> String {
        format!("{base}?challenge={}", self.record.id)
    }
}

const TEMPLATE_COUNT: usize = 4;

fn taunt(record: &ChallengeRecord, template: usize) -> String {
    let word = &record.word;
    match template {
        0 => format!(
            "I just crushed '{word}' with {} points! Think you can beat that? 😏",
            record.score
        ),
        1 => format!(
            "Just solved '{word}' with {} hints. Surely you won't need any... right? 🤔",
            record.hints_used
        ),
        2 => format!(
            "Aced '{word}' on {} mode! Your turn, smarty-pants! 🎯",
            record.difficulty
        ),
        _ => format!(
            "Barely solved '{word}' with {}s left. Think you can do better? 🫣",
            record.time_remaining
        ),
    }
}

/// 128 random bits as 32 lowercase hex characters.
fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> ChallengeId {
    let bytes: [u8; 16] = rng.random();
    ChallengeId(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Persists challenge records.
pub trait ChallengeStore: Send + Sync + 'static {
    fn save(
        &self,
        record: ChallengeRecord,
    ) -> impl Future<Output = Result<(), ChallengeError>> + Send;

    /// `Ok(None)` if no record has that id. Expiry is the caller's check.
    fn load(
        &self,
        id: &ChallengeId,
    ) -> impl Future<Output = Result<Option<ChallengeRecord>, ChallengeError>> + Send;
}

/// Challenge records held in memory, stored as the JSON a durable store
/// would write.
#[derive(Debug, Default)]
pub struct InMemoryChallengeStore {
    codec: JsonCodec,
    records: Mutex<HashMap<ChallengeId, Vec<u8>>>,
}

impl InMemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every record expired at `now`, and any that no longer decode.
    /// Returns how many were dropped.
    pub async fn purge_expired(&self, now: u64) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, bytes| {
            self.codec
                .decode::<ChallengeRecord>(bytes)
                .is_ok_and(|r| !r.is_expired(now))
        });
        let removed = before - records.len();
        if removed > 0 {
            tracing::debug!(removed, "purged expired challenges");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl ChallengeStore for InMemoryChallengeStore {
    async fn save(&self, record: ChallengeRecord) -> Result<(), ChallengeError> {
        let bytes = self
            .codec
            .encode(&record)
            .map_err(|e| ChallengeError::Storage(e.to_string()))?;
        tracing::debug!(id = %record.id, expires_at = record.expires_at, "challenge saved");
        self.records.lock().await.insert(record.id, bytes);
        Ok(())
    }

    async fn load(&self, id: &ChallengeId) -> Result<Option<ChallengeRecord>, ChallengeError> {
        let records = self.records.lock().await;
        let Some(bytes) = records.get(id) else {
            return Ok(None);
        };
        self.codec
            .decode(bytes)
            .map(Some)
            .map_err(|e| ChallengeError::Storage(e.to_string()))
    }
}
