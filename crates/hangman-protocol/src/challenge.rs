//! Challenge records: "I solved this word with this score, beat me."
//!
//! A record is created from a won round and persisted by a challenge
//! store. Loading it later seeds a brand-new round with the same word and
//! difficulty. Records expire; an expired record can't be accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Difficulty, PlayerId};

/// Opaque identifier of a challenge, shared in links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeId(pub String);

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted snapshot of a won round that a friend can replay.
///
/// All timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub id: ChallengeId,
    /// `None` when a guest issued the challenge.
    pub creator: Option<PlayerId>,
    pub word: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub time_remaining: u32,
    pub hints_used: u32,
    pub created_at: u64,
    pub expires_at: u64,
}

impl ChallengeRecord {
    /// A record is expired from its `expires_at` second onward.
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(expires_at: u64) -> ChallengeRecord {
        ChallengeRecord {
            id: ChallengeId("abc".into()),
            creator: Some(PlayerId(1)),
            word: "CAT".into(),
            difficulty: Difficulty::Easy,
            score: 75,
            time_remaining: 90,
            hints_used: 0,
            created_at: 1_000,
            expires_at,
        }
    }

    #[test]
    fn test_is_expired_boundary() {
        let r = record(2_000);
        assert!(!r.is_expired(1_999));
        assert!(r.is_expired(2_000));
        assert!(r.is_expired(5_000));
    }

    #[test]
    fn test_challenge_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ChallengeId("f00d".into())).unwrap();
        assert_eq!(json, "\"f00d\"");
    }
}
