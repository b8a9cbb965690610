//! Events emitted while a round is being played.
//!
//! The host UI never inspects round internals. It subscribes to a stream
//! of [`RoundEvent`]s and re-renders from them. Commentary text (the
//! snark) is picked by the host based on the event kind; none of it
//! lives here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{HintType, LengthBucket, RoundStatus};

/// The content handed to the player when a hint is granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintPayload {
    /// A narrower clue about the word's category.
    Category { clue: String },
    /// A letter of the word the player hasn't guessed yet.
    Letter { letter: char },
    /// Revealed letters and `_` blanks separated by spaces, e.g. `C _ T`.
    Pattern {
        pattern: String,
        bucket: LengthBucket,
    },
}

impl fmt::Display for HintPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category { clue } => write!(f, "Category clue: {clue}"),
            Self::Letter { letter } => write!(f, "Try the letter: {letter}"),
            Self::Pattern { pattern, bucket } => write!(f, "Pattern: {pattern} ({bucket})"),
        }
    }
}

/// Why a hint request was turned down.
///
/// Declines are expected, user-facing outcomes, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclineReason {
    /// Every hint slot for this difficulty has been spent.
    NoHintsRemaining,
    /// This hint type was already used in the round.
    AlreadyUsed,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHintsRemaining => write!(f, "no hints remaining"),
            Self::AlreadyUsed => write!(f, "hint already used"),
        }
    }
}

/// Something that happened in a round, in the order it happened.
///
/// `#[serde(tag = "type")]` gives `{ "type": "Ticked", "time_remaining": 41 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoundEvent {
    /// A guess changed the round.
    GuessApplied {
        letter: char,
        correct: bool,
        status: RoundStatus,
        time_remaining: u32,
        remaining_guesses: u32,
    },

    /// A hint was granted and charged.
    HintGranted {
        hint: HintType,
        payload: HintPayload,
        hints_remaining: u32,
        time_remaining: u32,
    },

    /// A hint was requested but not granted; nothing was charged.
    HintDeclined { hint: HintType, reason: DeclineReason },

    /// A letter hint had nothing left to reveal; the charge was refunded.
    HintRefunded { hint: HintType },

    /// One second passed on the round clock.
    Ticked { time_remaining: u32 },

    /// The clock crossed a warning threshold (30 s, then 10 s).
    TimeLow { seconds: u32 },

    /// The round reached a terminal state. Sent exactly once.
    Finished {
        won: bool,
        score: u32,
        word: String,
        time_remaining: u32,
    },
}

impl RoundEvent {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_event_json_is_internally_tagged() {
        let event = RoundEvent::Ticked { time_remaining: 41 };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Ticked");
        assert_eq!(json["time_remaining"], 41);
    }

    #[test]
    fn test_hint_granted_nests_tagged_payload() {
        let event = RoundEvent::HintGranted {
            hint: HintType::PatternReveal,
            payload: HintPayload::Pattern {
                pattern: "_ _ _".into(),
                bucket: LengthBucket::Short,
            },
            hints_remaining: 2,
            time_remaining: 95,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "HintGranted");
        assert_eq!(json["hint"], "pattern-reveal");
        assert_eq!(json["payload"]["kind"], "pattern");
        assert_eq!(json["payload"]["pattern"], "_ _ _");
        assert_eq!(json["payload"]["bucket"], "short");
    }

    #[test]
    fn test_hint_payload_display() {
        let pattern = HintPayload::Pattern {
            pattern: "C _ T".into(),
            bucket: LengthBucket::Short,
        };
        assert_eq!(pattern.to_string(), "Pattern: C _ T (short word)");
        assert_eq!(
            HintPayload::Letter { letter: 'A' }.to_string(),
            "Try the letter: A"
        );
    }

    #[test]
    fn test_is_finished() {
        let done = RoundEvent::Finished {
            won: true,
            score: 75,
            word: "CAT".into(),
            time_remaining: 90,
        };
        assert!(done.is_finished());
        assert!(!RoundEvent::TimeLow { seconds: 10 }.is_finished());
    }
}
