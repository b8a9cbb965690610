//! Core domain types shared by every crate in the workspace.
//!
//! These are the nouns of the game: who is playing, at which difficulty,
//! which word, and which hints exist. They are all serializable because
//! the host UI and the storage collaborators see them directly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a registered player.
///
/// Newtype over `u64` so it can't be confused with a score or a count.
/// `#[serde(transparent)]` keeps it a plain number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Who is playing a round.
///
/// The round engine never looks at this. It only matters to the
/// collaborators around it: registered players have stats and a daily
/// play ceiling, guests just play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    /// A signed-in player with a persisted profile.
    Player { id: PlayerId },
    /// An anonymous visitor, identified only by a display label.
    Guest { label: String },
}

impl Identity {
    pub fn player(id: u64) -> Self {
        Self::Player { id: PlayerId(id) }
    }

    pub fn guest(label: impl Into<String>) -> Self {
        Self::Guest {
            label: label.into(),
        }
    }

    /// The player ID, or `None` for guests.
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Self::Player { id } => Some(*id),
            Self::Guest { .. } => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player { id } => write!(f, "{id}"),
            Self::Guest { label } => write!(f, "guest:{label}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// The three difficulty tiers. Closed set: not user-extensible.
///
/// Each tier maps to a fixed profile of guess, time and hint budgets
/// (see `hangman_round::DifficultyProfile`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Every tier, easiest first.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownDifficulty(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The topic a word belongs to.
///
/// Eight categories are playable. `Challenge` is synthetic: it is assigned
/// to rounds seeded from a friend's challenge, where the original category
/// is deliberately hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Animals,
    Science,
    Arts,
    Sports,
    Food,
    Geography,
    Business,
    Health,
    Challenge,
}

impl Category {
    /// Categories a new round may draw from (uniformly).
    pub const PLAYABLE: [Category; 8] = [
        Self::Animals,
        Self::Science,
        Self::Arts,
        Self::Sports,
        Self::Food,
        Self::Geography,
        Self::Business,
        Self::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Animals => "animals",
            Self::Science => "science",
            Self::Arts => "arts",
            Self::Sports => "sports",
            Self::Food => "food",
            Self::Geography => "geography",
            Self::Business => "business",
            Self::Health => "health",
            Self::Challenge => "challenge",
        }
    }

    pub fn is_playable(&self) -> bool {
        !matches!(self, Self::Challenge)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PLAYABLE
            .into_iter()
            .chain([Self::Challenge])
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// The target of a round: uppercase letters, a category and a difficulty.
///
/// Immutable once built. The only constructor is [`Word::new`], and
/// deserialization goes through the same validation, so a `Word` in hand
/// always holds at least one letter and nothing but `A`..=`Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWord")]
pub struct Word {
    text: String,
    category: Category,
    difficulty: Difficulty,
}

/// Unvalidated mirror of [`Word`] used only for deserialization.
#[derive(Deserialize)]
struct RawWord {
    text: String,
    category: Category,
    difficulty: Difficulty,
}

impl TryFrom<RawWord> for Word {
    type Error = ProtocolError;

    fn try_from(raw: RawWord) -> Result<Self, Self::Error> {
        Word::new(raw.text, raw.category, raw.difficulty)
    }
}

impl Word {
    /// Builds a word, upper-casing the text.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidWord`] if the text is empty or contains
    /// anything other than ASCII letters.
    pub fn new(
        text: impl AsRef<str>,
        category: Category,
        difficulty: Difficulty,
    ) -> Result<Self, ProtocolError> {
        let text = text.as_ref().trim().to_ascii_uppercase();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ProtocolError::InvalidWord(text));
        }
        Ok(Self {
            text,
            category,
            difficulty,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of letters (not distinct letters).
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.text.contains(letter)
    }

    /// Letters in word order, repeats included.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }

    /// Each letter once, alphabetically.
    pub fn distinct_letters(&self) -> BTreeSet<char> {
        self.text.chars().collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ---------------------------------------------------------------------------
// Hints
// ---------------------------------------------------------------------------

/// The three hint kinds. Each can be used at most once per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintType {
    /// A narrower clue about the word's category.
    CategoryReveal,
    /// One letter of the word the player hasn't guessed yet.
    LetterReveal,
    /// The word with blanks for unguessed letters, plus a length bucket.
    PatternReveal,
}

impl HintType {
    pub const ALL: [HintType; 3] = [Self::CategoryReveal, Self::LetterReveal, Self::PatternReveal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CategoryReveal => "category-reveal",
            Self::LetterReveal => "letter-reveal",
            Self::PatternReveal => "pattern-reveal",
        }
    }
}

impl fmt::Display for HintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HintType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownHintType(s.to_string()))
    }
}

/// Coarse word-length annotation attached to a pattern hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    /// 4 letters or fewer.
    Short,
    /// 5 or 6 letters.
    Medium,
    /// 7 letters or more.
    Long,
}

impl LengthBucket {
    pub fn for_len(len: usize) -> Self {
        match len {
            0..=4 => Self::Short,
            5..=6 => Self::Medium,
            _ => Self::Long,
        }
    }
}

impl fmt::Display for LengthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => f.write_str("short word"),
            Self::Medium => f.write_str("medium word"),
            Self::Long => f.write_str("long word"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoundStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a round.
///
/// ```text
/// InProgress ──(word covered)──→ Won
///     │
///     └──(guesses exhausted or clock at 0)──→ Lost
/// ```
///
/// Both terminal states are final; the next attempt is a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "InProgress"),
            Self::Won => write!(f, "Won"),
            Self::Lost => write!(f, "Lost"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
