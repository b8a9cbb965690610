//! Shared vocabulary for Snarky Hangman.
//!
//! Everything that crosses a boundary between the round engine, the
//! orchestrating service, and the host UI lives here:
//!
//! - **Types** ([`Difficulty`], [`Category`], [`Word`], [`HintType`],
//!   [`RoundStatus`], [`Identity`], etc.): the domain nouns.
//! - **Events** ([`RoundEvent`]): what the host renders from.
//! - **Challenges** ([`ChallengeRecord`]): the persisted "beat my score" record.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values become bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Round engine (pure) → Protocol (types, events) → Host UI / storage
//! ```

mod challenge;
mod codec;
mod error;
mod event;
mod types;

pub use challenge::{ChallengeId, ChallengeRecord};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use event::{DeclineReason, HintPayload, RoundEvent};
pub use types::{
    Category, Difficulty, HintType, Identity, LengthBucket, PlayerId, RoundStatus,
    Word,
};
