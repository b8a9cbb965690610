//! Codec trait and implementations for turning protocol values into bytes.
//!
//! The service and the in-memory stores don't care HOW a challenge record
//! or a snapshot is serialized; they hold something that implements
//! [`Codec`]. [`JsonCodec`] is the only implementation today. It is what
//! the browser host speaks.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to bytes and decodes them back.
///
/// `Send + Sync + 'static` because codecs live inside long-running
/// service state shared across tokio tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// `ProtocolError::Encode` if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// `ProtocolError::Decode` if the bytes are malformed or describe an
    /// invalid value (validation runs during decoding).
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`. Behind the `json` feature (default).
///
/// ```rust
/// use hangman_protocol::{Codec, Difficulty, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&Difficulty::Hard).unwrap();
/// assert_eq!(bytes, b"\"hard\"");
///
/// let back: Difficulty = codec.decode(&bytes).unwrap();
/// assert_eq!(back, Difficulty::Hard);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{ChallengeId, ChallengeRecord, Difficulty, PlayerId, Word};

    #[test]
    fn test_json_codec_challenge_record() {
        let codec = JsonCodec;
        let record = ChallengeRecord {
            id: ChallengeId("0123abcd".into()),
            creator: Some(PlayerId(5)),
            word: "MATRIX".into(),
            difficulty: Difficulty::Medium,
            score: 140,
            time_remaining: 62,
            hints_used: 1,
            created_at: 10,
            expires_at: 86_410,
        };

        let bytes = codec.encode(&record).unwrap();
        let decoded: ChallengeRecord = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_json_codec_decode_garbage_is_error() {
        let result: Result<Word, _> = JsonCodec.decode(b"not json");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_decode_invalid_word_is_error() {
        let result: Result<Word, _> = JsonCodec
            .decode(br#"{"text":"","category":"food","difficulty":"easy"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
