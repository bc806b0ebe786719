//! Audio decode port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::DecodedAudio;

/// Decode errors
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("Audio input is empty")]
    EmptyInput,

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("No audio track found in container")]
    NoAudioTrack,

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),
}

/// Port for the platform audio decode capability.
///
/// Turns an opaque compressed payload into a [`DecodedAudio`] buffer.
/// Implementations hold no state across calls and are never retried by
/// callers; a failed decode is surfaced as-is.
#[async_trait]
pub trait AudioDecoder: Send + Sync {
    /// Decode a compressed audio payload.
    ///
    /// # Arguments
    /// * `bytes` - The raw payload (any container/codec the runtime supports)
    ///
    /// # Returns
    /// The decoded buffer, or a [`DecodeError`] when the bytes are empty,
    /// corrupt, or use a codec the runtime cannot decode
    async fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError>;
}
