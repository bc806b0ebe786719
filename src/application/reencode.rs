//! WAV re-encode use case
//!
//! Converts an arbitrary compressed audio payload into the canonical WAV
//! container: decode through the injected [`AudioDecoder`] capability, then
//! serialize with [`wav::encode_wav`]. The decode is the only suspending
//! step; serialization runs to completion synchronously. Each call works on
//! its own buffers, so concurrent conversions share nothing.

use crate::domain::audio::{wav, AudioData};

use super::ports::{AudioDecoder, DecodeError};

/// One-shot converter from compressed audio payloads to canonical WAV
pub struct WavReencoder<D: AudioDecoder> {
    decoder: D,
}

impl<D: AudioDecoder> WavReencoder<D> {
    /// Create a re-encoder over a decode capability
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Convert a compressed payload into the canonical WAV container.
    ///
    /// # Errors
    /// [`DecodeError`] when the payload is empty or cannot be decoded.
    /// Serialization itself cannot fail on a valid decoded buffer.
    pub async fn convert(&self, source: &AudioData) -> Result<AudioData, DecodeError> {
        if source.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let decoded = self.decoder.decode(source.data()).await?;
        Ok(wav::encode_wav(&decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{AudioMimeType, DecodedAudio};
    use async_trait::async_trait;

    struct FixedDecoder {
        sample_rate: u32,
        samples: Vec<f32>,
    }

    #[async_trait]
    impl AudioDecoder for FixedDecoder {
        async fn decode(&self, _bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
            Ok(DecodedAudio::mono(self.sample_rate, self.samples.clone()))
        }
    }

    struct FailingDecoder;

    #[async_trait]
    impl AudioDecoder for FailingDecoder {
        async fn decode(&self, _bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
            Err(DecodeError::UnsupportedFormat("opus".to_string()))
        }
    }

    #[tokio::test]
    async fn convert_produces_canonical_wav() {
        let reencoder = WavReencoder::new(FixedDecoder {
            sample_rate: 16000,
            samples: vec![0.0, 0.5, -1.0],
        });

        let source = AudioData::new(vec![1, 2, 3], AudioMimeType::Webm);
        let wav = reencoder.convert(&source).await.unwrap();

        assert_eq!(wav.mime_type(), AudioMimeType::Wav);
        assert_eq!(wav.size_bytes(), 50);
        assert_eq!(&wav.data()[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn convert_rejects_empty_payload() {
        let reencoder = WavReencoder::new(FixedDecoder {
            sample_rate: 16000,
            samples: vec![0.0],
        });

        let source = AudioData::new(Vec::new(), AudioMimeType::Webm);
        let err = reencoder.convert(&source).await.unwrap_err();
        assert!(matches!(err, DecodeError::EmptyInput));
    }

    #[tokio::test]
    async fn convert_propagates_decoder_error() {
        let reencoder = WavReencoder::new(FailingDecoder);

        let source = AudioData::new(vec![0u8; 16], AudioMimeType::Webm);
        let err = reencoder.convert(&source).await.unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(_)));
    }
}
