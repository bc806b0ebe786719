//! Symphonia decoder adapter
//!
//! Decodes whatever container/codec the enabled symphonia features support
//! (WAV, MP3, FLAC, Ogg/Vorbis, AAC/MP4, WebM containers) into per-channel
//! float planes. A codec outside that set surfaces as a decode error, which
//! is the contract: callers only care that the bytes could not become a
//! decoded buffer in this runtime.

use std::io::Cursor;

use async_trait::async_trait;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioDecoder, DecodeError};
use crate::domain::audio::DecodedAudio;

/// Audio decoder backed by symphonia
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    /// Create a new decoder adapter
    pub fn new() -> Self {
        Self
    }

    /// Decode an owned byte buffer to per-channel planes.
    ///
    /// Synchronous and CPU-bound; the port implementation runs it on the
    /// blocking pool.
    fn decode_bytes(bytes: Vec<u8>) -> Result<DecodedAudio, DecodeError> {
        let stream = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        let probed = symphonia::default::get_probe()
            .format(
                &Hint::new(),
                stream,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| match e {
                SymphoniaError::Unsupported(what) => {
                    DecodeError::UnsupportedFormat(what.to_string())
                }
                other => DecodeError::DecodeFailed(other.to_string()),
            })?;

        let mut format = probed.format;
        let track = format.default_track().ok_or(DecodeError::NoAudioTrack)?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| match e {
                SymphoniaError::Unsupported(what) => {
                    DecodeError::UnsupportedFormat(what.to_string())
                }
                other => DecodeError::DecodeFailed(other.to_string()),
            })?;

        let mut planes: Vec<Vec<f32>> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break; // end of stream
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(DecodeError::DecodeFailed(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                // A corrupt frame mid-stream is skippable; the stream may
                // still yield usable audio.
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(e) => return Err(DecodeError::DecodeFailed(e.to_string())),
            };

            let spec = *decoded.spec();
            let channels = spec.channels.count();
            if sample_rate.is_none() {
                sample_rate = Some(spec.rate);
            }
            if planes.is_empty() {
                planes = vec![Vec::new(); channels];
            }
            if planes.len() != channels {
                return Err(DecodeError::DecodeFailed(
                    "channel count changed mid-stream".to_string(),
                ));
            }

            let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            buffer.copy_interleaved_ref(decoded);

            for frame in buffer.samples().chunks_exact(channels) {
                for (plane, &sample) in planes.iter_mut().zip(frame) {
                    plane.push(sample);
                }
            }
        }

        if planes.first().map_or(true, |plane| plane.is_empty()) {
            return Err(DecodeError::DecodeFailed(
                "no audio frames decoded".to_string(),
            ));
        }

        let rate = sample_rate
            .ok_or_else(|| DecodeError::DecodeFailed("unknown sample rate".to_string()))?;

        Ok(DecodedAudio::new(rate, planes))
    }
}

impl Default for SymphoniaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioDecoder for SymphoniaDecoder {
    async fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        // Decode on the blocking pool; a fresh decoder is built per call and
        // dropped with it, nothing persists across conversions.
        let owned = bytes.to_vec();
        tokio::task::spawn_blocking(move || Self::decode_bytes(owned))
            .await
            .map_err(|e| DecodeError::DecodeFailed(format!("decode task error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{wav, DecodedAudio as Buffer};

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let decoder = SymphoniaDecoder::new();
        let err = decoder.decode(&[]).await.unwrap_err();
        assert!(matches!(err, DecodeError::EmptyInput));
    }

    #[tokio::test]
    async fn garbage_input_fails_to_decode() {
        let decoder = SymphoniaDecoder::new();
        let err = decoder.decode(&[0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn decodes_canonical_wav() {
        let samples: Vec<f32> = (0..1600)
            .map(|i| f32::sin(2.0 * std::f32::consts::PI * 440.0 * i as f32 / 16000.0) * 0.5)
            .collect();
        let encoded = wav::encode_wav(&Buffer::mono(16000, samples.clone()));

        let decoder = SymphoniaDecoder::new();
        let decoded = decoder.decode(encoded.data()).await.unwrap();

        assert_eq!(decoded.sample_rate(), 16000);
        assert_eq!(decoded.channel_count(), 1);
        assert_eq!(decoded.frames(), samples.len());

        // 16-bit quantization bounds the round-trip error
        for (original, roundtrip) in samples.iter().zip(&decoded.planes()[0]) {
            assert!((original - roundtrip).abs() < 1.0 / 16384.0);
        }
    }
}
