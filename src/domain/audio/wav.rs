//! Canonical WAV container serialization
//!
//! Serializes a [`DecodedAudio`] buffer into a 16-bit linear-PCM WAV byte
//! sequence: a fixed 44-byte header followed by interleaved, quantized
//! samples. Every payload the prediction backend receives goes through this
//! one format, regardless of which codec produced the source audio.
//!
//! Output length is always `44 + frames * channels * 2`, and the declared
//! data-chunk length equals the payload length exactly. All multi-byte
//! fields are little-endian.

use super::audio_data::{AudioData, AudioMimeType};
use super::decoded::DecodedAudio;

/// Fixed size of the RIFF/fmt/data header
pub const HEADER_LEN: usize = 44;

/// Bits per sample in the canonical container
const BITS_PER_SAMPLE: u16 = 16;

/// Serialize a decoded buffer into the canonical WAV container.
///
/// Deterministic: the same buffer always yields the same bytes. Allocates
/// one output buffer per call and holds no state across calls.
pub fn encode_wav(audio: &DecodedAudio) -> AudioData {
    let channels = audio.channel_count() as u32;
    let frames = audio.frames() as u32;
    let data_len = frames * channels * 2;
    let total_len = HEADER_LEN as u32 + data_len;

    let mut w = WavWriter::with_capacity(total_len as usize);

    w.tag(b"RIFF");
    w.u32(total_len - 8);
    w.tag(b"WAVE");

    w.tag(b"fmt ");
    w.u32(16);
    w.u16(1); // linear PCM
    w.u16(channels as u16);
    w.u32(audio.sample_rate());
    w.u32(audio.sample_rate() * 2 * channels); // bytes per second
    w.u16((channels * 2) as u16); // block align
    w.u16(BITS_PER_SAMPLE);

    w.tag(b"data");
    w.u32(data_len);

    for frame in 0..audio.frames() {
        for plane in audio.planes() {
            w.i16(quantize(plane[frame]));
        }
    }

    AudioData::new(w.into_bytes(), AudioMimeType::Wav)
}

/// Map a normalized float sample to a signed 16-bit PCM value.
///
/// Clamps to [-1.0, 1.0] first, then applies an asymmetric scale: 32768
/// when `0.5 + s` is negative, 32767 otherwise, truncating toward zero.
/// Downstream consumers depend on these exact bytes; the boundary placement
/// is intentional and must not be moved.
fn quantize(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    let scaled = if 0.5 + s < 0.0 {
        s * 32768.0
    } else {
        s * 32767.0
    };
    scaled as i16
}

/// Little-endian cursor over a growable byte buffer.
struct WavWriter {
    buf: Vec<u8>,
}

impl WavWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn tag(&mut self, tag: &[u8; 4]) {
        self.buf.extend_from_slice(tag);
    }

    fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
