//! Decoded audio buffer value object

/// Value object holding decoded, normalized audio.
///
/// One `f32` plane per channel, samples in [-1.0, 1.0], all planes the same
/// length. This is the common intermediate between arbitrary input codecs
/// and the canonical WAV container; decoders and the recorder produce it,
/// the WAV serializer consumes it, nothing mutates it in between.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    sample_rate: u32,
    planes: Vec<Vec<f32>>,
}

impl DecodedAudio {
    /// Create a buffer from per-channel sample planes.
    ///
    /// All planes must have equal length; producers guarantee this by
    /// construction (interleaved decode output, mono capture).
    pub fn new(sample_rate: u32, planes: Vec<Vec<f32>>) -> Self {
        debug_assert!(!planes.is_empty());
        debug_assert!(planes.windows(2).all(|w| w[0].len() == w[1].len()));
        Self {
            sample_rate,
            planes,
        }
    }

    /// Create a mono buffer from a single sample plane
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self::new(sample_rate, vec![samples])
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.planes.len()
    }

    /// Number of sample frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.planes.first().map_or(0, Vec::len)
    }

    /// Per-channel sample planes, in channel order
    pub fn planes(&self) -> &[Vec<f32>] {
        &self.planes
    }

    /// Duration of the buffer in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }
}
