//! Recording infrastructure module
//!
//! Cross-platform microphone capture using cpal. Captured audio is mixed
//! down to mono and resampled to 16kHz before it is handed back as a
//! decoded buffer; the WAV serialization happens downstream.

mod cpal_recorder;

pub use cpal_recorder::{CpalRecorder, CAPTURE_SAMPLE_RATE};
