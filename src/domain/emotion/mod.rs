//! Emotion domain module

mod label;
mod prediction;

pub use label::{Emotion, ALL_EMOTIONS};
pub use prediction::{ClassScore, ConfidenceBand, Prediction};
