//! Emotion classification port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioData;
use crate::domain::emotion::Prediction;

/// Classification errors
#[derive(Debug, Clone, Error)]
pub enum ClassificationError {
    #[error("Could not connect to the prediction server at {0}. Please make sure the backend is running.")]
    ConnectionFailed(String),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API Error: {status} {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Prediction rejected: {0}")]
    Rejected(String),

    #[error("Failed to parse prediction response: {0}")]
    ParseError(String),

    #[error("Prediction response is missing the emotion or confidence field")]
    EmptyResponse,
}

/// Port for the external emotion prediction service
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Classify an audio payload.
    ///
    /// # Arguments
    /// * `audio` - The canonical audio container to submit
    ///
    /// # Returns
    /// The prediction (label, confidence, per-class probabilities) or an error
    async fn classify(&self, audio: &AudioData) -> Result<Prediction, ClassificationError>;
}
