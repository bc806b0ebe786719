//! Prediction result value object

use serde::Serialize;

use super::label::Emotion;

/// Confidence banding used when rendering a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Band thresholds: >= 75% high, >= 50% medium, else low
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.75 {
            Self::High
        } else if confidence >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Get the display label for this band
    pub const fn label(&self) -> &'static str {
        match self {
            Self::High => "High Confidence",
            Self::Medium => "Medium Confidence",
            Self::Low => "Low Confidence",
        }
    }
}

/// One entry of the per-class probability map
#[derive(Debug, Clone, Serialize)]
pub struct ClassScore {
    pub label: String,
    pub probability: f64,
}

/// Value object representing one emotion prediction returned by the backend.
///
/// The class scores are kept sorted by descending probability; the label is
/// kept as the backend sent it so unknown classes still render, with
/// [`Prediction::emotion_kind`] giving the typed view when the label is one
/// of the known eight.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    emotion: String,
    confidence: f64,
    scores: Vec<ClassScore>,
}

impl Prediction {
    /// Create a prediction, ranking the class scores by probability
    pub fn new(emotion: impl Into<String>, confidence: f64, mut scores: Vec<ClassScore>) -> Self {
        scores.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            emotion: emotion.into(),
            confidence,
            scores,
        }
    }

    /// The predicted emotion label, as sent by the backend
    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    /// The predicted emotion as a typed label, when it is a known class
    pub fn emotion_kind(&self) -> Option<Emotion> {
        self.emotion.parse().ok()
    }

    /// Confidence in [0, 1]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Confidence as a percentage
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }

    /// Confidence band for rendering
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }

    /// Class scores, highest probability first
    pub fn ranked(&self) -> &[ClassScore] {
        &self.scores
    }
}
