//! HTTP emotion classifier adapter

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{ClassificationError, EmotionClassifier};
use crate::domain::audio::AudioData;
use crate::domain::emotion::{ClassScore, Prediction};

/// Path of the prediction route on the backend
const PREDICT_PATH: &str = "/predict";

/// Default connection attempt count
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Multipart field name the backend expects
const AUDIO_FIELD: &str = "audio";

/// Prediction response body.
///
/// Backends disagree on field spelling (`emotion` vs `predicted_emotion`,
/// `probabilities` vs `all_probabilities`); both are accepted.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    emotion: Option<String>,
    predicted_emotion: Option<String>,
    confidence: Option<f64>,
    probabilities: Option<HashMap<String, f64>>,
    all_probabilities: Option<HashMap<String, f64>>,
    error: Option<String>,
}

/// Emotion classifier backed by a SpeechSense prediction endpoint
pub struct HttpEmotionClassifier {
    endpoint: String,
    max_attempts: u32,
    client: reqwest::Client,
}

impl HttpEmotionClassifier {
    /// Create a classifier for the given endpoint base URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_max_attempts(endpoint, DEFAULT_MAX_ATTEMPTS)
    }

    /// Create a classifier with a custom connection attempt count
    pub fn with_max_attempts(endpoint: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            max_attempts: max_attempts.max(1),
            client: reqwest::Client::new(),
        }
    }

    /// Build the prediction URL
    fn predict_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), PREDICT_PATH)
    }

    /// Build the multipart form carrying the audio payload
    fn build_form(audio: &AudioData) -> Result<multipart::Form, ClassificationError> {
        let part = multipart::Part::bytes(audio.data().to_vec())
            .file_name(format!("recording.{}", audio.mime_type().extension()))
            .mime_str(audio.mime_type().as_str())
            .map_err(|e| ClassificationError::RequestFailed(e.to_string()))?;

        Ok(multipart::Form::new().part(AUDIO_FIELD, part))
    }

    /// Normalize a response body into a domain prediction
    fn into_prediction(response: PredictResponse) -> Result<Prediction, ClassificationError> {
        if let Some(message) = response.error {
            return Err(ClassificationError::Rejected(message));
        }

        let emotion = response
            .emotion
            .or(response.predicted_emotion)
            .ok_or(ClassificationError::EmptyResponse)?;

        let confidence = response
            .confidence
            .ok_or(ClassificationError::EmptyResponse)?;

        let scores = response
            .probabilities
            .or(response.all_probabilities)
            .unwrap_or_default()
            .into_iter()
            .map(|(label, probability)| ClassScore { label, probability })
            .collect();

        Ok(Prediction::new(emotion, confidence, scores))
    }
}

#[async_trait]
impl EmotionClassifier for HttpEmotionClassifier {
    async fn classify(&self, audio: &AudioData) -> Result<Prediction, ClassificationError> {
        let url = self.predict_url();

        // Only connection-level failures are retried; an HTTP error status
        // is an answer, not an outage.
        for attempt in 1..=self.max_attempts {
            let form = Self::build_form(audio)?;

            let response = match self.client.post(&url).multipart(form).send().await {
                Ok(response) => response,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    if attempt < self.max_attempts {
                        tokio::time::sleep(std::time::Duration::from_secs(attempt as u64)).await;
                        continue;
                    }
                    return Err(ClassificationError::ConnectionFailed(self.endpoint.clone()));
                }
                Err(e) => return Err(ClassificationError::RequestFailed(e.to_string())),
            };

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ClassificationError::HttpStatus {
                    status: status.as_u16(),
                    message,
                });
            }

            let body: PredictResponse = response
                .json()
                .await
                .map_err(|e| ClassificationError::ParseError(e.to_string()))?;

            return Self::into_prediction(body);
        }

        Err(ClassificationError::ConnectionFailed(self.endpoint.clone()))
    }
}
