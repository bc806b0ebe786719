//! Analyze audio use case

use thiserror::Error;

use crate::domain::audio::{wav, AudioData};
use crate::domain::emotion::Prediction;
use crate::domain::recording::Duration;

use super::ports::{
    AudioDecoder, AudioRecorder, ClassificationError, DecodeError, EmotionClassifier,
    ProgressCallback, RecordingError,
};
use super::reencode::WavReencoder;

/// Errors from the analyze use case
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Audio conversion failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Prediction failed: {0}")]
    Classification(#[from] ClassificationError),
}

/// Where the audio to analyze comes from
#[derive(Debug, Clone)]
pub enum AnalyzeSource {
    /// Capture from the microphone for a fixed duration
    Microphone { duration: Duration },
    /// An already-loaded compressed payload (file upload path)
    Upload { audio: AudioData },
}

/// Callbacks for progress and status updates
#[derive(Default)]
pub struct AnalyzeCallbacks {
    /// Called during recording with (elapsed_ms, total_ms)
    pub on_progress: Option<ProgressCallback>,
    /// Called when recording starts
    pub on_recording_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called once the canonical payload is ready, with its size
    pub on_audio_ready: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when classification starts
    pub on_classifying_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when classification ends
    pub on_classifying_end: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Output from the analyze use case
#[derive(Debug, Clone)]
pub struct AnalyzeOutput {
    /// The emotion prediction
    pub prediction: Prediction,
    /// Canonical payload size in human-readable form
    pub payload_size: String,
}

/// One-shot analysis use case: capture or convert, then classify.
///
/// Both sources funnel through the same canonical WAV serialization, so the
/// classifier only ever sees one wire format.
pub struct AnalyzeAudioUseCase<R, D, C>
where
    R: AudioRecorder,
    D: AudioDecoder,
    C: EmotionClassifier,
{
    recorder: R,
    reencoder: WavReencoder<D>,
    classifier: C,
}

impl<R, D, C> AnalyzeAudioUseCase<R, D, C>
where
    R: AudioRecorder,
    D: AudioDecoder,
    C: EmotionClassifier,
{
    /// Create a new use case instance
    pub fn new(recorder: R, decoder: D, classifier: C) -> Self {
        Self {
            recorder,
            reencoder: WavReencoder::new(decoder),
            classifier,
        }
    }

    /// Execute the analysis workflow
    pub async fn execute(
        &self,
        source: AnalyzeSource,
        callbacks: AnalyzeCallbacks,
    ) -> Result<AnalyzeOutput, AnalyzeError> {
        let payload = match source {
            AnalyzeSource::Microphone { duration } => {
                if let Some(ref cb) = callbacks.on_recording_start {
                    cb();
                }
                let captured = self
                    .recorder
                    .record(duration, callbacks.on_progress.clone())
                    .await?;
                wav::encode_wav(&captured)
            }
            AnalyzeSource::Upload { audio } => self.reencoder.convert(&audio).await?,
        };

        let payload_size = payload.human_readable_size();
        if let Some(ref cb) = callbacks.on_audio_ready {
            cb(&payload_size);
        }

        if let Some(ref cb) = callbacks.on_classifying_start {
            cb();
        }

        let prediction = self.classifier.classify(&payload).await?;

        if let Some(ref cb) = callbacks.on_classifying_end {
            cb();
        }

        Ok(AnalyzeOutput {
            prediction,
            payload_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{AudioMimeType, DecodedAudio};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    // Mock implementations for testing
    struct MockRecorder;

    #[async_trait]
    impl AudioRecorder for MockRecorder {
        async fn record(
            &self,
            _duration: Duration,
            _on_progress: Option<ProgressCallback>,
        ) -> Result<DecodedAudio, RecordingError> {
            Ok(DecodedAudio::mono(16000, vec![0.0; 160]))
        }
    }

    struct MockDecoder;

    #[async_trait]
    impl AudioDecoder for MockDecoder {
        async fn decode(&self, _bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
            Ok(DecodedAudio::mono(16000, vec![0.5; 32]))
        }
    }

    struct MockClassifier {
        saw_wav: Arc<AtomicBool>,
    }

    #[async_trait]
    impl EmotionClassifier for MockClassifier {
        async fn classify(&self, audio: &AudioData) -> Result<Prediction, ClassificationError> {
            if audio.mime_type() == AudioMimeType::Wav && audio.data().starts_with(b"RIFF") {
                self.saw_wav.store(true, Ordering::SeqCst);
            }
            Ok(Prediction::new("Happy", 0.9, Vec::new()))
        }
    }

    fn use_case_with_flag() -> (
        AnalyzeAudioUseCase<MockRecorder, MockDecoder, MockClassifier>,
        Arc<AtomicBool>,
    ) {
        let saw_wav = Arc::new(AtomicBool::new(false));
        let use_case = AnalyzeAudioUseCase::new(
            MockRecorder,
            MockDecoder,
            MockClassifier {
                saw_wav: Arc::clone(&saw_wav),
            },
        );
        (use_case, saw_wav)
    }

    #[tokio::test]
    async fn microphone_source_classifies_canonical_wav() {
        let (use_case, saw_wav) = use_case_with_flag();

        let output = use_case
            .execute(
                AnalyzeSource::Microphone {
                    duration: Duration::from_secs(1),
                },
                AnalyzeCallbacks::default(),
            )
            .await
            .unwrap();

        assert_eq!(output.prediction.emotion(), "Happy");
        assert!(saw_wav.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn upload_source_classifies_canonical_wav() {
        let (use_case, saw_wav) = use_case_with_flag();

        let source = AnalyzeSource::Upload {
            audio: AudioData::new(vec![0u8; 64], AudioMimeType::Ogg),
        };
        let output = use_case
            .execute(source, AnalyzeCallbacks::default())
            .await
            .unwrap();

        assert!(saw_wav.load(Ordering::SeqCst));
        assert!(!output.payload_size.is_empty());
    }

    #[tokio::test]
    async fn empty_upload_fails_before_classification() {
        let (use_case, saw_wav) = use_case_with_flag();

        let source = AnalyzeSource::Upload {
            audio: AudioData::new(Vec::new(), AudioMimeType::Ogg),
        };
        let err = use_case
            .execute(source, AnalyzeCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzeError::Decode(DecodeError::EmptyInput)));
        assert!(!saw_wav.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn callbacks_fire_in_order() {
        let (use_case, _) = use_case_with_flag();

        let recording_started = Arc::new(AtomicBool::new(false));
        let audio_ready = Arc::new(AtomicBool::new(false));
        let classify_started = Arc::new(AtomicBool::new(false));
        let classify_ended = Arc::new(AtomicBool::new(false));

        let callbacks = AnalyzeCallbacks {
            on_progress: None,
            on_recording_start: Some(Box::new({
                let flag = Arc::clone(&recording_started);
                move || flag.store(true, Ordering::SeqCst)
            })),
            on_audio_ready: Some(Box::new({
                let flag = Arc::clone(&audio_ready);
                move |size: &str| {
                    assert!(!size.is_empty());
                    flag.store(true, Ordering::SeqCst)
                }
            })),
            on_classifying_start: Some(Box::new({
                let flag = Arc::clone(&classify_started);
                move || flag.store(true, Ordering::SeqCst)
            })),
            on_classifying_end: Some(Box::new({
                let flag = Arc::clone(&classify_ended);
                move || flag.store(true, Ordering::SeqCst)
            })),
        };

        use_case
            .execute(
                AnalyzeSource::Microphone {
                    duration: Duration::from_secs(1),
                },
                callbacks,
            )
            .await
            .unwrap();

        assert!(recording_started.load(Ordering::SeqCst));
        assert!(audio_ready.load(Ordering::SeqCst));
        assert!(classify_started.load(Ordering::SeqCst));
        assert!(classify_ended.load(Ordering::SeqCst));
    }
}
