//! Main app runner for one-shot analysis

use std::env;
use std::path::Path;
use std::process::ExitCode;

use crate::application::{AnalyzeAudioUseCase, AnalyzeCallbacks, AnalyzeSource};
use crate::domain::audio::{AudioData, AudioMimeType};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    CpalRecorder, HttpEmotionClassifier, SymphoniaDecoder, XdgConfigStore,
};

use super::args::AnalyzeOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the prediction endpoint
pub const ENDPOINT_ENV: &str = "SPEECH_SENSE_ENDPOINT";

/// Run a one-shot analysis
pub async fn run_analyze(options: AnalyzeOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Resolve the audio source before touching any device or socket
    let source = match options.file {
        Some(ref path) => match load_upload(path).await {
            Ok(audio) => AnalyzeSource::Upload { audio },
            Err(message) => {
                presenter.error(&message);
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => AnalyzeSource::Microphone {
            duration: options.duration,
        },
    };

    // Create adapters
    let recorder = CpalRecorder::new();
    let decoder = SymphoniaDecoder::new();
    let classifier =
        HttpEmotionClassifier::with_max_attempts(options.endpoint.clone(), options.retries);

    // Create use case
    let use_case = AnalyzeAudioUseCase::new(recorder, decoder, classifier);

    let duration = options.duration;
    let callbacks = AnalyzeCallbacks {
        on_progress: None,
        on_recording_start: Some(Box::new(move || {
            eprintln!("⠋ Recording for {}...", duration);
        })),
        on_audio_ready: Some(Box::new(|size: &str| {
            eprintln!("✓ Audio ready ({})", size);
        })),
        on_classifying_start: Some(Box::new(|| {
            eprintln!("⠋ Analyzing...");
        })),
        on_classifying_end: Some(Box::new(|| {
            eprintln!("✓ Analysis complete");
        })),
    };

    match use_case.execute(source, callbacks).await {
        Ok(output) => {
            if options.json {
                presenter.output(&prediction_json(&output.prediction));
            } else {
                presenter.prediction(&output.prediction);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and validate an audio file for the upload path
async fn load_upload(path: &Path) -> Result<AudioData, String> {
    let mime = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .and_then(|ext| AudioMimeType::from_extension(&ext))
        .ok_or_else(|| {
            format!(
                "Unsupported file type: {} (expected .wav, .mp3, .webm, .ogg, .m4a, .flac, or .mp4)",
                path.display()
            )
        })?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    Ok(AudioData::new(bytes, mime))
}

/// Render a prediction as the backend-shaped JSON object
fn prediction_json(prediction: &crate::domain::emotion::Prediction) -> String {
    let probabilities: serde_json::Map<String, serde_json::Value> = prediction
        .ranked()
        .iter()
        .map(|score| (score.label.clone(), serde_json::Value::from(score.probability)))
        .collect();

    let body = serde_json::json!({
        "emotion": prediction.emotion(),
        "confidence": prediction.confidence(),
        "probabilities": probabilities,
    });

    serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    use crate::application::ports::ConfigStore;

    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        endpoint: env::var(ENDPOINT_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
