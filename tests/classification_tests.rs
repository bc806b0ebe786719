//! Classifier integration tests against a mock prediction backend

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use speech_sense::application::ports::{ClassificationError, EmotionClassifier};
use speech_sense::domain::audio::{wav, DecodedAudio};
use speech_sense::infrastructure::HttpEmotionClassifier;

/// A tiny canonical WAV payload to submit
fn test_audio() -> speech_sense::domain::audio::AudioData {
    wav::encode_wav(&DecodedAudio::mono(16000, vec![0.0, 0.5, -0.5, 0.25]))
}

#[tokio::test]
async fn classify_parses_backend_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "emotion": "Happy",
            "confidence": 0.87,
            "probabilities": {
                "Happy": 0.87,
                "Sad": 0.08,
                "Neutral": 0.05
            }
        })))
        .mount(&server)
        .await;

    let classifier = HttpEmotionClassifier::new(server.uri());
    let prediction = classifier.classify(&test_audio()).await.unwrap();

    assert_eq!(prediction.emotion(), "Happy");
    assert!((prediction.confidence() - 0.87).abs() < 1e-9);
    assert_eq!(prediction.ranked().len(), 3);
    assert_eq!(prediction.ranked()[0].label, "Happy");
}

#[tokio::test]
async fn classify_accepts_alternate_field_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_emotion": "Calm",
            "confidence": 0.42,
            "all_probabilities": { "Calm": 0.42, "Neutral": 0.38 }
        })))
        .mount(&server)
        .await;

    let classifier = HttpEmotionClassifier::new(server.uri());
    let prediction = classifier.classify(&test_audio()).await.unwrap();

    assert_eq!(prediction.emotion(), "Calm");
    assert_eq!(prediction.ranked().len(), 2);
}

#[tokio::test]
async fn classify_submits_multipart_audio_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "emotion": "Neutral",
            "confidence": 0.5,
            "probabilities": {}
        })))
        .mount(&server)
        .await;

    let classifier = HttpEmotionClassifier::new(server.uri());
    classifier.classify(&test_audio()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .expect("multipart content type")
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"audio\""));
    assert!(body.contains("filename=\"recording.wav\""));
}

#[tokio::test]
async fn classify_maps_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let classifier = HttpEmotionClassifier::new(server.uri());
    let err = classifier.classify(&test_audio()).await.unwrap_err();

    match err {
        ClassificationError::HttpStatus { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("model not loaded"));
        }
        other => panic!("Expected HttpStatus error, got: {:?}", other),
    }
}

#[tokio::test]
async fn classify_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let classifier = HttpEmotionClassifier::new(server.uri());
    let err = classifier.classify(&test_audio()).await.unwrap_err();
    assert!(matches!(err, ClassificationError::ParseError(_)));
}

#[tokio::test]
async fn classify_rejects_incomplete_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "probabilities": { "Happy": 1.0 }
        })))
        .mount(&server)
        .await;

    let classifier = HttpEmotionClassifier::new(server.uri());
    let err = classifier.classify(&test_audio()).await.unwrap_err();
    assert!(matches!(err, ClassificationError::EmptyResponse));
}

#[tokio::test]
async fn classify_surfaces_backend_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "no audio provided"
        })))
        .mount(&server)
        .await;

    let classifier = HttpEmotionClassifier::new(server.uri());
    let err = classifier.classify(&test_audio()).await.unwrap_err();

    match err {
        ClassificationError::Rejected(message) => assert!(message.contains("no audio")),
        other => panic!("Expected Rejected error, got: {:?}", other),
    }
}

#[tokio::test]
async fn classify_reports_connection_failure() {
    // Port 1 is never listening; a single attempt keeps the test fast
    let classifier = HttpEmotionClassifier::with_max_attempts("http://127.0.0.1:1", 1);
    let err = classifier.classify(&test_audio()).await.unwrap_err();

    match err {
        ClassificationError::ConnectionFailed(endpoint) => {
            assert!(endpoint.contains("127.0.0.1:1"));
        }
        other => panic!("Expected ConnectionFailed error, got: {:?}", other),
    }
}
