//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with symphonia, cpal, the prediction backend, and the
//! filesystem config store.

pub mod classification;
pub mod config;
pub mod decoding;
pub mod recording;

// Re-export adapters
pub use classification::HttpEmotionClassifier;
pub use config::XdgConfigStore;
pub use decoding::SymphoniaDecoder;
pub use recording::CpalRecorder;
