//! Classification infrastructure module

mod http;

pub use http::HttpEmotionClassifier;
