//! SpeechSense - speech emotion recognition CLI
//!
//! This crate provides the core functionality for capturing or loading audio,
//! re-encoding it into a canonical 16-bit PCM WAV container, and classifying
//! it against a SpeechSense prediction backend.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, and errors (including
//!   the WAV serialization the whole pipeline funnels through)
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (symphonia, cpal, HTTP, config)
//! - **CLI**: Command-line interface, argument parsing, and result rendering

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
