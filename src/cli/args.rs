//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::recording::Duration;

/// SpeechSense - speech emotion recognition from your terminal
#[derive(Parser, Debug)]
#[command(name = "speech-sense")]
#[command(version = "0.1.0")]
#[command(about = "Speech emotion recognition from the microphone or an audio file")]
#[command(long_about = None)]
pub struct Cli {
    /// Audio file to analyze (.wav, .mp3, .webm, .ogg, .m4a, .flac, .mp4).
    /// Records from the microphone when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Recording duration (e.g., 10s, 1m, 2m30s)
    #[arg(short = 'd', long, value_name = "TIME", conflicts_with = "file")]
    pub duration: Option<String>,

    /// Prediction endpoint base URL
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Connection attempts before giving up
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Print the prediction as JSON instead of the formatted report
    #[arg(long)]
    pub json: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed analysis options
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub file: Option<PathBuf>,
    pub duration: Duration,
    pub endpoint: String,
    pub retries: u32,
    pub json: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "duration", "retries"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["speech-sense"]);
        assert!(cli.file.is_none());
        assert!(cli.duration.is_none());
        assert!(cli.endpoint.is_none());
        assert!(cli.retries.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn cli_parses_file() {
        let cli = Cli::parse_from(["speech-sense", "clip.wav"]);
        assert_eq!(cli.file, Some(PathBuf::from("clip.wav")));
    }

    #[test]
    fn cli_parses_duration() {
        let cli = Cli::parse_from(["speech-sense", "-d", "30s"]);
        assert_eq!(cli.duration, Some("30s".to_string()));
    }

    #[test]
    fn cli_rejects_duration_with_file() {
        assert!(Cli::try_parse_from(["speech-sense", "clip.wav", "-d", "30s"]).is_err());
    }

    #[test]
    fn cli_parses_endpoint() {
        let cli = Cli::parse_from(["speech-sense", "-e", "http://remote:8000"]);
        assert_eq!(cli.endpoint, Some("http://remote:8000".to_string()));
    }

    #[test]
    fn cli_parses_json_flag() {
        let cli = Cli::parse_from(["speech-sense", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn cli_parses_retries() {
        let cli = Cli::parse_from(["speech-sense", "--retries", "5"]);
        assert_eq!(cli.retries, Some(5));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["speech-sense", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["speech-sense", "config", "set", "endpoint", "http://x:1"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "endpoint");
            assert_eq!(value, "http://x:1");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("endpoint"));
        assert!(is_valid_config_key("duration"));
        assert!(is_valid_config_key("retries"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
