//! CLI presenter for output formatting

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::emotion::{ConfidenceBand, Prediction};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
        self.is_spinner_active.store(true, Ordering::SeqCst);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual prediction output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format recording progress bar
    pub fn format_progress(&self, elapsed_ms: u64, total_ms: u64) -> String {
        let elapsed_secs = elapsed_ms / 1000;
        let total_secs = total_ms / 1000;
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        format!(
            "[{}] {:>3}s / {}s",
            Self::bar(percent, 20),
            elapsed_secs,
            total_secs
        )
    }

    /// Update recording progress
    pub fn update_recording_progress(&self, elapsed_ms: u64, total_ms: u64) {
        let progress = self.format_progress(elapsed_ms, total_ms);
        self.update_spinner(&format!("Recording... {}", progress));
    }

    /// Render a prediction to stdout
    pub fn prediction(&self, prediction: &Prediction) {
        let emoji = prediction
            .emotion_kind()
            .map(|e| e.emoji())
            .unwrap_or_default();

        println!();
        println!(
            "  {} {}",
            emoji,
            prediction.emotion().bold().bright_green()
        );
        println!(
            "  [{}] {:.1}%  {}",
            Self::bar(prediction.confidence_percent(), 20),
            prediction.confidence_percent(),
            self.band_label(prediction.band())
        );

        if !prediction.ranked().is_empty() {
            println!();
            for score in prediction.ranked() {
                let percent = score.probability * 100.0;
                println!(
                    "  {:<10} [{}] {:>5.1}%",
                    score.label,
                    Self::bar(percent, 20),
                    percent
                );
            }
        }
        println!();
    }

    /// Colored label for a confidence band
    fn band_label(&self, band: ConfidenceBand) -> ColoredString {
        match band {
            ConfidenceBand::High => band.label().green(),
            ConfidenceBand::Medium => band.label().yellow(),
            ConfidenceBand::Low => band.label().red(),
        }
    }

    /// Build a fixed-width percentage bar
    fn bar(percent: f64, width: usize) -> String {
        let clamped = percent.clamp(0.0, 100.0);
        let filled = ((clamped / 100.0) * width as f64) as usize;
        format!(
            "{}{}",
            "█".repeat(filled).cyan(),
            "░".repeat(width - filled)
        )
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
