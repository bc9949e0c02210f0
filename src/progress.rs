// src/progress.rs
//! Loading spinner using indicatif

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown on stderr while programs are loading
#[derive(Clone)]
pub struct LoadingSpinner {
    spinner: Option<ProgressBar>,
}

impl LoadingSpinner {
    /// Create a spinner; a disabled spinner is a no-op
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }

        Self {
            spinner: Some(spinner),
        }
    }

    /// Start spinning with a message
    pub fn start(&self, msg: impl Into<String>) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(msg.into());
            spinner.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Finish and clear the spinner
    pub fn finish(&self) {
        if let Some(ref spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Drop for LoadingSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}
