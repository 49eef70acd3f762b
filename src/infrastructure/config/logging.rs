//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    pub const FORMATS: [&'static str; 2] = ["pretty", "json"];

    /// Filter directive after applying `-v` flags.
    ///
    /// `-v` raises the level to `info`, `-vv` and beyond to `debug`. The
    /// configured level is kept when it is already more verbose.
    #[must_use]
    pub fn effective_level(&self, verbose: u8) -> String {
        let requested = match verbose {
            0 => return self.level.clone(),
            1 => "info",
            _ => "debug",
        };
        match self.level.as_str() {
            "trace" => self.level.clone(),
            "debug" if requested == "info" => self.level.clone(),
            _ => requested.to_string(),
        }
    }

    /// Initialize the tracing subscriber.
    ///
    /// Logs go to stderr so stdout stays clean for tables and JSON.
    /// `RUST_LOG` overrides the configured level.
    pub fn init(&self, verbose: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level(verbose)));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        // A subscriber may already be installed (tests); keep it.
        let _ = result;
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
