//! Terminal output formatting.
//!
//! Human-readable output goes to stdout with colored symbols and aligned
//! fields. In JSON mode each command prints exactly one JSON document on
//! stdout and the decorative helpers stay silent, so the output can be piped
//! straight into `jq`. Errors always go to stderr.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::Result;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Decorative output is dropped in JSON and quiet mode.
fn decoration_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Return whether quiet mode is enabled.
#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print a section header.
pub fn section(title: &str) {
    if decoration_suppressed(read_config()) {
        return;
    }

    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if decoration_suppressed(read_config()) {
        return;
    }

    let label = format!("{label:<16}");
    println!(
        "  {} {}",
        label.if_supports_color(Stream::Stdout, |l| l.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    if decoration_suppressed(read_config()) {
        return;
    }

    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |s| s.green()),
        message
    );
}

/// Print a warning line on stderr.
pub fn warning(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({
                "type": "warning",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!(
        "  {} {}",
        "⚠".if_supports_color(Stream::Stderr, |s| s.yellow()),
        message
    );
}

/// Print an error line on stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!(
        "  {} {}",
        "×".if_supports_color(Stream::Stderr, |s| s.red()),
        message
    );
}

/// Print a note/hint.
pub fn note(message: &str) {
    if decoration_suppressed(read_config()) {
        return;
    }

    println!(
        "  {} {}",
        "→".if_supports_color(Stream::Stdout, |s| s.cyan()),
        message
    );
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", value.if_supports_color(Stream::Stdout, |v| v.cyan()))
}

/// Format a positive value in green.
pub fn positive(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", value.if_supports_color(Stream::Stdout, |v| v.green()))
}

/// Format a negative value in red.
pub fn negative(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", value.if_supports_color(Stream::Stdout, |v| v.red()))
}

/// Format a dimmed value.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", value.if_supports_color(Stream::Stdout, |v| v.dimmed()))
}

/// Print rows as an indented table.
///
/// Tables are primary output and are printed in quiet mode too.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let mut table = Table::new(rows);
    table.with(Style::sharp());

    println!();
    for line in table.to_string().lines() {
        println!("  {line}");
    }
}

/// Print a value as a single pretty JSON document on stdout.
pub fn document<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
