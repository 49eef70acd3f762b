//! Miette-based error presentation.
//!
//! TOML parse failures are rendered with the offending span of the config
//! file; every other error is a single line on stderr.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use super::output;
use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(hkipo::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Diagnostic for a TOML parse failure, if the error carries a span.
    #[must_use]
    pub fn from_parse_error(source: &toml::de::Error, content: &str) -> Option<Self> {
        let span = source.span()?;
        Some(
            Self::new(
                format!("invalid configuration: {}", source.message()),
                content,
                span.start,
                span.end.saturating_sub(span.start),
            )
            .with_help("run `hkipo config show` to see every key with its default"),
        )
    }
}

/// Report a command failure on stderr.
pub fn report(err: &Error) {
    if !output::is_json() {
        if let Error::Config(ConfigError::Parse { source, content }) = err {
            if let Some(diagnostic) = ConfigDiagnostic::from_parse_error(source, content) {
                eprintln!("{:?}", miette::Report::new(diagnostic));
                return;
            }
        }
    }
    output::error(&err.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_points_at_offending_span() {
        let content = "[policy\ndefault_group_split = 0.5\n";
        let source = toml::from_str::<crate::infrastructure::config::Config>(content).unwrap_err();

        let diagnostic = ConfigDiagnostic::from_parse_error(&source, content).unwrap();
        assert!(diagnostic.span.offset() <= content.len());
        assert!(diagnostic.message.starts_with("invalid configuration"));
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn builder_sets_span() {
        let diagnostic = ConfigDiagnostic::new("bad", "abc", 1, 2);
        assert_eq!(diagnostic.span.offset(), 1);
        assert_eq!(diagnostic.span.len(), 2);
        assert!(diagnostic.help.is_none());
    }
}
