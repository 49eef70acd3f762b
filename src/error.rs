use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
        /// Raw file content, kept for diagnostics.
        content: String,
    },
}

/// Listing source errors. Raised by adapters, never by the domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("no listing found for code {code}")]
    NotFound { code: String },

    #[error("{source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("listing {code} has malformed {field}: {reason}")]
    Malformed {
        code: String,
        field: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// - `2` invalid parameters or configuration
    /// - `3` listing source failures
    /// - `1` anything else
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Domain(DomainError::InvalidParameter { .. }) => 2,
            Self::Source(_) => 3,
            Self::Domain(DomainError::ComputationOverflow { .. }) | Self::Json(_) | Self::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
