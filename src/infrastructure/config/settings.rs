//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct. Every section has defaults, so an
//! empty file (or no file at all) is a valid configuration. The snapshot
//! path can be overridden with the `HKIPO_SNAPSHOT` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use hkipo::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     let policy = config.policy.odds_policy()?;
//!     println!("group A up to HKD {}", policy.group_threshold);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::policy::PolicyConfig;
use crate::domain::discount::DEFAULT_CNY_HKD_RATE;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `[source] snapshot`.
pub const SNAPSHOT_ENV: &str = "HKIPO_SNAPSHOT";

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub discount: DiscountConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// `[discount]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// CNY to HKD conversion rate.
    #[serde(
        default = "default_cny_hkd_rate",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub cny_hkd_rate: Decimal,
}

fn default_cny_hkd_rate() -> Decimal {
    DEFAULT_CNY_HKD_RATE
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            cny_hkd_rate: default_cny_hkd_rate(),
        }
    }
}

/// `[source]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Listing snapshot written by the upstream scraper.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            source,
            content: content.to_string(),
        })?;

        if let Ok(path) = std::env::var(SNAPSHOT_ENV) {
            if !path.trim().is_empty() {
                config.source.snapshot = Some(PathBuf::from(path));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Resolve the configuration for a CLI invocation.
    ///
    /// An explicit path must exist. Without one, `default_path` is loaded if
    /// present, otherwise built-in defaults apply. Returns the file actually
    /// read, if any.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    #[allow(clippy::result_large_err)]
    pub fn resolve(explicit: Option<&Path>, default_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        match explicit {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None if default_path.is_file() => {
                Ok((Self::load(default_path)?, Some(default_path.to_path_buf())))
            }
            None => Ok((Self::parse_toml("")?, None)),
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!(
                    "expected one of {}, got '{}'",
                    LoggingConfig::FORMATS.join(", "),
                    self.logging.format
                ),
            }
            .into());
        }

        self.policy.odds_policy()?;

        if self.policy.nominal_public_lots < 2 {
            return Err(ConfigError::InvalidValue {
                field: "nominal_public_lots",
                reason: "must be at least 2 to cover both groups".to_string(),
            }
            .into());
        }

        if self.discount.cny_hkd_rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "cny_hkd_rate",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
[policy]
group_threshold_hkd = 4000000
nominal_public_lots = 50000

[policy.model]
elasticity = 0.9

[discount]
cny_hkd_rate = 1.09

[source]
snapshot = "/var/lib/hkipo/ipos.json"
"#,
        )
        .unwrap();

        assert_eq!(config.policy.group_threshold_hkd, dec!(4000000));
        assert_eq!(config.policy.nominal_public_lots, 50_000);
        assert_eq!(config.policy.default_group_split, dec!(0.5));
        assert!((config.policy.model.elasticity - 0.9).abs() < f64::EPSILON);
        assert!((config.policy.model.dilution - 20.1).abs() < f64::EPSILON);
        assert_eq!(config.discount.cny_hkd_rate, dec!(1.09));
        assert_eq!(
            config.source.snapshot,
            Some(PathBuf::from("/var/lib/hkipo/ipos.json"))
        );
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let config: Config = toml::from_str("[logging]\nformat = \"xml\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_positive_fx_rate() {
        let config: Config = toml::from_str("[discount]\ncny_hkd_rate = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_single_lot_nominal_pool() {
        let config: Config = toml::from_str("[policy]\nnominal_public_lots = 1").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("nominal_public_lots"));
    }

    #[test]
    fn parse_error_keeps_content_for_diagnostics() {
        let err = toml::from_str::<Config>("[policy\n")
            .map_err(|source| ConfigError::Parse {
                source,
                content: "[policy\n".into(),
            })
            .unwrap_err();

        let ConfigError::Parse { content, .. } = err else {
            panic!("expected parse error");
        };
        assert_eq!(content, "[policy\n");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::resolve(
            Some(Path::new("/nonexistent/hkipo.toml")),
            Path::new("/nonexistent/default.toml"),
        );
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let (config, path) = Config::resolve(None, Path::new("/nonexistent/default.toml")).unwrap();
        assert_eq!(path, None);
        assert_eq!(config.policy, PolicyConfig::default());
    }
}
