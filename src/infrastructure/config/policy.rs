//! Odds policy configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::odds::{BallotModel, OddsPolicy};
use crate::domain::offering::GroupSplit;
use crate::domain::DomainError;
use crate::error::ConfigError;

/// `[policy]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Application value (HKD) at or below which an applicant is in group A.
    #[serde(
        default = "default_group_threshold",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub group_threshold_hkd: Decimal,
    /// Group A's share of the public tranche when the offering does not
    /// publish one.
    #[serde(
        default = "default_group_split",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub default_group_split: Decimal,
    /// Public tranche assumed by `odds` when neither `--lots-offered` nor
    /// `--public-lots` is given.
    #[serde(default = "default_nominal_public_lots")]
    pub nominal_public_lots: u64,
    #[serde(default)]
    pub model: ModelConfig,
}

/// `[policy.model]` section: ballot curve constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub dilution: f64,
    pub elasticity: f64,
}

fn default_group_threshold() -> Decimal {
    OddsPolicy::DEFAULT_GROUP_THRESHOLD
}

fn default_group_split() -> Decimal {
    GroupSplit::default().ratio()
}

const fn default_nominal_public_lots() -> u64 {
    100_000
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            group_threshold_hkd: default_group_threshold(),
            default_group_split: default_group_split(),
            nominal_public_lots: default_nominal_public_lots(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dilution: BallotModel::DEFAULT_DILUTION,
            elasticity: BallotModel::DEFAULT_ELASTICITY,
        }
    }
}

impl From<ModelConfig> for BallotModel {
    fn from(config: ModelConfig) -> Self {
        Self {
            dilution: config.dilution,
            elasticity: config.elasticity,
        }
    }
}

impl PolicyConfig {
    /// Build the policy passed into every odds computation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn odds_policy(&self) -> Result<OddsPolicy, ConfigError> {
        let default_split =
            GroupSplit::try_new(self.default_group_split).map_err(invalid_value)?;
        let policy = OddsPolicy {
            group_threshold: self.group_threshold_hkd,
            default_split,
            model: self.model.into(),
        };
        policy.validate().map_err(invalid_value)?;
        Ok(policy)
    }
}

fn invalid_value(err: DomainError) -> ConfigError {
    match err {
        DomainError::InvalidParameter { field, reason } => ConfigError::InvalidValue {
            field,
            reason,
        },
        other => ConfigError::InvalidValue {
            field: "policy",
            reason: other.to_string(),
        },
    }
}
