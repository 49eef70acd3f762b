//! Calibrated ballot curve.
//!
//! Approximates the Hong Kong board-lot ballot with a closed form:
//!
//! ```text
//! M    = 1 + (multiple - 1) * dilution          effective multiple
//! p    = clamp(1 / M, 0, 1)                     base block probability
//! P(n) = 1 - (1 - p)^(n^elasticity)             n < T
//! P(n) = 1                                      n >= T, T = min(ceil(M), pool + 1)
//! ```
//!
//! The default constants reproduce the published reference curve for a 38x
//! offering (0.134% / 1.11% / 11.4% at 1 / 10 / 135 lots) within 5%.

use super::super::error::DomainError;

/// Calibration constants of the ballot curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallotModel {
    /// Ratio of competing applications to the nominal multiple. Must be >= 1;
    /// a value of 1 gives the naive `1 / multiple` base rate.
    pub dilution: f64,
    /// Exponent applied to the requested lot count. Must lie in (0, 1].
    pub elasticity: f64,
}

impl BallotModel {
    pub const DEFAULT_DILUTION: f64 = 20.1;
    pub const DEFAULT_ELASTICITY: f64 = 0.92;

    /// Check calibration constants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` for out-of-range constants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.dilution.is_finite() || self.dilution < 1.0 {
            return Err(DomainError::invalid(
                "dilution",
                format!("must be a finite value >= 1, got {}", self.dilution),
            ));
        }
        if !self.elasticity.is_finite() || self.elasticity <= 0.0 || self.elasticity > 1.0 {
            return Err(DomainError::invalid(
                "elasticity",
                format!("must lie in (0, 1], got {}", self.elasticity),
            ));
        }
        Ok(())
    }
}

impl Default for BallotModel {
    fn default() -> Self {
        Self {
            dilution: Self::DEFAULT_DILUTION,
            elasticity: Self::DEFAULT_ELASTICITY,
        }
    }
}

/// Ballot curve for one oversubscription multiple.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BallotCurve {
    undersubscribed: bool,
    effective_multiple: f64,
    block_probability: f64,
    elasticity: f64,
}

impl BallotCurve {
    pub(crate) fn new(multiple: f64, model: &BallotModel) -> Self {
        if multiple <= 1.0 {
            return Self {
                undersubscribed: true,
                effective_multiple: 1.0,
                block_probability: 1.0,
                elasticity: model.elasticity,
            };
        }

        let effective_multiple = 1.0 + (multiple - 1.0) * model.dilution;
        Self {
            undersubscribed: false,
            effective_multiple,
            block_probability: (1.0 / effective_multiple).clamp(0.0, 1.0),
            elasticity: model.elasticity,
        }
    }

    #[cfg(test)]
    pub(crate) const fn block_probability(&self) -> f64 {
        self.block_probability
    }

    /// Smallest application guaranteed a lot.
    ///
    /// When the pro-rata threshold lies beyond the group pool, only an
    /// application exceeding the whole pool is guaranteed.
    pub(crate) fn guaranteed_threshold(&self, pool_lots: u64) -> u64 {
        if self.undersubscribed {
            return 1;
        }

        let threshold = self.effective_multiple.ceil();
        let capped = if threshold > pool_lots as f64 {
            pool_lots.saturating_add(1)
        } else {
            threshold as u64
        };
        capped.max(1)
    }

    /// Probability of winning at least one lot when applying for `lots`.
    pub(crate) fn win_probability(&self, lots: u64, threshold: u64) -> Result<f64, DomainError> {
        if self.undersubscribed || lots >= threshold {
            return Ok(1.0);
        }

        let draws = (lots as f64).powf(self.elasticity);
        let probability = -(draws * (-self.block_probability).ln_1p()).exp_m1();

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(DomainError::ComputationOverflow {
                lots,
                value: probability,
            });
        }
        Ok(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(multiple: f64) -> BallotCurve {
        BallotCurve::new(multiple, &BallotModel::default())
    }

    #[test]
    fn undersubscribed_curve_is_flat_at_one() {
        let curve = curve(0.8);
        assert_eq!(curve.guaranteed_threshold(1_000), 1);
        assert_eq!(curve.win_probability(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn curve_is_continuous_at_full_subscription() {
        let just_above = curve(1.0 + 1e-9);
        assert!(just_above.block_probability() > 0.999_999);
    }

    #[test]
    fn block_probability_never_exceeds_naive_rate() {
        for multiple in [1.5, 2.0, 38.0, 500.0, 1e6] {
            assert!(curve(multiple).block_probability() <= 1.0 / multiple);
        }
    }

    #[test]
    fn unit_dilution_gives_naive_rate() {
        let model = BallotModel {
            dilution: 1.0,
            elasticity: 1.0,
        };
        let curve = BallotCurve::new(38.0, &model);
        assert!((curve.block_probability() - 1.0 / 38.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_is_capped_by_pool() {
        let curve = curve(38.0);
        assert_eq!(curve.guaranteed_threshold(100_000), 745);
        assert_eq!(curve.guaranteed_threshold(745), 745);
        assert_eq!(curve.guaranteed_threshold(300), 301);
    }

    #[test]
    fn single_lot_pool_keeps_the_ballot() {
        let curve = curve(38.0);
        let threshold = curve.guaranteed_threshold(1);

        assert_eq!(threshold, 2);
        let p = curve.win_probability(1, threshold).unwrap();
        assert!(p <= 1.0 / 38.0);
        assert_eq!(curve.win_probability(2, threshold).unwrap(), 1.0);
    }

    #[test]
    fn extreme_multiple_stays_finite() {
        let curve = curve(1e12);
        let threshold = curve.guaranteed_threshold(u64::MAX);
        let p = curve.win_probability(1_000_000, threshold).unwrap();
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn validate_rejects_bad_constants() {
        let low_dilution = BallotModel {
            dilution: 0.5,
            ..BallotModel::default()
        };
        assert!(low_dilution.validate().is_err());

        let steep = BallotModel {
            elasticity: 1.5,
            ..BallotModel::default()
        };
        assert!(steep.validate().is_err());

        let nan = BallotModel {
            dilution: f64::NAN,
            ..BallotModel::default()
        };
        assert!(nan.validate().is_err());

        assert!(BallotModel::default().validate().is_ok());
    }
}
