//! Allocation odds simulator.
//!
//! Reproduces the tiered board-lot ballot of a Hong Kong public offering.
//! Given an [`OfferingParameters`] and a list of requested lot counts it
//! returns an [`AllocationOddsTable`] with the probability of winning at
//! least one lot at each tier.
//!
//! The computation is pure: no I/O, no logging, no randomness. Identical
//! inputs always produce identical tables.
//!
//! # Example
//!
//! ```
//! use hkipo::domain::odds::{compute_odds, OddsPolicy};
//! use hkipo::domain::offering::OfferingParameters;
//! use rust_decimal_macros::dec;
//!
//! let offering = OfferingParameters::builder()
//!     .total_lots_offered(20_000)
//!     .oversubscription_multiple(dec!(38))
//!     .board_lot_price(dec!(36865))
//!     .build()
//!     .unwrap();
//!
//! let table = compute_odds(&offering, &[1, 10, 135], &OddsPolicy::default()).unwrap();
//! assert_eq!(table.len(), 3);
//! ```

mod model;
mod table;
mod tiers;

pub use model::BallotModel;
pub use table::{AllocationOddsRow, AllocationOddsTable, GroupPool};
pub use tiers::canonical_tiers;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::error::DomainError;
use super::group::{Group, SubscriptionRequest};
use super::offering::{GroupSplit, OfferingParameters};
use model::BallotCurve;

/// Decimal places kept in `win_probability_percent`.
const PERCENT_SCALE: u32 = 4;

/// Policy constants passed explicitly into every computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OddsPolicy {
    /// Application value (HKD) separating group A from group B.
    pub group_threshold: Decimal,
    /// Split used when the offering does not publish one.
    pub default_split: GroupSplit,
    pub model: BallotModel,
}

impl OddsPolicy {
    /// Conventional HKD 5,000,000 group threshold.
    pub const DEFAULT_GROUP_THRESHOLD: Decimal = Decimal::from_parts(5_000_000, 0, 0, false, 0);

    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` for a non-positive threshold
    /// or invalid model constants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.group_threshold <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "group_threshold",
                format!("must be positive, got {}", self.group_threshold),
            ));
        }
        self.model.validate()
    }
}

impl Default for OddsPolicy {
    fn default() -> Self {
        Self {
            group_threshold: Self::DEFAULT_GROUP_THRESHOLD,
            default_split: GroupSplit::default(),
            model: BallotModel::default(),
        }
    }
}

/// Compute the odds table for `tiers`.
///
/// Tiers may be given in any order and may repeat; the table holds one row
/// per distinct tier in ascending lot order. Validation happens before any
/// row is computed.
///
/// # Errors
///
/// - `DomainError::InvalidParameter` when `tiers` is empty, contains a zero,
///   or the policy is invalid.
/// - `DomainError::ComputationOverflow` if a probability escapes [0, 1].
pub fn compute_odds(
    offering: &OfferingParameters,
    tiers: &[u64],
    policy: &OddsPolicy,
) -> Result<AllocationOddsTable, DomainError> {
    policy.validate()?;
    if tiers.is_empty() {
        return Err(DomainError::invalid("tiers", "at least one tier is required"));
    }
    if let Some(index) = tiers.iter().position(|&lots| lots == 0) {
        return Err(DomainError::invalid(
            "tiers",
            format!("tier #{} must be a positive lot count, got 0", index + 1),
        ));
    }

    let multiple = offering
        .oversubscription_multiple()
        .to_f64()
        .ok_or_else(|| {
            DomainError::invalid(
                "oversubscription_multiple",
                "is not representable as a finite number",
            )
        })?;

    let curve = BallotCurve::new(multiple, &policy.model);
    let pools = offering.group_pools(policy.default_split);
    let group_pools: Vec<GroupPool> = Group::ALL
        .iter()
        .map(|&group| {
            let lots = pools.lots(group);
            GroupPool {
                group,
                lots,
                guaranteed_threshold: curve.guaranteed_threshold(lots),
            }
        })
        .collect();

    let mut ordered = tiers.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let mut rows = Vec::with_capacity(ordered.len());
    for lots in ordered {
        let capital_required = offering.capital_for(lots).ok_or_else(|| {
            DomainError::invalid("tiers", format!("capital for {lots} lots overflows"))
        })?;
        let request =
            SubscriptionRequest::try_new(lots, offering.board_lot_price(), policy.group_threshold)?;
        let threshold = group_pools
            .iter()
            .find(|pool| pool.group == request.group())
            .map_or(1, |pool| pool.guaranteed_threshold);

        let probability = curve.win_probability(lots, threshold)?;
        rows.push(AllocationOddsRow {
            lots_requested: lots,
            capital_required,
            win_probability_percent: to_percent(lots, probability)?,
            group: request.group(),
        });
    }

    Ok(AllocationOddsTable::new(group_pools, rows))
}

/// Chance, in percent, that a one-lot application wins at `multiple`.
///
/// Assumes a pool large enough not to cap the guaranteed threshold, which is
/// how published one-lot success rates are quoted.
///
/// # Errors
///
/// Returns `DomainError::InvalidParameter` for a negative multiple or an
/// invalid model.
pub fn single_lot_percent(multiple: Decimal, model: &BallotModel) -> Result<Decimal, DomainError> {
    model.validate()?;
    if multiple < Decimal::ZERO {
        return Err(DomainError::invalid(
            "oversubscription_multiple",
            format!("must be non-negative, got {multiple}"),
        ));
    }
    let multiple = multiple.to_f64().ok_or_else(|| {
        DomainError::invalid(
            "oversubscription_multiple",
            "is not representable as a finite number",
        )
    })?;

    let curve = BallotCurve::new(multiple, model);
    let probability = curve.win_probability(1, curve.guaranteed_threshold(u64::MAX))?;
    to_percent(1, probability)
}

fn to_percent(lots: u64, probability: f64) -> Result<Decimal, DomainError> {
    let percent = Decimal::from_f64(probability * 100.0)
        .ok_or(DomainError::ComputationOverflow {
            lots,
            value: probability,
        })?
        .round_dp(PERCENT_SCALE);

    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(DomainError::ComputationOverflow {
            lots,
            value: probability,
        });
    }
    Ok(percent)
}
