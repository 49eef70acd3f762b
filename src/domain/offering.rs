//! Offering-level domain types.
//!
//! - [`OfferingParameters`] - Canonical description of one IPO handed to the simulator
//! - [`Mechanism`] - Whether the public tranche may grow through clawback
//! - [`GroupSplit`] - Group A's share of the public tranche
//! - [`GroupPools`] - Lot pools of both groups after the split

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::group::Group;

/// Allocation mechanism published with the prospectus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mechanism {
    /// Clawback from the institutional tranche is permitted.
    A,
    /// Fixed public ratio, no clawback.
    #[default]
    B,
}

impl Mechanism {
    /// Whether clawback reallocation applies to this offering.
    #[must_use]
    pub const fn permits_clawback(&self) -> bool {
        matches!(self, Self::A)
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Group A's share of the public tranche, strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSplit(Decimal);

impl GroupSplit {
    /// Create a split with domain invariant validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` unless `0 < ratio < 1`.
    pub fn try_new(ratio: Decimal) -> Result<Self, DomainError> {
        if ratio <= Decimal::ZERO || ratio >= Decimal::ONE {
            return Err(DomainError::invalid(
                "group_split",
                format!("ratio must be strictly between 0 and 1, got {ratio}"),
            ));
        }
        Ok(Self(ratio))
    }

    /// Group A's share.
    #[must_use]
    pub const fn ratio(&self) -> Decimal {
        self.0
    }

    /// Partition a public tranche into group pools.
    ///
    /// Group A receives the floor of its share, clamped so that both groups
    /// keep at least one lot. The pools always sum to `public_lots`.
    #[must_use]
    pub fn partition(&self, public_lots: u64) -> GroupPools {
        if public_lots < 2 {
            return GroupPools {
                a: public_lots,
                b: 0,
            };
        }

        let a = (Decimal::from(public_lots) * self.0)
            .floor()
            .to_u64()
            .unwrap_or(0)
            .clamp(1, public_lots - 1);

        GroupPools {
            a,
            b: public_lots - a,
        }
    }
}

impl Default for GroupSplit {
    fn default() -> Self {
        Self(Decimal::new(5, 1))
    }
}

impl fmt::Display for GroupSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.0 * Decimal::ONE_HUNDRED;
        let b = Decimal::ONE_HUNDRED - a;
        write!(f, "{}/{}", a.normalize(), b.normalize())
    }
}

/// Lot pools of the two applicant groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPools {
    pub a: u64,
    pub b: u64,
}

impl GroupPools {
    /// Pool size for a group.
    #[must_use]
    pub const fn lots(&self, group: Group) -> u64 {
        match group {
            Group::A => self.a,
            Group::B => self.b,
        }
    }

    /// Combined size of both pools.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.a + self.b
    }
}

/// Canonical description of one IPO as consumed by the odds simulator.
///
/// Values are produced by a listing source after normalisation, or directly
/// from command-line arguments. Construction goes through
/// [`OfferingParameters::builder`], which enforces:
///
/// - `total_lots_offered > 0`
/// - `oversubscription_multiple >= 0`
/// - `board_lot_price > 0`
/// - `2 <= public_tranche_lots <= total_lots_offered`
///
/// `public_tranche_lots` is the pool after any clawback, and defaults to
/// `total_lots_offered` when not supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferingParameters {
    code: Option<String>,
    total_lots_offered: u64,
    oversubscription_multiple: Decimal,
    mechanism: Mechanism,
    public_tranche_lots: u64,
    board_lot_price: Decimal,
    group_split: Option<GroupSplit>,
}

impl OfferingParameters {
    /// Create a builder.
    #[must_use]
    pub fn builder() -> OfferingParametersBuilder {
        OfferingParametersBuilder::default()
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    #[must_use]
    pub const fn total_lots_offered(&self) -> u64 {
        self.total_lots_offered
    }

    #[must_use]
    pub const fn oversubscription_multiple(&self) -> Decimal {
        self.oversubscription_multiple
    }

    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        self.mechanism
    }

    #[must_use]
    pub const fn public_tranche_lots(&self) -> u64 {
        self.public_tranche_lots
    }

    #[must_use]
    pub const fn board_lot_price(&self) -> Decimal {
        self.board_lot_price
    }

    /// The split published with the offering, if any.
    #[must_use]
    pub const fn group_split(&self) -> Option<GroupSplit> {
        self.group_split
    }

    /// Partition the public tranche, falling back to `default_split` when the
    /// offering does not publish one.
    #[must_use]
    pub fn group_pools(&self, default_split: GroupSplit) -> GroupPools {
        self.group_split
            .unwrap_or(default_split)
            .partition(self.public_tranche_lots)
    }

    /// Application value of `lots` board lots, `None` on overflow.
    #[must_use]
    pub fn capital_for(&self, lots: u64) -> Option<Decimal> {
        Decimal::from(lots).checked_mul(self.board_lot_price)
    }
}

/// Builder for [`OfferingParameters`].
#[derive(Debug, Default, Clone)]
pub struct OfferingParametersBuilder {
    code: Option<String>,
    total_lots_offered: Option<u64>,
    oversubscription_multiple: Option<Decimal>,
    mechanism: Mechanism,
    public_tranche_lots: Option<u64>,
    board_lot_price: Option<Decimal>,
    group_split: Option<GroupSplit>,
}

impl OfferingParametersBuilder {
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn total_lots_offered(mut self, lots: u64) -> Self {
        self.total_lots_offered = Some(lots);
        self
    }

    pub fn oversubscription_multiple(mut self, multiple: Decimal) -> Self {
        self.oversubscription_multiple = Some(multiple);
        self
    }

    pub fn mechanism(mut self, mechanism: Mechanism) -> Self {
        self.mechanism = mechanism;
        self
    }

    pub fn public_tranche_lots(mut self, lots: u64) -> Self {
        self.public_tranche_lots = Some(lots);
        self
    }

    pub fn board_lot_price(mut self, price: Decimal) -> Self {
        self.board_lot_price = Some(price);
        self
    }

    pub fn group_split(mut self, split: Option<GroupSplit>) -> Self {
        self.group_split = split;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` naming the first field that is
    /// missing or out of range.
    pub fn build(self) -> Result<OfferingParameters, DomainError> {
        let total_lots_offered = self
            .total_lots_offered
            .ok_or_else(|| DomainError::invalid("total_lots_offered", "is required"))?;
        if total_lots_offered == 0 {
            return Err(DomainError::invalid(
                "total_lots_offered",
                "must be positive, got 0",
            ));
        }

        let oversubscription_multiple = self
            .oversubscription_multiple
            .ok_or_else(|| DomainError::invalid("oversubscription_multiple", "is required"))?;
        if oversubscription_multiple < Decimal::ZERO {
            return Err(DomainError::invalid(
                "oversubscription_multiple",
                format!("must be non-negative, got {oversubscription_multiple}"),
            ));
        }

        let board_lot_price = self
            .board_lot_price
            .ok_or_else(|| DomainError::invalid("board_lot_price", "is required"))?;
        if board_lot_price <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "board_lot_price",
                format!("must be positive, got {board_lot_price}"),
            ));
        }

        let public_tranche_lots = self.public_tranche_lots.unwrap_or(total_lots_offered);
        if public_tranche_lots > total_lots_offered {
            return Err(DomainError::invalid(
                "public_tranche_lots",
                format!(
                    "{public_tranche_lots} exceeds total_lots_offered {total_lots_offered}"
                ),
            ));
        }
        if public_tranche_lots < 2 {
            return Err(DomainError::invalid(
                "public_tranche_lots",
                format!(
                    "must be at least 2 lots to split into groups A and B, got {public_tranche_lots}"
                ),
            ));
        }

        Ok(OfferingParameters {
            code: self.code,
            total_lots_offered,
            oversubscription_multiple,
            mechanism: self.mechanism,
            public_tranche_lots,
            board_lot_price,
            group_split: self.group_split,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn offering() -> OfferingParametersBuilder {
        OfferingParameters::builder()
            .total_lots_offered(20_000)
            .oversubscription_multiple(dec!(38))
            .board_lot_price(dec!(36865))
    }

    #[test]
    fn public_tranche_defaults_to_total_lots() {
        let params = offering().build().unwrap();
        assert_eq!(params.public_tranche_lots(), 20_000);
        assert_eq!(params.mechanism(), Mechanism::B);
        assert!(params.group_split().is_none());
    }

    #[test]
    fn missing_split_defaults_to_even_pools() {
        let params = offering().public_tranche_lots(2_001).build().unwrap();
        let pools = params.group_pools(GroupSplit::default());

        assert_eq!(pools.a, 1_000);
        assert_eq!(pools.b, 1_001);
        assert_eq!(pools.total(), 2_001);
    }

    #[test]
    fn published_split_wins_over_default() {
        let split = GroupSplit::try_new(dec!(0.3)).unwrap();
        let params = offering()
            .public_tranche_lots(1_000)
            .group_split(Some(split))
            .build()
            .unwrap();
        let pools = params.group_pools(GroupSplit::default());

        assert_eq!(pools.lots(Group::A), 300);
        assert_eq!(pools.lots(Group::B), 700);
    }

    #[test]
    fn extreme_split_keeps_one_lot_per_group() {
        let split = GroupSplit::try_new(dec!(0.999)).unwrap();
        let pools = split.partition(10);
        assert_eq!(pools, GroupPools { a: 9, b: 1 });

        let split = GroupSplit::try_new(dec!(0.001)).unwrap();
        let pools = split.partition(10);
        assert_eq!(pools, GroupPools { a: 1, b: 9 });
    }

    #[test]
    fn split_must_be_strictly_inside_unit_interval() {
        assert!(GroupSplit::try_new(dec!(0)).is_err());
        assert!(GroupSplit::try_new(dec!(1)).is_err());
        assert!(GroupSplit::try_new(dec!(-0.5)).is_err());
        assert!(GroupSplit::try_new(dec!(0.5)).is_ok());
    }

    #[test]
    fn rejects_zero_lots_offered() {
        let err = offering().total_lots_offered(0).build().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter {
                field: "total_lots_offered",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_multiple() {
        let err = offering()
            .oversubscription_multiple(dec!(-1))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter {
                field: "oversubscription_multiple",
                ..
            }
        ));
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn rejects_public_tranche_larger_than_offering() {
        let err = offering()
            .public_tranche_lots(20_001)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter {
                field: "public_tranche_lots",
                ..
            }
        ));
    }

    #[test]
    fn rejects_public_tranche_too_small_to_split() {
        let err = offering().public_tranche_lots(1).build().unwrap_err();
        assert!(err.to_string().contains("groups A and B"));
    }

    #[test]
    fn rejects_non_positive_lot_price() {
        let err = offering().board_lot_price(dec!(0)).build().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter {
                field: "board_lot_price",
                ..
            }
        ));
    }

    #[test]
    fn capital_is_lots_times_lot_price() {
        let params = offering().build().unwrap();
        assert_eq!(params.capital_for(10), Some(dec!(368650)));
    }

    #[test]
    fn capital_overflow_is_none() {
        let params = offering().board_lot_price(Decimal::MAX).build().unwrap();
        assert_eq!(params.capital_for(1), Some(Decimal::MAX));
        assert_eq!(params.capital_for(2), None);
    }

    #[test]
    fn split_displays_as_percentages() {
        assert_eq!(GroupSplit::default().to_string(), "50/50");
    }
}
