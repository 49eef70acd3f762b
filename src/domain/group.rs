//! Statutory applicant groups of the public tranche.
//!
//! - [`Group`] - Group A (application value up to the threshold) or B (above it)
//! - [`SubscriptionRequest`] - A lot count classified into its group

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Applicant group within the public tranche.
///
/// Each group is balloted against its own lot pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    /// Applications with aggregate value up to the group threshold.
    A,
    /// Applications above the group threshold.
    B,
}

impl Group {
    /// Both groups in ballot order.
    pub const ALL: [Group; 2] = [Group::A, Group::B];

    /// Classify an application value against the group threshold.
    ///
    /// Values equal to the threshold belong to group A.
    #[must_use]
    pub fn classify(application_value: Decimal, threshold: Decimal) -> Self {
        if application_value <= threshold {
            Self::A
        } else {
            Self::B
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A subscription of a number of board lots, tagged with its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionRequest {
    lots_requested: u64,
    group: Group,
}

impl SubscriptionRequest {
    /// Build a request and derive its group from the application value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` when `lots_requested` is zero
    /// or the application value overflows.
    pub fn try_new(
        lots_requested: u64,
        board_lot_price: Decimal,
        group_threshold: Decimal,
    ) -> Result<Self, DomainError> {
        if lots_requested == 0 {
            return Err(DomainError::invalid(
                "lots_requested",
                "must be a positive number of board lots",
            ));
        }

        let value = Decimal::from(lots_requested)
            .checked_mul(board_lot_price)
            .ok_or_else(|| {
                DomainError::invalid(
                    "lots_requested",
                    format!("application value of {lots_requested} lots overflows"),
                )
            })?;
        Ok(Self {
            lots_requested,
            group: Group::classify(value, group_threshold),
        })
    }

    #[must_use]
    pub const fn lots_requested(&self) -> u64 {
        self.lots_requested
    }

    #[must_use]
    pub const fn group(&self) -> Group {
        self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn threshold_value_belongs_to_group_a() {
        assert_eq!(Group::classify(dec!(5000000), dec!(5000000)), Group::A);
        assert_eq!(Group::classify(dec!(5000000.01), dec!(5000000)), Group::B);
    }

    #[test]
    fn request_is_classified_by_application_value() {
        let a = SubscriptionRequest::try_new(135, dec!(36865), dec!(5000000)).unwrap();
        let b = SubscriptionRequest::try_new(136, dec!(36865), dec!(5000000)).unwrap();

        assert_eq!(a.group(), Group::A);
        assert_eq!(b.group(), Group::B);
        assert_eq!(b.lots_requested(), 136);
    }

    #[test]
    fn zero_lots_are_rejected() {
        let err = SubscriptionRequest::try_new(0, dec!(36865), dec!(5000000)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter {
                field: "lots_requested",
                ..
            }
        ));
    }

    #[test]
    fn overflowing_application_value_is_rejected() {
        let err = SubscriptionRequest::try_new(2, Decimal::MAX, dec!(5000000)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter {
                field: "lots_requested",
                ..
            }
        ));
    }

    #[test]
    fn group_displays_as_letter() {
        assert_eq!(Group::A.to_string(), "A");
        assert_eq!(Group::B.to_string(), "B");
    }
}
