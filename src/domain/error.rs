//! Domain validation errors for core domain types.
//!
//! These errors are returned by validating constructors and by the odds
//! simulator when its inputs violate a domain invariant.
//!
//! # Examples
//!
//! ```
//! use hkipo::domain::error::DomainError;
//! use hkipo::domain::offering::OfferingParameters;
//! use rust_decimal_macros::dec;
//!
//! let result = OfferingParameters::builder()
//!     .total_lots_offered(0)
//!     .oversubscription_multiple(dec!(38))
//!     .board_lot_price(dec!(36865))
//!     .build();
//!
//! assert!(matches!(
//!     result,
//!     Err(DomainError::InvalidParameter { field: "total_lots_offered", .. })
//! ));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// An input value is malformed or out of range.
    #[error("invalid {field}: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A probability escaped [0, 1] after clamping.
    ///
    /// This is an internal invariant violation and is never expected for
    /// valid inputs.
    #[error("probability for {lots} lots escaped [0, 1]: {value}")]
    ComputationOverflow {
        /// Tier being evaluated when the violation was detected.
        lots: u64,
        /// The offending value.
        value: f64,
    },
}

impl DomainError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
