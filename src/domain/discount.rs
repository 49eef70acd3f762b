//! A/H cross-market discount.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;

/// Conventional CNY→HKD conversion rate used when none is configured.
pub const DEFAULT_CNY_HKD_RATE: Decimal = Decimal::from_parts(112, 0, 0, false, 2);

/// Discount of the H-share price against the A-share quote, in percent.
///
/// The A-share quote (CNY) is converted to HKD with `fx_rate`. A positive
/// result means the H share is cheaper than its A-share counterpart.
///
/// # Errors
///
/// Returns `DomainError::InvalidParameter` when any input is not positive.
pub fn compute_discount(
    h_price: Decimal,
    a_price: Decimal,
    fx_rate: Decimal,
) -> Result<Decimal, DomainError> {
    for (field, value) in [("h_price", h_price), ("a_price", a_price), ("fx_rate", fx_rate)] {
        if value <= Decimal::ZERO {
            return Err(DomainError::invalid(
                field,
                format!("must be positive, got {value}"),
            ));
        }
    }

    let a_in_hkd = a_price * fx_rate;
    Ok(((a_in_hkd - h_price) / a_in_hkd * Decimal::ONE_HUNDRED).round_dp(2))
}

/// A/H comparison emitted for downstream analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhComparison {
    pub is_ah_stock: bool,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a_share_code: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub h_price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub a_price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fx_rate: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub discount_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AhComparison {
    /// Comparison for a listing without an A-share counterpart.
    #[must_use]
    pub fn not_ah(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_ah_stock: false,
            code: code.into(),
            name: name.into(),
            a_share_code: None,
            h_price: None,
            a_price: None,
            fx_rate: None,
            discount_pct: None,
            message: Some("Not an A+H stock".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn h_share_cheaper_than_a_share_is_positive() {
        // 10 CNY * 1.12 = 11.20 HKD; (11.20 - 8.40) / 11.20 = 25%
        let discount = compute_discount(dec!(8.40), dec!(10), dec!(1.12)).unwrap();
        assert_eq!(discount, dec!(25.00));
    }

    #[test]
    fn h_share_premium_is_negative() {
        let discount = compute_discount(dec!(12.32), dec!(10), dec!(1.12)).unwrap();
        assert_eq!(discount, dec!(-10.00));
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let err = compute_discount(dec!(0), dec!(10), dec!(1.12)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter { field: "h_price", .. }
        ));

        let err = compute_discount(dec!(5), dec!(10), dec!(-1)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParameter { field: "fx_rate", .. }
        ));
    }

    #[test]
    fn default_rate_is_one_point_one_two() {
        assert_eq!(DEFAULT_CNY_HKD_RATE, dec!(1.12));
    }

    #[test]
    fn not_ah_comparison_serializes_flag() {
        let json = serde_json::to_value(AhComparison::not_ah("02715", "Example")).unwrap();
        assert_eq!(json["is_ah_stock"], false);
        assert!(json["discount_pct"].is_null());
        assert_eq!(json["message"], "Not an A+H stock");
    }
}
