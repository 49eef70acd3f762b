//! Listing record → canonical offering parameters.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::clawback::{ClawbackSchedule, ClawbackTier};
use crate::domain::error::DomainError;
use crate::domain::listing::{normalize_code, ListingRecord};
use crate::domain::offering::{GroupSplit, Mechanism, OfferingParameters};
use crate::error::SourceError;

/// Normalise one listing.
///
/// - board lot price: upper offer price × lot size, falling back to the
///   published entry fee
/// - lots: share counts divided by lot size
/// - initial public tranche: `public_shares`, else `public_ratio` of the offering
/// - mechanism: explicit tag, else A when a clawback table exists, else B
/// - under mechanism A the clawback tier matching the multiple is applied
///
/// # Errors
///
/// Returns `SourceError::Malformed` naming the field that could not be used.
pub fn to_offering(
    listing: &ListingRecord,
    oversubscription: Option<Decimal>,
) -> Result<OfferingParameters, SourceError> {
    let code = normalize_code(&listing.code);
    let malformed = |field: &'static str, reason: String| SourceError::Malformed {
        code: code.clone(),
        field,
        reason,
    };

    if listing.lot_size == 0 {
        return Err(malformed("lot_size", "must be a positive share count".into()));
    }
    let lot_size = Decimal::from(listing.lot_size);

    let board_lot_price = match listing.offer_price_upper() {
        Some(price) => price.checked_mul(lot_size).ok_or_else(|| {
            malformed("offer_price", format!("{price} per share overflows a board lot"))
        })?,
        None => listing
            .entry_fee
            .filter(|fee| *fee > Decimal::ZERO)
            .ok_or_else(|| {
                malformed(
                    "offer_price",
                    format!(
                        "'{}' has no usable price and no entry fee is published",
                        listing.offer_price
                    ),
                )
            })?,
    };

    let total_shares = listing.total_share_count().ok_or_else(|| {
        malformed(
            "total_shares",
            format!("cannot read a share count from '{}'", listing.total_shares),
        )
    })?;
    let total_lots = total_shares / listing.lot_size;

    let initial_public_lots = match listing.public_share_count() {
        Some(shares) => shares / listing.lot_size,
        None => {
            let ratio = listing.public_ratio_percent().ok_or_else(|| {
                malformed(
                    "public_shares",
                    "neither public_shares nor public_ratio is published".into(),
                )
            })?;
            (Decimal::from(total_lots) * ratio / Decimal::ONE_HUNDRED)
                .floor()
                .to_u64()
                .unwrap_or(0)
        }
    };

    let multiple = oversubscription
        .or(listing.oversubscription)
        .ok_or_else(|| {
            malformed(
                "oversubscription",
                "not published yet; supply the multiple explicitly".into(),
            )
        })?;

    let schedule = ClawbackSchedule::new(
        listing
            .clawback
            .iter()
            .map(|entry| ClawbackTier::parse(&entry.condition, entry.ratio))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| from_domain(&code, err))?,
    );

    let mechanism = match listing.pricing_mechanism.as_deref().map(str::trim) {
        Some("A" | "a") => Mechanism::A,
        Some("B" | "b") => Mechanism::B,
        Some(other) if !other.is_empty() => {
            return Err(malformed(
                "pricing_mechanism",
                format!("expected \"A\" or \"B\", got '{other}'"),
            ));
        }
        _ if !schedule.is_empty() => Mechanism::A,
        _ => Mechanism::B,
    };

    let public_tranche_lots = if mechanism.permits_clawback() {
        schedule.public_lots(total_lots, initial_public_lots, multiple)
    } else {
        initial_public_lots
    };

    let group_split = listing
        .group_split
        .map(GroupSplit::try_new)
        .transpose()
        .map_err(|err| from_domain(&code, err))?;

    debug!(
        code = %code,
        total_lots,
        initial_public_lots,
        public_tranche_lots,
        mechanism = %mechanism,
        board_lot_price = %board_lot_price,
        "Normalised listing"
    );

    OfferingParameters::builder()
        .code(code.clone())
        .total_lots_offered(total_lots)
        .oversubscription_multiple(multiple)
        .mechanism(mechanism)
        .public_tranche_lots(public_tranche_lots)
        .board_lot_price(board_lot_price)
        .group_split(group_split)
        .build()
        .map_err(|err| from_domain(&code, err))
}

fn from_domain(code: &str, err: DomainError) -> SourceError {
    match err {
        DomainError::InvalidParameter { field, reason } => SourceError::Malformed {
            code: code.to_string(),
            field,
            reason,
        },
        other => SourceError::Malformed {
            code: code.to_string(),
            field: "listing",
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::ClawbackEntry;
    use rust_decimal_macros::dec;

    fn listing() -> ListingRecord {
        ListingRecord {
            code: "2715".into(),
            name: "Example Holdings".into(),
            offer_price: "5.60-6.80".into(),
            lot_size: 500,
            total_shares: "20,000,000".into(),
            public_shares: "2000000(10.00%)".into(),
            public_ratio: "10.00".into(),
            clawback: vec![
                ClawbackEntry {
                    condition: "15≤X<50".into(),
                    ratio: dec!(30),
                },
                ClawbackEntry {
                    condition: "X≥100".into(),
                    ratio: dec!(50),
                },
            ],
            oversubscription: Some(dec!(38)),
            ..ListingRecord::default()
        }
    }

    #[test]
    fn derives_lots_price_and_clawback() {
        let params = to_offering(&listing(), None).unwrap();

        assert_eq!(params.code(), Some("02715"));
        assert_eq!(params.board_lot_price(), dec!(3400));
        assert_eq!(params.total_lots_offered(), 40_000);
        assert_eq!(params.mechanism(), Mechanism::A);
        assert_eq!(params.public_tranche_lots(), 12_000);
    }

    #[test]
    fn mechanism_b_keeps_initial_tranche() {
        let mut record = listing();
        record.pricing_mechanism = Some("B".into());

        let params = to_offering(&record, None).unwrap();
        assert_eq!(params.mechanism(), Mechanism::B);
        assert_eq!(params.public_tranche_lots(), 4_000);
    }

    #[test]
    fn override_replaces_published_multiple() {
        let params = to_offering(&listing(), Some(dec!(150))).unwrap();
        assert_eq!(params.oversubscription_multiple(), dec!(150));
        assert_eq!(params.public_tranche_lots(), 20_000);
    }

    #[test]
    fn falls_back_to_public_ratio() {
        let mut record = listing();
        record.public_shares.clear();
        record.clawback.clear();

        let params = to_offering(&record, None).unwrap();
        assert_eq!(params.mechanism(), Mechanism::B);
        assert_eq!(params.public_tranche_lots(), 4_000);
    }

    #[test]
    fn falls_back_to_entry_fee() {
        let mut record = listing();
        record.offer_price = "N/A".into();
        record.entry_fee = Some(dec!(3434.29));

        let params = to_offering(&record, None).unwrap();
        assert_eq!(params.board_lot_price(), dec!(3434.29));
    }

    #[test]
    fn missing_multiple_is_malformed() {
        let mut record = listing();
        record.oversubscription = None;

        let err = to_offering(&record, None).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Malformed {
                field: "oversubscription",
                ..
            }
        ));
    }

    #[test]
    fn zero_lot_size_is_malformed() {
        let mut record = listing();
        record.lot_size = 0;

        let err = to_offering(&record, None).unwrap_err();
        assert!(matches!(err, SourceError::Malformed { field: "lot_size", .. }));
    }

    #[test]
    fn unknown_mechanism_tag_is_malformed() {
        let mut record = listing();
        record.pricing_mechanism = Some("C".into());

        let err = to_offering(&record, None).unwrap_err();
        assert!(err.to_string().contains("pricing_mechanism"));
    }

    #[test]
    fn bad_clawback_condition_is_malformed() {
        let mut record = listing();
        record.clawback[0].condition = "whenever".into();

        let err = to_offering(&record, None).unwrap_err();
        assert!(matches!(err, SourceError::Malformed { field: "clawback", .. }));
    }

    #[test]
    fn published_split_is_validated() {
        let mut record = listing();
        record.group_split = Some(dec!(1.5));

        let err = to_offering(&record, None).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Malformed {
                field: "group_split",
                ..
            }
        ));
    }
}
