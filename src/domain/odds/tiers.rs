//! Default tier ladder.

use rust_decimal::prelude::ToPrimitive;

use super::super::group::Group;
use super::super::offering::OfferingParameters;
use super::OddsPolicy;

/// Tiers shown when the caller does not choose any.
///
/// Walks `1, 10, 20, 50, 100, 200, 500, ...` and adds the largest group A
/// application, the smallest group B application, and the maximum single
/// application (the group B pool). Every tier is capped at the maximum
/// application; the result is sorted and free of duplicates.
#[must_use]
pub fn canonical_tiers(offering: &OfferingParameters, policy: &OddsPolicy) -> Vec<u64> {
    let pools = offering.group_pools(policy.default_split);
    let max_application = pools.lots(Group::B).max(1);

    let mut tiers = vec![1];
    let mut decade: u64 = 10;
    'ladder: loop {
        for step in [1, 2, 5] {
            let tier = match decade.checked_mul(step) {
                Some(tier) if tier <= max_application => tier,
                _ => break 'ladder,
            };
            tiers.push(tier);
        }
        decade = match decade.checked_mul(10) {
            Some(next) => next,
            None => break,
        };
    }

    // A quotient beyond u64 means every application fits in group A.
    let group_a_ceiling = policy
        .group_threshold
        .checked_div(offering.board_lot_price())
        .and_then(|lots| lots.floor().to_u64())
        .unwrap_or(u64::MAX);
    if group_a_ceiling >= 1 {
        tiers.push(group_a_ceiling.min(max_application));
        if let Some(first_b) = group_a_ceiling.checked_add(1) {
            tiers.push(first_b.min(max_application));
        }
    }
    tiers.push(max_application);

    tiers.sort_unstable();
    tiers.dedup();
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn offering(public_lots: u64, lot_price: rust_decimal::Decimal) -> OfferingParameters {
        OfferingParameters::builder()
            .total_lots_offered(public_lots * 10)
            .public_tranche_lots(public_lots)
            .oversubscription_multiple(dec!(38))
            .board_lot_price(lot_price)
            .build()
            .unwrap()
    }

    #[test]
    fn ladder_includes_group_boundaries_and_max_application() {
        let tiers = canonical_tiers(&offering(2_000, dec!(36865)), &OddsPolicy::default());
        assert_eq!(tiers, vec![1, 10, 20, 50, 100, 135, 136, 200, 500, 1_000]);
    }

    #[test]
    fn tiers_are_capped_by_group_b_pool() {
        let tiers = canonical_tiers(&offering(60, dec!(36865)), &OddsPolicy::default());
        assert_eq!(tiers, vec![1, 10, 20, 30]);
    }

    #[test]
    fn expensive_lot_has_no_group_a_ceiling() {
        let tiers = canonical_tiers(&offering(400, dec!(6000000)), &OddsPolicy::default());
        assert_eq!(tiers, vec![1, 10, 20, 50, 100, 200]);
    }

    #[test]
    fn tiers_are_sorted_and_unique() {
        let tiers = canonical_tiers(&offering(100_000, dec!(5000)), &OddsPolicy::default());
        assert!(tiers.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(tiers.first(), Some(&1));
        assert_eq!(tiers.last(), Some(&50_000));
        assert!(tiers.contains(&1_000));
        assert!(tiers.contains(&1_001));
    }
}
