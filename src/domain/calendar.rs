//! Subscription rounds grouped by application deadline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::listing::ListingRecord;

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%Y年%m月%d日"];

/// A listing inside a subscription round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundEntry {
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub entry_fee: Option<Decimal>,
    pub listing_date: String,
}

/// Listings sharing one application deadline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionRound {
    /// ISO date when parseable, otherwise the source text.
    pub deadline: String,
    pub ipos: Vec<RoundEntry>,
}

/// Parse a deadline in any of the formats upstream sources use.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Group listings into rounds ordered by deadline.
///
/// Rounds with a parseable date come first in chronological order; the rest
/// follow in lexical order of their raw deadline text. Listings keep their
/// input order within a round.
#[must_use]
pub fn group_by_deadline(listings: &[ListingRecord]) -> Vec<SubscriptionRound> {
    let mut rounds: BTreeMap<(bool, Option<NaiveDate>, String), Vec<RoundEntry>> = BTreeMap::new();

    for listing in listings {
        let date = parse_date(&listing.deadline);
        let label = match date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => listing.deadline.trim().to_string(),
        };

        rounds
            .entry((date.is_none(), date, label))
            .or_default()
            .push(RoundEntry {
                code: listing.code.clone(),
                name: listing.name.clone(),
                entry_fee: listing.entry_fee,
                listing_date: listing.listing_date.clone(),
            });
    }

    rounds
        .into_iter()
        .map(|((_, _, deadline), ipos)| SubscriptionRound { deadline, ipos })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(code: &str, deadline: &str) -> ListingRecord {
        ListingRecord {
            code: code.into(),
            name: format!("Listing {code}"),
            deadline: deadline.into(),
            ..ListingRecord::default()
        }
    }

    #[test]
    fn parses_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 20);
        assert_eq!(parse_date("2026-10-20"), expected);
        assert_eq!(parse_date("2026/10/20"), expected);
        assert_eq!(parse_date("20/10/2026"), expected);
        assert_eq!(parse_date(" 20-10-2026 "), expected);
        assert_eq!(parse_date("tbc"), None);
    }

    #[test]
    fn groups_by_deadline_in_date_order() {
        let rounds = group_by_deadline(&[
            listing("00003", "2026/10/23"),
            listing("00001", "2026-10-20"),
            listing("00002", "20/10/2026"),
        ]);

        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].deadline, "2026-10-20");
        assert_eq!(rounds[0].ipos.len(), 2);
        assert_eq!(rounds[0].ipos[0].code, "00001");
        assert_eq!(rounds[0].ipos[1].code, "00002");
        assert_eq!(rounds[1].deadline, "2026-10-23");
    }

    #[test]
    fn unparseable_deadlines_come_last() {
        let rounds = group_by_deadline(&[listing("00009", ""), listing("00001", "2026-10-20")]);

        assert_eq!(rounds[0].deadline, "2026-10-20");
        assert_eq!(rounds[1].deadline, "");
    }

    #[test]
    fn empty_input_has_no_rounds() {
        assert!(group_by_deadline(&[]).is_empty());
    }
}
