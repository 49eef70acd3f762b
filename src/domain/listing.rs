//! Listings as published by upstream data sources.
//!
//! Field names follow the upstream scraper's JSON so snapshots load without
//! translation. Values keep their source formatting (`"5.60-6.80"`,
//! `"20,336,000"`); the normaliser turns them into [`OfferingParameters`].
//!
//! [`OfferingParameters`]: super::offering::OfferingParameters

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a published clawback table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClawbackEntry {
    /// Condition on the multiple, e.g. `15≤X<50`.
    pub condition: String,
    /// Percent of the offering allocated to the public tranche.
    #[serde(with = "rust_decimal::serde::float")]
    pub ratio: Decimal,
}

/// An IPO listing in source format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub offer_price: String,
    #[serde(default)]
    pub lot_size: u64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub entry_fee: Option<Decimal>,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub listing_date: String,
    #[serde(default)]
    pub total_shares: String,
    #[serde(default)]
    pub public_shares: String,
    #[serde(default)]
    pub public_ratio: String,
    #[serde(default)]
    pub clawback: Vec<ClawbackEntry>,
    /// `"A"` (clawback) or `"B"` (fixed ratio), when the source knows it.
    #[serde(default)]
    pub pricing_mechanism: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub oversubscription: Option<Decimal>,
    /// Group A's share of the public tranche, when published.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub group_split: Option<Decimal>,
    #[serde(default)]
    pub is_ah_stock: bool,
    #[serde(default)]
    pub a_share_code: Option<String>,
}

impl ListingRecord {
    /// Upper bound of the offer price per share.
    ///
    /// Reads `offer_price`, falling back to `price_range`. Accepts single
    /// prices (`"6.80"`, `"HK$6.80"`) and ranges (`"5.60-6.80"`). Returns
    /// `None` for `"N/A"`, blanks, or a zero price.
    #[must_use]
    pub fn offer_price_upper(&self) -> Option<Decimal> {
        upper_price(&self.offer_price).or_else(|| upper_price(&self.price_range))
    }

    /// Shares in the global offering.
    #[must_use]
    pub fn total_share_count(&self) -> Option<u64> {
        share_count(&self.total_shares)
    }

    /// Shares initially allocated to the public tranche.
    #[must_use]
    pub fn public_share_count(&self) -> Option<u64> {
        share_count(&self.public_shares)
    }

    /// Initial public tranche as a percentage of the offering.
    #[must_use]
    pub fn public_ratio_percent(&self) -> Option<Decimal> {
        let trimmed = self.public_ratio.trim().trim_end_matches('%').trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed).ok()
    }
}

/// Canonical five-digit HKEX stock code.
///
/// Numeric codes are left-padded with zeros (`"2715"` → `"02715"`); a
/// trailing `.HK` suffix is dropped. Anything else is returned trimmed.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    let trimmed = code.trim();
    let bare = trimmed
        .strip_suffix(".HK")
        .or_else(|| trimmed.strip_suffix(".hk"))
        .unwrap_or(trimmed);

    if !bare.is_empty() && bare.len() <= 5 && bare.chars().all(|c| c.is_ascii_digit()) {
        format!("{bare:0>5}")
    } else {
        bare.to_string()
    }
}

fn upper_price(raw: &str) -> Option<Decimal> {
    numbers(raw)
        .into_iter()
        .max()
        .filter(|price| *price > Decimal::ZERO)
}

/// Share count, ignoring thousands separators and any trailing annotation
/// such as `"2034000(10.00%)"`.
fn share_count(raw: &str) -> Option<u64> {
    let head = raw.split('(').next().unwrap_or_default();
    let digits: String = head
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn numbers(raw: &str) -> Vec<Decimal> {
    let mut found = Vec::new();
    let mut current = String::new();

    for c in raw.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_digit() || (c == '.' && !current.is_empty()) {
            current.push(c);
        } else if c == ',' && !current.is_empty() {
            continue;
        } else if !current.is_empty() {
            if let Ok(value) = Decimal::from_str(current.trim_end_matches('.')) {
                found.push(value);
            }
            current.clear();
        }
    }
    found
}
