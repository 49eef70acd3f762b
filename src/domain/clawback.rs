//! Clawback schedules.
//!
//! Under mechanism A the public tranche grows with public demand. Prospectuses
//! publish the schedule as conditions on the oversubscription multiple, e.g.
//! `15≤X<50` → 30% of the offering, `X≥100` → 50%.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::error::DomainError;

/// One side of a multiple range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub value: Decimal,
    pub inclusive: bool,
}

/// A multiple range and the public share of the offering it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClawbackTier {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
    /// Percent of total offer lots allocated to the public tranche.
    pub public_percent: Decimal,
}

impl ClawbackTier {
    /// Parse a published condition such as `15≤X<50` or `X≥100倍`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` for unrecognised conditions or
    /// a percentage outside [0, 100].
    pub fn parse(condition: &str, public_percent: Decimal) -> Result<Self, DomainError> {
        if public_percent < Decimal::ZERO || public_percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::invalid(
                "clawback",
                format!("public percent must lie in [0, 100], got {public_percent}"),
            ));
        }

        let cleaned: String = condition
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '倍')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if cleaned.is_empty() {
            return Err(DomainError::invalid("clawback", "empty condition"));
        }

        let (left, right) = match cleaned.split_once('X') {
            Some((left, right)) => (left, right),
            None => ("", cleaned.as_str()),
        };

        let mut tier = Self {
            lower: None,
            upper: None,
            public_percent,
        };

        if !left.is_empty() {
            tier.lower = Some(parse_left(left, condition)?);
        }
        if !right.is_empty() {
            let (op, number) = split_operator(right)
                .ok_or_else(|| unrecognised(condition))?;
            let value = parse_number(number, condition)?;
            match op {
                "<" => tier.upper = Some(Bound { value, inclusive: false }),
                "≤" | "<=" => tier.upper = Some(Bound { value, inclusive: true }),
                ">" => tier.lower = Some(Bound { value, inclusive: false }),
                "≥" | ">=" => tier.lower = Some(Bound { value, inclusive: true }),
                _ => return Err(unrecognised(condition)),
            }
        }

        if tier.lower.is_none() && tier.upper.is_none() {
            return Err(unrecognised(condition));
        }
        Ok(tier)
    }

    /// Whether `multiple` falls inside this tier's range.
    #[must_use]
    pub fn contains(&self, multiple: Decimal) -> bool {
        let above = self.lower.map_or(true, |bound| {
            if bound.inclusive {
                multiple >= bound.value
            } else {
                multiple > bound.value
            }
        });
        let below = self.upper.map_or(true, |bound| {
            if bound.inclusive {
                multiple <= bound.value
            } else {
                multiple < bound.value
            }
        });
        above && below
    }
}

/// Ordered set of clawback tiers for one offering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClawbackSchedule {
    tiers: Vec<ClawbackTier>,
}

impl ClawbackSchedule {
    #[must_use]
    pub fn new(tiers: Vec<ClawbackTier>) -> Self {
        Self { tiers }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    #[must_use]
    pub fn tiers(&self) -> &[ClawbackTier] {
        &self.tiers
    }

    /// Highest public percent among tiers matching `multiple`.
    #[must_use]
    pub fn public_percent_for(&self, multiple: Decimal) -> Option<Decimal> {
        self.tiers
            .iter()
            .filter(|tier| tier.contains(multiple))
            .map(|tier| tier.public_percent)
            .max()
    }

    /// Public tranche after clawback.
    ///
    /// Never shrinks the initial tranche and never exceeds the offering.
    #[must_use]
    pub fn public_lots(&self, total_lots: u64, initial_public_lots: u64, multiple: Decimal) -> u64 {
        let reallocated = self
            .public_percent_for(multiple)
            .and_then(|percent| {
                (Decimal::from(total_lots) * percent / Decimal::ONE_HUNDRED)
                    .floor()
                    .to_u64()
            })
            .unwrap_or(0);

        initial_public_lots.max(reallocated).min(total_lots)
    }
}

fn parse_left(left: &str, condition: &str) -> Result<Bound, DomainError> {
    for (op, inclusive) in [("<=", true), ("≤", true), ("<", false)] {
        if let Some(number) = left.strip_suffix(op) {
            return Ok(Bound {
                value: parse_number(number, condition)?,
                inclusive,
            });
        }
    }
    Err(unrecognised(condition))
}

fn split_operator(expr: &str) -> Option<(&str, &str)> {
    ["<=", ">=", "≤", "≥", "<", ">"]
        .into_iter()
        .find_map(|op| expr.strip_prefix(op).map(|rest| (op, rest)))
}

fn parse_number(number: &str, condition: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(number).map_err(|_| unrecognised(condition))
}

fn unrecognised(condition: &str) -> DomainError {
    DomainError::invalid(
        "clawback",
        format!("unrecognised condition '{condition}'"),
    )
}
