//! Output types of the odds simulator.

use rust_decimal::Decimal;
use serde::Serialize;

use super::super::group::Group;

/// Odds of one requested tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationOddsRow {
    #[serde(rename = "lots")]
    pub lots_requested: u64,
    #[serde(rename = "capital", with = "rust_decimal::serde::float")]
    pub capital_required: Decimal,
    #[serde(rename = "probability_percent", with = "rust_decimal::serde::float")]
    pub win_probability_percent: Decimal,
    pub group: Group,
}

impl AllocationOddsRow {
    /// Whether the row is a guaranteed allocation.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.win_probability_percent == Decimal::ONE_HUNDRED
    }
}

/// Summary of one group's ballot pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupPool {
    pub group: Group,
    pub lots: u64,
    /// Smallest application guaranteed at least one lot.
    pub guaranteed_threshold: u64,
}

/// Rows ordered by lot count, plus both group pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationOddsTable {
    pools: Vec<GroupPool>,
    rows: Vec<AllocationOddsRow>,
}

impl AllocationOddsTable {
    pub(crate) fn new(pools: Vec<GroupPool>, rows: Vec<AllocationOddsRow>) -> Self {
        Self { pools, rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[AllocationOddsRow] {
        &self.rows
    }

    #[must_use]
    pub fn pools(&self) -> &[GroupPool] {
        &self.pools
    }

    /// Pool summary for a group.
    #[must_use]
    pub fn pool(&self, group: Group) -> Option<&GroupPool> {
        self.pools.iter().find(|pool| pool.group == group)
    }

    /// Rows belonging to a group, in lot order.
    pub fn rows_for(&self, group: Group) -> impl Iterator<Item = &AllocationOddsRow> {
        self.rows.iter().filter(move |row| row.group == group)
    }

    /// Row for an exact lot count.
    #[must_use]
    pub fn row(&self, lots: u64) -> Option<&AllocationOddsRow> {
        self.rows.iter().find(|row| row.lots_requested == lots)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
