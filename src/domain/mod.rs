//! Source-agnostic domain logic.

pub mod calendar;
pub mod clawback;
pub mod discount;
pub mod error;
pub mod group;
pub mod history;
pub mod listing;
pub mod odds;
pub mod offering;

pub use calendar::{group_by_deadline, SubscriptionRound};
pub use clawback::{ClawbackSchedule, ClawbackTier};
pub use discount::{compute_discount, AhComparison};
pub use error::DomainError;
pub use group::{Group, SubscriptionRequest};
pub use history::HistoricalListing;
pub use listing::{ListingRecord, normalize_code};
pub use odds::{
    compute_odds, single_lot_percent, AllocationOddsRow, AllocationOddsTable, OddsPolicy,
};
pub use offering::{GroupSplit, Mechanism, OfferingParameters};
