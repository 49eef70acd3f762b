//! hkipo - Hong Kong IPO subscription data and allocation odds.
//!
//! The centerpiece is a board-lot allocation odds simulator: given an
//! offering's public tranche, oversubscription multiple and board lot price,
//! it estimates the probability of receiving at least one board lot for each
//! application size, separately for group A and group B applicants.
//!
//! # Architecture
//!
//! - **`domain`** - Pure, synchronous core: offering parameters, group
//!   classification, the ballot curve, clawback schedules, A/H discounts and
//!   subscription rounds. No I/O and no logging.
//! - **`port`** - The [`port::ListingSource`] trait upstream data sources
//!   implement.
//! - **`adapter::outbound`** - Listing sources; the snapshot adapter reads
//!   the JSON file the upstream scraper writes and normalises it.
//! - **`adapter::inbound::cli`** - The `hkipo` command-line interface.
//! - **`infrastructure`** - TOML configuration and logging setup.
//!
//! # Example
//!
//! ```
//! use hkipo::domain::{compute_odds, OddsPolicy, OfferingParameters};
//! use rust_decimal_macros::dec;
//!
//! let offering = OfferingParameters::builder()
//!     .total_lots_offered(20_000)
//!     .oversubscription_multiple(dec!(38))
//!     .board_lot_price(dec!(36865))
//!     .build()?;
//!
//! let table = compute_odds(&offering, &[1, 10, 135], &OddsPolicy::default())?;
//! assert_eq!(table.len(), 3);
//! assert!(table.rows()[0].win_probability_percent < dec!(1));
//! # Ok::<(), hkipo::domain::DomainError>(())
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
