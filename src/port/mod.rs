//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where external collaborators plug in. Data sources
//! implement [`ListingSource`]; everything past the port sees only domain
//! types.

mod source;

pub use source::ListingSource;
