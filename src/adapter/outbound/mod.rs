//! Outbound adapters implementing the ports.

pub mod snapshot;
