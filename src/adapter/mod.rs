//! Adapters connecting the domain to the outside world.
//!
//! - `inbound`: the CLI driving the application
//! - `outbound`: listing sources the application reads from

pub mod inbound;
pub mod outbound;
