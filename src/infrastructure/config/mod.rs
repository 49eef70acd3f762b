//! Infrastructure configuration modules.

pub mod logging;
pub mod policy;
pub mod settings;

pub use logging::LoggingConfig;
pub use policy::{ModelConfig, PolicyConfig};
pub use settings::{Config, DiscountConfig, SourceConfig};
