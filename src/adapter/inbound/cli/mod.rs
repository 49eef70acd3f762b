//! CLI module graph.

pub mod ah;
pub mod calendar;
pub mod command;
pub mod config;
pub mod detail;
pub mod diagnostic;
pub mod discount;
pub mod history;
pub mod listing;
pub mod odds;
pub mod output;
pub mod paths;

use std::path::Path;

use crate::adapter::outbound::snapshot::SnapshotSource;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;
use crate::port::ListingSource;

/// Resolve the listing source for a command.
///
/// An explicit `--source` path wins over `[source] snapshot` in the config.
pub(crate) fn open_source(path: Option<&Path>, config: &Config) -> Result<Box<dyn ListingSource>> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| config.source.snapshot.clone())
        .ok_or(ConfigError::MissingField {
            field: "source.snapshot",
        })?;
    Ok(Box::new(SnapshotSource::new(path)))
}
