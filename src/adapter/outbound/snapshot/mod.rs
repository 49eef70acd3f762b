//! Listing source backed by a JSON snapshot file.
//!
//! The snapshot is what the upstream scraper writes: either
//! `{"ipos": [ ... ], "history": [ ... ]}` or a bare array of listing
//! records. Both keys are optional. The file is read on every call; nothing
//! is cached between invocations.

pub mod normalize;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::history::HistoricalListing;
use crate::domain::listing::ListingRecord;
use crate::domain::offering::OfferingParameters;
use crate::error::SourceError;
use crate::port::ListingSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Wrapped {
        #[serde(default)]
        ipos: Vec<ListingRecord>,
        #[serde(default)]
        history: Vec<HistoricalListing>,
    },
    Bare(Vec<ListingRecord>),
}

/// [`ListingSource`] reading a snapshot file from disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, reason: String) -> SourceError {
        SourceError::Unavailable {
            source_name: format!("snapshot {}", self.path.display()),
            reason,
        }
    }

    async fn read(&self) -> Result<SnapshotFile, SourceError> {
        debug!(path = %self.path.display(), "Reading listing snapshot");

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| self.unavailable(format!("invalid snapshot: {e}")))
    }
}

#[async_trait]
impl ListingSource for SnapshotSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn listings(&self) -> Result<Vec<ListingRecord>, SourceError> {
        let listings = match self.read().await? {
            SnapshotFile::Wrapped { ipos, .. } | SnapshotFile::Bare(ipos) => ipos,
        };

        info!(
            path = %self.path.display(),
            count = listings.len(),
            "Loaded listing snapshot"
        );
        Ok(listings)
    }

    async fn history(&self) -> Result<Vec<HistoricalListing>, SourceError> {
        let history = match self.read().await? {
            SnapshotFile::Wrapped { history, .. } => history,
            SnapshotFile::Bare(_) => Vec::new(),
        };

        info!(
            path = %self.path.display(),
            count = history.len(),
            "Loaded listing history"
        );
        Ok(history)
    }

    async fn fetch_offering_parameters(
        &self,
        code: &str,
        oversubscription: Option<Decimal>,
    ) -> Result<OfferingParameters, SourceError> {
        let listing = self.listing(code).await?;
        normalize::to_offering(&listing, oversubscription)
    }
}
