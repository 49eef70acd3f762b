//! Listing source port.
//!
//! One implementation per upstream data source. Implementations hand back
//! listings in source format and normalise them into the canonical
//! [`OfferingParameters`] the odds simulator consumes, so source-specific
//! shapes never leak past the adapter. Retry and caching policy, if any,
//! belongs to the implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::history::HistoricalListing;
use crate::domain::listing::{normalize_code, ListingRecord};
use crate::domain::offering::OfferingParameters;
use crate::error::SourceError;

/// A provider of IPO listings.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Human-readable source name for logs and errors.
    fn name(&self) -> &str;

    /// All listings currently published by the source.
    async fn listings(&self) -> Result<Vec<ListingRecord>, SourceError>;

    /// The listing for one stock code.
    ///
    /// The default implementation scans [`listings`](Self::listings) and
    /// compares codes in canonical five-digit form.
    async fn listing(&self, code: &str) -> Result<ListingRecord, SourceError> {
        let wanted = normalize_code(code);
        self.listings()
            .await?
            .into_iter()
            .find(|listing| normalize_code(&listing.code) == wanted)
            .ok_or(SourceError::NotFound { code: wanted })
    }

    /// Past listings with their allotment results, most recent first.
    async fn history(&self) -> Result<Vec<HistoricalListing>, SourceError>;

    /// Canonical offering parameters for one stock code.
    ///
    /// `oversubscription` overrides the multiple published by the source,
    /// which is usually absent before allotment results are out.
    async fn fetch_offering_parameters(
        &self,
        code: &str,
        oversubscription: Option<Decimal>,
    ) -> Result<OfferingParameters, SourceError>;
}
