//! Handler for the `history` command.
//!
//! Each past listing is shown next to the one-lot win rate the ballot curve
//! predicts for its recorded multiple.

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use super::command::HistoryArgs;
use super::listing::or_dash;
use super::{open_source, output};
use crate::domain::history::HistoricalListing;
use crate::domain::listing::normalize_code;
use crate::domain::odds::BallotModel;
use crate::error::{Result, SourceError};
use crate::infrastructure::config::Config;

#[derive(Debug, Serialize)]
struct HistoryEntry {
    #[serde(flatten)]
    listing: HistoricalListing,
    #[serde(with = "rust_decimal::serde::float_option")]
    model_win_rate_pct: Option<Decimal>,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Listed")]
    listing_date: String,
    #[tabled(rename = "Offer")]
    offer_price: String,
    #[tabled(rename = "Open")]
    listing_price: String,
    #[tabled(rename = "Oversub")]
    oversubscription: String,
    #[tabled(rename = "1-lot win %")]
    win_rate: String,
    #[tabled(rename = "Model %")]
    model_win_rate: String,
    #[tabled(rename = "Day 1")]
    first_day_change: String,
}

fn or_dash_decimal(value: Option<Decimal>, suffix: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{}{suffix}", v.round_dp(2)))
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        let listing = &entry.listing;
        Self {
            code: normalize_code(&listing.code),
            name: listing.name.clone(),
            listing_date: or_dash(&listing.listing_date),
            offer_price: or_dash(&listing.offer_price),
            listing_price: or_dash(&listing.listing_price),
            oversubscription: or_dash_decimal(listing.oversubscription, "x"),
            win_rate: or_dash_decimal(listing.win_rate_pct, "%"),
            model_win_rate: or_dash_decimal(entry.model_win_rate_pct, "%"),
            first_day_change: listing
                .first_day_change_pct
                .map_or_else(|| "-".to_string(), |change| {
                    let text = format!("{:+}%", change.round_dp(2));
                    if change < Decimal::ZERO {
                        output::negative(text)
                    } else {
                        output::positive(text)
                    }
                }),
        }
    }
}

fn annotate(listings: Vec<HistoricalListing>, model: &BallotModel) -> Result<Vec<HistoryEntry>> {
    listings
        .into_iter()
        .map(|listing| -> Result<HistoryEntry> {
            let model_win_rate_pct =
                listing
                    .modelled_win_rate(model)
                    .map_err(|err| SourceError::Malformed {
                        code: normalize_code(&listing.code),
                        field: "oversubscription",
                        reason: err.to_string(),
                    })?;
            Ok(HistoryEntry {
                listing,
                model_win_rate_pct,
            })
        })
        .collect()
}

/// Execute `history`.
pub async fn execute(args: &HistoryArgs, config: &Config) -> Result<()> {
    let model = config.policy.odds_policy()?.model;
    let source = open_source(args.source.as_deref(), config)?;

    let mut listings = source.history().await?;
    listings.truncate(args.limit);
    let entries = annotate(listings, &model)?;
    info!(count = entries.len(), "Annotated listing history");

    if output::is_json() {
        return output::document(&serde_json::json!({ "ipos": entries }));
    }

    output::section(&format!("Listing history ({})", entries.len()));
    if entries.is_empty() {
        output::note("No past listings in the snapshot.");
        return Ok(());
    }
    output::table(entries.iter().map(HistoryRow::from));
    Ok(())
}
