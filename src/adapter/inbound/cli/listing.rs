//! Handler for the `list` command.

use serde_json::json;
use tabled::Tabled;

use super::command::SourceArgs;
use super::{open_source, output};
use crate::domain::listing::{normalize_code, ListingRecord};
use crate::error::Result;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Lot size")]
    lot_size: u64,
    #[tabled(rename = "Entry fee")]
    entry_fee: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Listing")]
    listing_date: String,
    #[tabled(rename = "A+H")]
    ah: &'static str,
}

impl From<&ListingRecord> for ListingRow {
    fn from(listing: &ListingRecord) -> Self {
        let price = if listing.offer_price.trim().is_empty() {
            &listing.price_range
        } else {
            &listing.offer_price
        };
        Self {
            code: normalize_code(&listing.code),
            name: listing.name.clone(),
            price: or_dash(price),
            lot_size: listing.lot_size,
            entry_fee: listing
                .entry_fee
                .map_or_else(|| "-".to_string(), |fee| fee.round_dp(2).to_string()),
            deadline: or_dash(&listing.deadline),
            listing_date: or_dash(&listing.listing_date),
            ah: if listing.is_ah_stock { "yes" } else { "" },
        }
    }
}

pub(crate) fn or_dash(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "-".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Execute `list`.
pub async fn execute(args: &SourceArgs, config: &Config) -> Result<()> {
    let source = open_source(args.source.as_deref(), config)?;
    let listings = source.listings().await?;

    if output::is_json() {
        return output::document(&json!({ "ipos": listings }));
    }

    output::section(&format!("Listings ({})", listings.len()));
    if listings.is_empty() {
        output::note("No IPOs in the snapshot.");
        return Ok(());
    }
    output::table(listings.iter().map(ListingRow::from));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn row_falls_back_to_price_range_and_dashes() {
        let listing = ListingRecord {
            code: "9988".into(),
            name: "Example".into(),
            price_range: "5.60-6.80".into(),
            lot_size: 500,
            entry_fee: Some(dec!(3434.292)),
            is_ah_stock: true,
            ..ListingRecord::default()
        };

        let row = ListingRow::from(&listing);
        assert_eq!(row.code, "09988");
        assert_eq!(row.price, "5.60-6.80");
        assert_eq!(row.entry_fee, "3434.29");
        assert_eq!(row.deadline, "-");
        assert_eq!(row.ah, "yes");
    }
}
