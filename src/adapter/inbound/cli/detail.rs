//! Handler for the `detail` command.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::command::DetailArgs;
use super::listing::or_dash;
use super::{open_source, output};
use crate::domain::listing::{normalize_code, ListingRecord};
use crate::domain::offering::{Mechanism, OfferingParameters};
use crate::error::{Result, SourceError};
use crate::infrastructure::config::Config;

/// Normalised offering as printed by `detail`.
#[derive(Debug, Serialize)]
struct OfferingView {
    total_lots_offered: u64,
    public_tranche_lots: u64,
    #[serde(with = "rust_decimal::serde::float")]
    board_lot_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    oversubscription: Decimal,
    mechanism: Mechanism,
    #[serde(with = "rust_decimal::serde::float_option")]
    group_split: Option<Decimal>,
}

impl From<&OfferingParameters> for OfferingView {
    fn from(offering: &OfferingParameters) -> Self {
        Self {
            total_lots_offered: offering.total_lots_offered(),
            public_tranche_lots: offering.public_tranche_lots(),
            board_lot_price: offering.board_lot_price(),
            oversubscription: offering.oversubscription_multiple(),
            mechanism: offering.mechanism(),
            group_split: offering.group_split().map(|split| split.ratio()),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetailReport<'a> {
    listing: &'a ListingRecord,
    offering: Option<OfferingView>,
    message: Option<String>,
}

/// Execute `detail`.
pub async fn execute(args: &DetailArgs, config: &Config) -> Result<()> {
    let source = open_source(args.source.as_deref(), config)?;
    let listing = source.listing(&args.code).await?;

    // A listing without a multiple or final price is still worth showing.
    let (offering, message) = match source.fetch_offering_parameters(&args.code, args.oversub).await
    {
        Ok(offering) => (Some(OfferingView::from(&offering)), None),
        Err(err @ SourceError::Malformed { .. }) => {
            warn!(code = %args.code, error = %err, "Listing cannot be normalised");
            (None, Some(err.to_string()))
        }
        Err(err) => return Err(err.into()),
    };

    let report = DetailReport {
        listing: &listing,
        offering,
        message,
    };
    if output::is_json() {
        return output::document(&report);
    }

    render(&report);
    Ok(())
}

fn render(report: &DetailReport<'_>) {
    let listing = report.listing;
    output::section(&format!(
        "{} {}",
        normalize_code(&listing.code),
        listing.name
    ));
    output::field("Offer price", or_dash(&listing.offer_price));
    output::field("Price range", or_dash(&listing.price_range));
    output::field("Lot size", listing.lot_size);
    output::field(
        "Entry fee",
        listing
            .entry_fee
            .map_or_else(|| "-".to_string(), |fee| format!("HK${}", fee.round_dp(2))),
    );
    output::field("Deadline", or_dash(&listing.deadline));
    output::field("Listing date", or_dash(&listing.listing_date));
    output::field("Total shares", or_dash(&listing.total_shares));
    output::field("Public shares", or_dash(&listing.public_shares));
    for entry in &listing.clawback {
        output::field(&format!("Clawback {}", entry.condition), format!("{}%", entry.ratio));
    }
    if listing.is_ah_stock {
        output::field(
            "A-share code",
            listing.a_share_code.as_deref().unwrap_or("-"),
        );
    }

    output::section("Offering");
    match &report.offering {
        Some(offering) => {
            output::field("Board lot", format!("HK${}", offering.board_lot_price));
            output::field("Lots offered", offering.total_lots_offered);
            output::field(
                "Public tranche",
                format!(
                    "{} lots (mechanism {})",
                    offering.public_tranche_lots, offering.mechanism
                ),
            );
            output::field(
                "Oversubscribed",
                output::highlight(format!("{}x", offering.oversubscription)),
            );
            if let Some(split) = offering.group_split {
                output::field("Group A share", split);
            }
        }
        None => output::field("Status", output::muted("not available")),
    }
    if let Some(message) = &report.message {
        output::note(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::offering::GroupSplit;
    use rust_decimal_macros::dec;

    #[test]
    fn view_carries_normalised_values() {
        let offering = OfferingParameters::builder()
            .total_lots_offered(40_000)
            .public_tranche_lots(12_000)
            .oversubscription_multiple(dec!(38))
            .mechanism(Mechanism::A)
            .board_lot_price(dec!(3400))
            .group_split(Some(GroupSplit::try_new(dec!(0.4)).unwrap()))
            .build()
            .unwrap();

        let json = serde_json::to_value(OfferingView::from(&offering)).unwrap();
        assert_eq!(json["public_tranche_lots"], 12_000);
        assert_eq!(json["board_lot_price"], 3400.0);
        assert_eq!(json["mechanism"], "A");
        assert_eq!(json["group_split"], 0.4);
    }
}
