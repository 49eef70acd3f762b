//! Handler for the `calendar` command.

use serde_json::json;
use tabled::Tabled;

use super::command::SourceArgs;
use super::listing::or_dash;
use super::{open_source, output};
use crate::domain::calendar::{group_by_deadline, RoundEntry};
use crate::error::Result;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct RoundRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Entry fee")]
    entry_fee: String,
    #[tabled(rename = "Listing")]
    listing_date: String,
}

impl From<&RoundEntry> for RoundRow {
    fn from(entry: &RoundEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
            entry_fee: entry
                .entry_fee
                .map_or_else(|| "-".to_string(), |fee| fee.round_dp(2).to_string()),
            listing_date: or_dash(&entry.listing_date),
        }
    }
}

/// Execute `calendar`.
pub async fn execute(args: &SourceArgs, config: &Config) -> Result<()> {
    let source = open_source(args.source.as_deref(), config)?;
    let rounds = group_by_deadline(&source.listings().await?);

    if output::is_json() {
        return output::document(&json!({ "rounds": rounds }));
    }

    if rounds.is_empty() {
        output::note("No IPOs open for subscription.");
        return Ok(());
    }
    for round in &rounds {
        let deadline = if round.deadline.is_empty() {
            "Deadline unknown".to_string()
        } else {
            format!("Deadline {}", round.deadline)
        };
        output::section(&deadline);
        output::table(round.ipos.iter().map(RoundRow::from));
    }
    Ok(())
}
