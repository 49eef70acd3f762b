//! Handler for the `odds` command.

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use tracing::{info, warn};

use super::command::OddsArgs;
use super::{open_source, output};
use crate::domain::odds::{canonical_tiers, compute_odds, AllocationOddsTable, GroupPool};
use crate::domain::offering::{GroupSplit, Mechanism, OfferingParameters};
use crate::domain::{AllocationOddsRow, DomainError, Group};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// JSON document printed with `--json`.
#[derive(Serialize)]
struct OddsReport<'a> {
    code: Option<&'a str>,
    #[serde(with = "rust_decimal::serde::float")]
    oversubscription: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    board_lot_price: Decimal,
    public_tranche_lots: u64,
    mechanism: Mechanism,
    pools: &'a [GroupPool],
    rows: &'a [AllocationOddsRow],
}

#[derive(Tabled)]
struct OddsRow {
    #[tabled(rename = "Lots")]
    lots: u64,
    #[tabled(rename = "Capital (HKD)")]
    capital: String,
    #[tabled(rename = "Win %")]
    probability: String,
    #[tabled(rename = "Group")]
    group: Group,
}

impl From<&AllocationOddsRow> for OddsRow {
    fn from(row: &AllocationOddsRow) -> Self {
        Self {
            lots: row.lots_requested,
            capital: row.capital_required.round_dp(2).to_string(),
            probability: format!("{}%", row.win_probability_percent),
            group: row.group,
        }
    }
}

/// Execute `odds`.
pub async fn execute(args: &OddsArgs, config: &Config) -> Result<()> {
    let policy = config.policy.odds_policy()?;

    let offering = match &args.code {
        Some(code) => {
            let source = open_source(args.source.as_deref(), config)?;
            info!(code = %code, source = source.name(), "Resolving offering");
            source.fetch_offering_parameters(code, args.oversub).await?
        }
        None => offering_from_args(args, config)?,
    };

    let tiers = if args.tiers.is_empty() {
        canonical_tiers(&offering, &policy)
    } else {
        args.tiers.clone()
    };

    let table = compute_odds(&offering, &tiers, &policy)?;
    info!(rows = table.len(), "Computed allocation odds");

    if output::is_json() {
        return output::document(&OddsReport {
            code: offering.code(),
            oversubscription: offering.oversubscription_multiple(),
            board_lot_price: offering.board_lot_price(),
            public_tranche_lots: offering.public_tranche_lots(),
            mechanism: offering.mechanism(),
            pools: table.pools(),
            rows: table.rows(),
        });
    }

    render(&offering, &table);
    Ok(())
}

/// Offering described entirely by command-line flags.
///
/// Without `--lots-offered`/`--public-lots` the configured nominal pool is
/// assumed; the odds then depend on it only through the guaranteed
/// threshold and the largest tier.
fn offering_from_args(args: &OddsArgs, config: &Config) -> Result<OfferingParameters> {
    let price = args
        .price
        .ok_or_else(|| DomainError::invalid("board_lot_price", "--price is required"))?;
    let multiple = args.oversub.ok_or_else(|| {
        DomainError::invalid("oversubscription_multiple", "--oversub is required")
    })?;

    let total_lots = match (args.lots_offered, args.public_lots) {
        (Some(total), _) => total,
        (None, Some(public)) => public,
        (None, None) => {
            let nominal = config.policy.nominal_public_lots;
            warn!(
                lots = nominal,
                "No tranche size given; assuming the nominal public pool"
            );
            nominal
        }
    };

    let split = args.split.map(GroupSplit::try_new).transpose()?;
    let mut builder = OfferingParameters::builder()
        .total_lots_offered(total_lots)
        .oversubscription_multiple(multiple)
        .mechanism(args.mechanism.map(Into::into).unwrap_or_default())
        .board_lot_price(price)
        .group_split(split);
    if let Some(public) = args.public_lots {
        builder = builder.public_tranche_lots(public);
    }

    Ok(builder.build()?)
}

fn render(offering: &OfferingParameters, table: &AllocationOddsTable) {
    let title = match offering.code() {
        Some(code) => format!("Allocation odds for {code}"),
        None => "Allocation odds".to_string(),
    };
    output::section(&title);
    output::field(
        "Oversubscribed",
        output::highlight(format!("{}x", offering.oversubscription_multiple())),
    );
    output::field("Board lot", format!("HK${}", offering.board_lot_price()));
    output::field(
        "Public tranche",
        format!(
            "{} lots (mechanism {})",
            offering.public_tranche_lots(),
            offering.mechanism()
        ),
    );
    for pool in table.pools() {
        output::field(
            &format!("Group {} pool", pool.group),
            format!(
                "{} lots, guaranteed from {} lots",
                pool.lots, pool.guaranteed_threshold
            ),
        );
    }

    output::table(table.rows().iter().map(OddsRow::from));

    if offering.oversubscription_multiple() <= Decimal::ONE {
        output::note("Undersubscribed: every valid application is filled.");
    } else if let Some(first) = table.rows().first() {
        output::note(&format!(
            "{} lot(s) wins {} of the time.",
            first.lots_requested,
            output::positive(format!("{}%", first.win_probability_percent))
        ));
    }
}
