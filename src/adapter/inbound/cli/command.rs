//! Command-line interface definitions.
//!
//! Defines the CLI structure for hkipo using `clap`: the allocation odds
//! simulator, A/H discount helpers, listing views and configuration checks.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::offering::Mechanism;

/// Hong Kong IPO subscription data and allocation odds
#[derive(Parser, Debug)]
#[command(name = "hkipo")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file [default: ~/.hkipo/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the chance of receiving at least one board lot
    Odds(OddsArgs),

    /// Discount of an H-share price against its A-share quote
    Discount(DiscountArgs),

    /// Compare a listing with its A-share counterpart
    Ah(AhArgs),

    /// List IPOs in the listing snapshot
    List(SourceArgs),

    /// Show one listing with its normalised offering
    Detail(DetailArgs),

    /// Group open IPOs by application deadline
    Calendar(SourceArgs),

    /// Past listings with their one-lot win rates
    History(HistoryArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `hkipo config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Allocation mechanism flag.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MechanismArg {
    /// Clawback mechanism
    A,
    /// Fixed public tranche
    B,
}

impl From<MechanismArg> for Mechanism {
    fn from(arg: MechanismArg) -> Self {
        match arg {
            MechanismArg::A => Self::A,
            MechanismArg::B => Self::B,
        }
    }
}

/// Shared argument for commands reading the listing snapshot.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Listing snapshot file (overrides `[source] snapshot`).
    #[arg(long)]
    pub source: Option<PathBuf>,
}

/// Arguments for the `odds` subcommand.
///
/// Either describe the offering directly (`--price`, `--oversub`, ...) or
/// name a listing with `--code` and let the snapshot supply the rest.
#[derive(Args, Debug)]
pub struct OddsArgs {
    /// Stock code to look up in the listing snapshot.
    #[arg(long, conflicts_with_all = ["price", "lots_offered", "public_lots", "split", "mechanism"])]
    pub code: Option<String>,

    /// Listing snapshot file (with --code).
    #[arg(long, requires = "code")]
    pub source: Option<PathBuf>,

    /// Cost of one board lot in HKD.
    #[arg(long, allow_negative_numbers = true, required_unless_present = "code")]
    pub price: Option<Decimal>,

    /// Public oversubscription multiple (e.g. 38 for 38x).
    #[arg(long, allow_negative_numbers = true, required_unless_present = "code")]
    pub oversub: Option<Decimal>,

    /// Total board lots in the offering.
    #[arg(long)]
    pub lots_offered: Option<u64>,

    /// Board lots in the public tranche after clawback.
    #[arg(long)]
    pub public_lots: Option<u64>,

    /// Group A's share of the public tranche, between 0 and 1.
    #[arg(long)]
    pub split: Option<Decimal>,

    /// Allocation mechanism.
    #[arg(long, value_enum, ignore_case = true)]
    pub mechanism: Option<MechanismArg>,

    /// Comma-separated lot tiers to evaluate (default: canonical tiers).
    #[arg(long, value_delimiter = ',')]
    pub tiers: Vec<u64>,
}

/// Arguments for the `detail` subcommand.
#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Stock code of the listing.
    pub code: String,

    /// Oversubscription multiple used for clawback (overrides the snapshot).
    #[arg(long, allow_negative_numbers = true)]
    pub oversub: Option<Decimal>,

    /// Listing snapshot file (overrides `[source] snapshot`).
    #[arg(long)]
    pub source: Option<PathBuf>,
}

/// Arguments for the `history` subcommand.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Maximum number of listings to show.
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    /// Listing snapshot file (overrides `[source] snapshot`).
    #[arg(long)]
    pub source: Option<PathBuf>,
}

/// Arguments for the `discount` subcommand.
#[derive(Args, Debug)]
pub struct DiscountArgs {
    /// H-share price in HKD.
    #[arg(long, allow_negative_numbers = true)]
    pub h_price: Decimal,

    /// A-share price in CNY.
    #[arg(long, allow_negative_numbers = true)]
    pub a_price: Decimal,

    /// CNY to HKD rate (overrides `[discount] cny_hkd_rate`).
    #[arg(long, allow_negative_numbers = true)]
    pub fx_rate: Option<Decimal>,
}

/// Arguments for the `ah` subcommand.
#[derive(Args, Debug)]
pub struct AhArgs {
    /// Stock code of the H-share listing.
    pub code: String,

    /// Current A-share price in CNY.
    #[arg(long, allow_negative_numbers = true)]
    pub a_price: Option<Decimal>,

    /// CNY to HKD rate (overrides `[discount] cny_hkd_rate`).
    #[arg(long, allow_negative_numbers = true)]
    pub fx_rate: Option<Decimal>,

    /// Listing snapshot file (overrides `[source] snapshot`).
    #[arg(long)]
    pub source: Option<PathBuf>,
}
