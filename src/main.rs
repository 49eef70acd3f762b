use clap::Parser;
use tracing::debug;

use hkipo::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use hkipo::adapter::inbound::cli::output::{self, OutputConfig};
use hkipo::adapter::inbound::cli::config as config_cmd;
use hkipo::adapter::inbound::cli::{
    ah, calendar, detail, diagnostic, discount, history, listing, odds, paths,
};
use hkipo::error::Result;
use hkipo::infrastructure::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(err) = run(cli).await {
        diagnostic::report(&err);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (config, config_path) = Config::resolve(cli.config.as_deref(), &paths::default_config())?;
    config.logging.init(output::verbosity());
    debug!(path = ?config_path, "Configuration loaded");

    match cli.command {
        Commands::Odds(args) => odds::execute(&args, &config).await,
        Commands::Discount(args) => discount::execute(&args, &config),
        Commands::Ah(args) => ah::execute(&args, &config).await,
        Commands::List(args) => listing::execute(&args, &config).await,
        Commands::Detail(args) => detail::execute(&args, &config).await,
        Commands::Calendar(args) => calendar::execute(&args, &config).await,
        Commands::History(args) => history::execute(&args, &config).await,
        Commands::Config(ConfigCommand::Show) => {
            config_cmd::execute_show(&config, config_path.as_deref())
        }
        Commands::Config(ConfigCommand::Validate) => {
            config_cmd::execute_validate(config_path.as_deref())
        }
    }
}
