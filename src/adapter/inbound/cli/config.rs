//! Handler for the `config` command group.

use std::path::Path;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `config show`.
pub fn execute_show(config: &Config, path: Option<&Path>) -> Result<()> {
    if output::is_json() {
        return output::document(config);
    }

    output::section("Effective Configuration");
    output::field("File", describe(path));

    output::section("Policy");
    output::field(
        "Group threshold",
        format!("HK${}", config.policy.group_threshold_hkd),
    );
    output::field("Default split", config.policy.default_group_split);
    output::field(
        "Nominal pool",
        format!("{} lots", config.policy.nominal_public_lots),
    );
    output::field("Dilution", config.policy.model.dilution);
    output::field("Elasticity", config.policy.model.elasticity);

    output::section("Discount");
    output::field("CNY/HKD", config.discount.cny_hkd_rate);

    output::section("Source");
    match &config.source.snapshot {
        Some(snapshot) => output::field("Snapshot", snapshot.display()),
        None => output::field("Snapshot", output::muted("(none)")),
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

/// Execute `config validate`.
///
/// Loading already validated the file; reaching this point means it passed.
pub fn execute_validate(path: Option<&Path>) -> Result<()> {
    if output::is_json() {
        return output::document(&serde_json::json!({
            "valid": true,
            "path": path.map(|p| p.display().to_string()),
        }));
    }

    output::success("Configuration is valid");
    output::field("File", describe(path));
    Ok(())
}

fn describe(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "(built-in defaults)".to_string(),
    }
}
