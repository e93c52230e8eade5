// autolink/src/commands/check.rs
//! The `check` command: compile a rule file and report every problem found.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::info;

use autolink_core::{compile_rules, validate_links, AutolinkConfig};

use crate::cli::CheckCommand;
use crate::commands::{error_msg, info_msg, resolve_config_path, warn_msg};

/// Runs the `check` command. Returns `Ok(false)` when at least one rule would
/// be dropped at load time.
pub fn run_check(cmd: &CheckCommand) -> Result<bool> {
    let config_path = resolve_config_path(cmd.config.as_deref())?;
    info!("Checking link rules in {}", config_path.display());
    let config = AutolinkConfig::load_from_file(&config_path)?;

    for issue in validate_links(&config.links) {
        warn_msg(issue);
    }

    let compiled = compile_rules(&config.links);
    for err in &compiled.errors {
        error_msg(err.to_string());
    }

    info_msg(format!(
        "{} of {} rules compiled.",
        compiled.rules.len(),
        config.links.iter().filter(|l| l.enabled).count()
    ));
    Ok(compiled.is_clean())
}
