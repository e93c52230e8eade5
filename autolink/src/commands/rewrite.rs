// autolink/src/commands/rewrite.rs
//! The `rewrite` command: load rules, rewrite one document, emit the result.
//!
//! Output goes to stdout or to `--output`. With `--diff` a line diff is printed
//! instead of the rewritten text. `--summary` reports pass statistics on stderr.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};

use autolink_core::{headless_rewrite_with_report, AutolinkConfig, RewriteReport};

use crate::cli::RewriteCommand;
use crate::commands::{info_msg, read_input, resolve_config_path, warn_msg};
use crate::ui::diff_viewer;

/// Runs the `rewrite` command.
pub fn run_rewrite(cmd: &RewriteCommand) -> Result<()> {
    let config_path = resolve_config_path(cmd.config.as_deref())?;
    info!("Loading link rules from {}", config_path.display());
    let mut config = AutolinkConfig::load_from_file(&config_path)?;
    if !cmd.disable.is_empty() {
        config.disable_links(&cmd.disable);
    }

    let input = read_input(cmd.input_file.as_deref())?;
    debug!("Read {} bytes of input.", input.len());

    let (rewritten, report) = headless_rewrite_with_report(&config, &input);

    if cmd.diff {
        let stdout = io::stdout();
        let supports_color = cmd.output.is_none() && stdout.is_terminal();
        let mut buf = Vec::new();
        diff_viewer::print_diff(&input, &rewritten, &mut buf, supports_color)
            .context("Failed to render diff")?;
        emit(cmd, &buf)?;
    } else {
        emit(cmd, rewritten.as_bytes())?;
    }

    if cmd.summary {
        print_summary(&report);
    }
    Ok(())
}

fn emit(cmd: &RewriteCommand, bytes: &[u8]) -> Result<()> {
    match &cmd.output {
        Some(path) => {
            fs::write(path, bytes)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info_msg(format!("Output written to {}", path.display()));
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(bytes).context("Failed to write to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

fn print_summary(report: &RewriteReport) {
    info_msg(format!(
        "Rewrite summary: {} text spans visited, {} rewritten.",
        report.spans_visited, report.spans_rewritten
    ));
    for fault in &report.faults {
        warn_msg(format!("Skipped span: {}", fault));
    }
}
