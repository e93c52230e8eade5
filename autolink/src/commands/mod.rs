//! Command implementations for the autolink CLI.

pub mod check;
pub mod rewrite;

use anyhow::{bail, Context, Result};
use log::debug;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::ui::output_format;

/// Location of the rule file used when none is given.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("autolink").join("links.yaml"))
}

/// Picks the rule file: the explicit path (flag or `AUTOLINK_CONFIG`), else the
/// per-user default if it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!("Using default rule file {}", path.display());
            Ok(path)
        }
        Some(path) => bail!(
            "No rule file given and {} does not exist. Pass --config or set AUTOLINK_CONFIG.",
            path.display()
        ),
        None => bail!("No rule file given. Pass --config or set AUTOLINK_CONFIG."),
    }
}

/// Reads the whole input, from a file or stdin.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Helper for printing warnings to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    let _ = output_format::print_warn_message(&mut stderr.lock(), msg.as_ref(), supports_color);
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    let _ = output_format::print_info_message(&mut stderr.lock(), msg.as_ref(), supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    let _ = output_format::print_error_message(&mut stderr.lock(), msg.as_ref(), supports_color);
}
