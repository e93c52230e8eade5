//! Formatting for status messages written to stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Prints an informational message.
pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", msg.cyan())
    } else {
        writeln!(writer, "{}", msg)
    }
}

/// Prints a warning, prefixed so it stands out without colour.
pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Warning:".yellow().bold(), msg.yellow())
    } else {
        writeln!(writer, "Warning: {}", msg)
    }
}

/// Prints an error message.
pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Error:".red().bold(), msg.red())
    } else {
        writeln!(writer, "Error: {}", msg)
    }
}
