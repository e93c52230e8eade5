// autolink/src/ui/diff_viewer.rs
//! Unified diff between the original and the rewritten text.
//!
//! Removed lines are shown in red and added lines in green when the writer is
//! a colour terminal.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes a line-level diff of `original` against `rewritten`.
pub fn print_diff<W: Write>(
    original: &str,
    rewritten: &str,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, rewritten);
    let header = "--- Diff Analysis ---";
    if supports_color {
        writeln!(writer, "{}", header.yellow().bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let mut changed = false;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    changed = true;
                    let text = format!("- {}", s.trim_end_matches('\n'));
                    if supports_color {
                        writeln!(writer, "{}", text.red())?;
                    } else {
                        writeln!(writer, "{}", text)?;
                    }
                }
                DiffLine::Insert(s) => {
                    changed = true;
                    let text = format!("+ {}", s.trim_end_matches('\n'));
                    if supports_color {
                        writeln!(writer, "{}", text.green())?;
                    } else {
                        writeln!(writer, "{}", text)?;
                    }
                }
                DiffLine::Context(s) => {
                    writeln!(writer, "  {}", s.trim_end_matches('\n'))?;
                }
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes detected.")?;
    }
    Ok(())
}
