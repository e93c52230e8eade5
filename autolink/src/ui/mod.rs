//! Terminal output helpers: status messages and the diff view.

pub mod diff_viewer;
pub mod output_format;
