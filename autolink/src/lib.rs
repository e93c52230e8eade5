// autolink/src/lib.rs
//! Library side of the `autolink` binary: argument definitions, command
//! implementations and terminal output helpers.
//!
//! License: MIT OR Apache-2.0

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
