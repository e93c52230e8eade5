// autolink/src/main.rs
//! Autolink entry point.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use autolink::cli::{Cli, Commands};
use autolink::commands::{self, check, rewrite};
use autolink::logger;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(log::LevelFilter::Off)
    } else if cli.debug {
        Some(log::LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            commands::error_msg(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Rewrite(cmd) => rewrite::run_rewrite(cmd).map(|_| true),
        Commands::Check(cmd) => check::run_check(cmd),
    }
}
