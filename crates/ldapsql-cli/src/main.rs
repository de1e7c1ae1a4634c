//! ldapsql command line front end
//!
//! Loads `ldapsql.yaml` (plus environment overrides), initializes logging on
//! stderr and runs one subcommand. Results go to stdout; any failure exits
//! with status 1.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod commands;
mod config;
mod logging;

use cli::{Cli, Command};
use config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init(&config.logging).context("failed to initialize logging")?;

    match &cli.command {
        Command::Translate(args) => commands::translate(&config.translator, args),
        Command::Check(args) => commands::check(args),
    }
}
