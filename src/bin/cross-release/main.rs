//! cross-release CLI - cross-compile and package release binaries

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod exit;

use cli::{BuildArgs, Cli, Commands};
use exit::ExitStatus;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.global.verbose {
        EnvFilter::new("cross_release=debug")
    } else {
        EnvFilter::new("cross_release=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    match run(cli) {
        Ok(()) => ExitStatus::Success.into(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitStatus::from_error(&e).into()
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let global = cli.global;

    match cli.command.unwrap_or_else(|| Commands::Build(BuildArgs::default())) {
        Commands::Build(args) => commands::build::execute(&global, args),
        Commands::Init(args) => commands::init::execute(&global, args),
        Commands::Version => commands::version::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
