//! rigwatch CLI binary entrypoint.
//!
//! This is the main entry point for the `rigwatch` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rig_cli::cli::{Cli, Commands};
use rig_cli::commands::{AnalyzeCommand, RulesCommand};
use rig_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), rig_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Analyze(args) => {
            let cmd = AnalyzeCommand::new();
            cmd.execute(&mut stdout, &format, &args)?;
        }
        Commands::Rules => {
            let cmd = RulesCommand::new();
            cmd.execute(&mut stdout, &format)?;
        }
    }

    Ok(())
}
