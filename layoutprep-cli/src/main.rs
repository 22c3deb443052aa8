//! layoutprep command-line entry point

use clap::Parser;
use layoutprep_cli::commands::Commands;
use std::process::ExitCode;

/// Prepare document-layout training data from page images and OCR output
#[derive(Debug, Parser)]
#[command(name = "layoutprep", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Label(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
        Commands::List { subcommand } => subcommand.execute(),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from([
            "layoutprep", "process", "-i", "scans/*", "-o", "out", "--stride", "64", "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.input, vec!["scans/*"]);
                assert_eq!(args.stride, Some(64));
                assert_eq!(args.verbose, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_process_requires_input() {
        assert!(Cli::try_parse_from(["layoutprep", "process"]).is_err());
    }
}
