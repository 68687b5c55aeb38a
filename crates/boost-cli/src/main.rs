//! # boost CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use boost_cli::config::CliConfig;
use boost_cli::inspect::{run_validate, run_variables, ValidateArgs, VariablesArgs};
use boost_cli::issue::{run_issue, IssueArgs};
use boost_cli::preset::{run_preset, PresetArgs};
use boost_cli::transform::{run_parse, run_render, ParseArgs, RenderArgs};

/// Boost credential templates
///
/// Build OBv3 credential templates from presets, render them to credential
/// JSON with `{{variable}}` placeholders, read credentials back, and fill
/// placeholders at issuance.
#[derive(Parser, Debug)]
#[command(name = "boost", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List presets or print one.
    Preset(PresetArgs),

    /// Render a template file into credential JSON.
    Render(RenderArgs),

    /// Read credential JSON back into a template file.
    Parse(ParseArgs),

    /// List the variables a template or credential needs.
    Variables(VariablesArgs),

    /// Check that a template has its required fields.
    Validate(ValidateArgs),

    /// Render a template and fill every placeholder.
    Issue(IssueArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("boost CLI starting");

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Commands::Preset(args) => run_preset(&args, &config),
        Commands::Render(args) => run_render(&args),
        Commands::Parse(args) => run_parse(&args),
        Commands::Variables(args) => run_variables(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Issue(args) => run_issue(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
