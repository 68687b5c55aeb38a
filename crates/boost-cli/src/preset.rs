//! # Preset CLI: Browse the preset catalog.
//!
//! ```bash
//! boost preset list
//! boost preset show course-completion
//! boost preset show badge --render
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use boost_core::CredentialTemplate;
use boost_template::{instantiate_preset_with_issuer, obv3_to_json, presets};

use crate::config::CliConfig;
use crate::emit;

/// Preset subcommand arguments.
#[derive(Args, Debug)]
pub struct PresetArgs {
    #[command(subcommand)]
    pub command: PresetCommand,
}

/// Available preset subcommands.
#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// List every preset.
    List,

    /// Print a preset as a template file.
    Show {
        /// Preset id (see `boost preset list`).
        id: String,

        /// Print the rendered credential instead of the template.
        #[arg(long)]
        render: bool,

        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Execute the preset subcommand.
pub fn run_preset(args: &PresetArgs, config: &CliConfig) -> Result<u8> {
    match &args.command {
        PresetCommand::List => run_list(),
        PresetCommand::Show { id, render, out } => run_show(id, *render, out.as_deref(), config),
    }
}

fn run_list() -> Result<u8> {
    let all = presets();
    println!("Available presets:");
    println!();
    for p in &all {
        println!("  {:<18} {} {}: {}", p.id, p.icon, p.name, p.description);
    }
    println!();
    println!("Total: {} presets", all.len());
    Ok(0)
}

fn run_show(
    id: &str,
    render: bool,
    out: Option<&std::path::Path>,
    config: &CliConfig,
) -> Result<u8> {
    let Some(template) = instantiate_preset_with_issuer(id, &config.issuer_defaults()) else {
        let available = presets()
            .iter()
            .map(|p| p.id)
            .collect::<Vec<_>>()
            .join(", ");
        bail!("unknown preset '{id}'. Available: {available}");
    };

    if render {
        emit(&obv3_to_json(&template), out)?;
    } else {
        emit(&CredentialTemplate::from(template), out)?;
    }
    Ok(0)
}
