//! # Render and Parse: Convert between template files and credentials.
//!
//! ```bash
//! boost render badge.template.json --out badge.json
//! boost parse received-credential.json --out received.template.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use boost_template::{parse_template, template_to_json};

use crate::{emit, read_template};

/// Arguments for `boost render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template file to render.
    pub template: PathBuf,

    /// Write the credential to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `boost parse`.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Credential JSON to read back into a template.
    pub credential: PathBuf,

    /// Write the template to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Render a template file into credential JSON.
pub fn run_render(args: &RenderArgs) -> Result<u8> {
    let template = read_template(&args.template)?;
    tracing::debug!(schema = %template.schema_type(), "rendering template");
    emit(&template_to_json(&template), args.out.as_deref())?;
    Ok(0)
}

/// Read credential JSON back into a template file.
pub fn run_parse(args: &ParseArgs) -> Result<u8> {
    let text = std::fs::read_to_string(&args.credential)
        .with_context(|| format!("failed to read {}", args.credential.display()))?;
    let template = parse_template(&text)
        .with_context(|| format!("failed to parse {}", args.credential.display()))?;
    tracing::info!(schema = %template.schema_type(), "parsed credential");
    emit(&template, args.out.as_deref())?;
    Ok(0)
}
