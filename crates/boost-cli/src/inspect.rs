//! # Inspect: Variable listing and advisory validation.
//!
//! ```bash
//! boost variables badge.template.json
//! boost variables received.json --credential --json
//! boost validate badge.template.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use boost_core::CredentialTemplate;
use boost_template::{
    extract_variables_by_type, extract_variables_from_raw_json, validate_template,
    ExtractedVariables,
};

use crate::{emit, read_json, read_template};

/// Arguments for `boost variables`.
#[derive(Args, Debug)]
pub struct VariablesArgs {
    /// Template file, or credential JSON with `--credential`.
    pub file: PathBuf,

    /// Treat the input as raw credential JSON rather than a template file.
    #[arg(long)]
    pub credential: bool,

    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `boost validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Template file to check.
    pub template: PathBuf,
}

/// List the variables a template or credential references.
pub fn run_variables(args: &VariablesArgs) -> Result<u8> {
    let vars = if args.credential {
        extract_variables_from_raw_json(&read_json(&args.file)?)
    } else {
        extract_variables_by_type(&read_template(&args.file)?)
    };

    if args.json {
        emit(&vars, None)?;
    } else {
        print_variables(&vars);
    }
    Ok(0)
}

fn print_variables(vars: &ExtractedVariables) {
    println!("System variables (filled at issuance):");
    for name in &vars.system {
        println!("  {name}");
    }
    println!();
    println!("Dynamic variables (supplied per recipient):");
    for name in &vars.dynamic {
        println!("  {name}");
    }
    println!();
    println!(
        "Total: {} system, {} dynamic",
        vars.system.len(),
        vars.dynamic.len()
    );
}

/// Check a template's required fields. Exit code 1 when any are missing.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let template = read_template(&args.template)?;
    let errors = match &template {
        CredentialTemplate::Obv3(t) => validate_template(t),
        CredentialTemplate::Passthrough(p) => {
            tracing::info!(schema = %p.schema_type, "raw credentials are not validated");
            Vec::new()
        }
    };

    if errors.is_empty() {
        println!("OK: {}", args.template.display());
        return Ok(0);
    }
    for error in &errors {
        println!("FAIL: {error}");
    }
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boost_core::static_field;
    use boost_template::instantiate_preset;

    fn write_template(dir: &std::path::Path, template: CredentialTemplate) -> PathBuf {
        let path = dir.join("t.template.json");
        emit(&template, Some(&path)).unwrap();
        path
    }

    #[test]
    fn validate_blank_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), instantiate_preset("blank").unwrap().into());
        assert_eq!(run_validate(&ValidateArgs { template: path }).unwrap(), 1);
    }

    #[test]
    fn validate_complete_template_passes() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = instantiate_preset("badge").unwrap();
        t.issuer.name = static_field("Troop 42");
        let path = write_template(dir.path(), t.into());
        assert_eq!(run_validate(&ValidateArgs { template: path }).unwrap(), 0);
    }

    #[test]
    fn variables_for_template_and_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), instantiate_preset("badge").unwrap().into());
        let args = VariablesArgs {
            file: path,
            credential: false,
            json: true,
        };
        assert_eq!(run_variables(&args).unwrap(), 0);

        let raw = dir.path().join("raw.json");
        std::fs::write(&raw, r#"{"issuer": "{{issuer_did}}", "name": "{{title}}"}"#).unwrap();
        let args = VariablesArgs {
            file: raw,
            credential: true,
            json: false,
        };
        assert_eq!(run_variables(&args).unwrap(), 0);
    }
}
