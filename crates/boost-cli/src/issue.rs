//! # Issue CLI: Render a template and fill every placeholder.
//!
//! Reserved placeholders come from flags or the config file; everything
//! else comes from repeated `--var name=value` arguments.
//!
//! ```bash
//! boost issue badge.template.json \
//!     --var badge_name="Knot Tying" --var recipient_name=Ada \
//!     --issuer-did did:web:troop42.example
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use boost_template::{issue, IssuanceContext, VariableValues};

use crate::config::CliConfig;
use crate::{emit, read_template};

/// Arguments for `boost issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Template file to issue.
    pub template: PathBuf,

    /// Value for a dynamic variable, as `name=value`. Repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Issuer DID. Overrides `issuer_did` from the config file.
    #[arg(long)]
    pub issuer_did: Option<String>,

    /// Recipient DID. Overrides `recipient_did` from the config file.
    #[arg(long)]
    pub recipient_did: Option<String>,

    /// Issuance timestamp (RFC 3339). Defaults to now.
    #[arg(long)]
    pub issued_at: Option<DateTime<Utc>>,

    /// Write the credential to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Parse a `name=value` pair. The value may itself contain `=`.
fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    if name.is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Execute `boost issue`.
pub fn run_issue(args: &IssueArgs, config: &CliConfig) -> Result<u8> {
    let template = read_template(&args.template)?;

    let issuer_did = args
        .issuer_did
        .clone()
        .or_else(|| config.issuer_did.clone())
        .context("an issuer DID is required: pass --issuer-did or set issuer_did in the config")?;
    let mut context = IssuanceContext::new(issuer_did);
    if let Some(recipient) = args.recipient_did.clone().or_else(|| config.recipient_did.clone()) {
        context = context.with_recipient(recipient);
    }
    if let Some(issued_at) = args.issued_at {
        context = context.issued_at(issued_at);
    }

    let values: VariableValues = args.vars.iter().cloned().collect();
    let credential = issue(&template, &values, &context)
        .with_context(|| format!("cannot issue {}", args.template.display()))?;
    emit(&credential, args.out.as_deref())?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boost_core::CredentialTemplate;
    use boost_template::instantiate_preset;

    fn badge_template(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("badge.template.json");
        let template: CredentialTemplate = instantiate_preset("badge").unwrap().into();
        emit(&template, Some(&path)).unwrap();
        path
    }

    fn badge_vars() -> Vec<(String, String)> {
        [
            ("badge_name", "Knot Tying"),
            ("badge_description", "Tied six knots"),
            ("badge_image", "https://troop42.example/knots.png"),
            ("criteria", "Demonstrate six knots"),
            ("recipient_name", "Ada"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn parse_var_splits_on_first_equals() {
        assert_eq!(
            parse_var("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_var("empty=").unwrap(), ("empty".to_string(), String::new()));
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
    }

    #[test]
    fn issue_writes_resolved_credential() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("issued.json");
        let args = IssueArgs {
            template: badge_template(dir.path()),
            vars: badge_vars(),
            issuer_did: None,
            recipient_did: None,
            issued_at: Some("2024-06-01T12:00:00Z".parse().unwrap()),
            out: Some(out.clone()),
        };
        let config = CliConfig {
            issuer_did: Some("did:web:troop42.example".into()),
            ..Default::default()
        };

        assert_eq!(run_issue(&args, &config).unwrap(), 0);
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["issuer"], "did:web:troop42.example");
        assert_eq!(json["issuanceDate"], "2024-06-01T12:00:00Z");
        assert_eq!(json["credentialSubject"]["name"], "Ada");
    }

    #[test]
    fn issue_without_issuer_did_errors() {
        let dir = tempfile::tempdir().unwrap();
        let args = IssueArgs {
            template: badge_template(dir.path()),
            vars: badge_vars(),
            issuer_did: None,
            recipient_did: None,
            issued_at: None,
            out: None,
        };
        let err = run_issue(&args, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("issuer DID is required"));
    }

    #[test]
    fn issue_reports_missing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let args = IssueArgs {
            template: badge_template(dir.path()),
            vars: Vec::new(),
            issuer_did: Some("did:web:troop42.example".into()),
            recipient_did: None,
            issued_at: None,
            out: None,
        };
        let err = run_issue(&args, &CliConfig::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("missing values for template variables"));
        assert!(message.contains("badge_name"));
    }
}
