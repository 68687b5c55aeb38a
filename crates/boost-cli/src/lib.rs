//! # boost-cli: Command-Line Tool for Credential Templates
//!
//! Exposes the template transformer over files.
//!
//! ## Subcommands
//!
//! - `boost preset`: List presets or print one as a template or credential.
//! - `boost render`: Template file → credential JSON.
//! - `boost parse`: Credential JSON → template file.
//! - `boost variables`: Variables a template or credential needs.
//! - `boost validate`: Advisory checks on a template.
//! - `boost issue`: Render and fill every placeholder.
//!
//! ```bash
//! boost preset show badge > badge.template.json
//! boost variables badge.template.json
//! boost issue badge.template.json --var badge_name=Knots --issuer-did did:web:troop42.example
//! ```

pub mod config;
pub mod inspect;
pub mod issue;
pub mod preset;
pub mod transform;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use boost_core::CredentialTemplate;

/// Read a template file (the serialized form of [`CredentialTemplate`]).
pub fn read_template(path: &Path) -> Result<CredentialTemplate> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid template file", path.display()))
}

/// Read any JSON document.
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Pretty-print `value` to `out`, or to stdout when no path is given.
pub fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match out {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boost_template::blank_template;

    #[test]
    fn template_file_round_trips_through_emit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.template.json");
        let template: CredentialTemplate = blank_template().into();

        emit(&template, Some(&path)).unwrap();
        assert_eq!(read_template(&path).unwrap(), template);
    }

    #[test]
    fn read_template_rejects_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential.json");
        std::fs::write(&path, r#"{"type": ["VerifiableCredential"]}"#).unwrap();
        let err = read_template(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid template file"));
    }

    #[test]
    fn read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        let err = read_json(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
