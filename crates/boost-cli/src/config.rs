//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Supplies issuer profile
//! values and issuance defaults so they need not be repeated on every
//! invocation. Command-line flags take precedence.
//!
//! ```yaml
//! issuer_name: Open Academy
//! issuer_image: https://academy.example/logo.png
//! issuer_did: did:web:academy.example
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use boost_template::IssuerDefaults;

/// Settings read from the `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Issuer display name applied to new templates.
    pub issuer_name: Option<String>,
    /// Issuer image URL applied to new templates.
    pub issuer_image: Option<String>,
    /// DID substituted for `{{issuer_did}}` at issuance.
    pub issuer_did: Option<String>,
    /// DID substituted for `{{recipient_did}}` at issuance.
    pub recipient_did: Option<String>,
}

impl CliConfig {
    /// Load the config file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Issuer profile values for preset instantiation.
    pub fn issuer_defaults(&self) -> IssuerDefaults {
        IssuerDefaults {
            name: self.issuer_name.clone(),
            image: self.issuer_image.clone(),
        }
    }
}
