//! # Placeholder Grammar
//!
//! A string value in a credential may be replaced wholesale by a Mustache
//! placeholder `{{identifier}}`, where `identifier` matches `\w+`. There is
//! no partial interpolation: `"Hello {{name}}"` is a literal string that
//! happens to contain braces.
//!
//! Three placeholder names are reserved for values the issuing platform
//! injects ([`SystemVariable`]). Downstream issuance tooling resolves them
//! from its own context rather than from the per-recipient payload.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Anchored pattern for a whole-string placeholder. `[[:word:]]` is the
/// ASCII word class, so non-ASCII letters never form a variable name.
pub const PLACEHOLDER_PATTERN: &str = r"^\{\{([[:word:]]+)\}\}$";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Return the variable name if `s` is exactly one placeholder.
pub fn parse_placeholder(s: &str) -> Option<&str> {
    PLACEHOLDER_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Render a variable name as a placeholder string.
pub fn placeholder(variable_name: &str) -> String {
    format!("{{{{{variable_name}}}}}")
}

/// Placeholder names reserved for platform-injected values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemVariable {
    /// The issuing profile's DID.
    IssuerDid,
    /// The issuance timestamp.
    IssueDate,
    /// The recipient's DID.
    RecipientDid,
}

impl SystemVariable {
    /// All reserved names, in placeholder-name order.
    pub const ALL: [SystemVariable; 3] = [
        SystemVariable::IssueDate,
        SystemVariable::IssuerDid,
        SystemVariable::RecipientDid,
    ];

    /// Look up a reserved name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "issuer_did" => Some(Self::IssuerDid),
            "issue_date" => Some(Self::IssueDate),
            "recipient_did" => Some(Self::RecipientDid),
            _ => None,
        }
    }

    /// The placeholder variable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IssuerDid => "issuer_did",
            Self::IssueDate => "issue_date",
            Self::RecipientDid => "recipient_did",
        }
    }

    /// Editor text shown next to a system-bound field.
    pub fn description(&self) -> &'static str {
        match self {
            Self::IssuerDid => "Your organization's DID (auto-filled at issuance)",
            Self::IssueDate => "Set to the current date and time at issuance",
            Self::RecipientDid => "The recipient's DID (auto-filled at issuance)",
        }
    }

    /// The full placeholder string, e.g. `{{issuer_did}}`.
    pub fn placeholder(&self) -> String {
        placeholder(self.as_str())
    }
}

impl fmt::Display for SystemVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_string_placeholder_parses() {
        assert_eq!(parse_placeholder("{{x}}"), Some("x"));
        assert_eq!(parse_placeholder("{{course_name}}"), Some("course_name"));
        assert_eq!(parse_placeholder("{{Score2}}"), Some("Score2"));
    }

    #[test]
    fn partial_or_malformed_placeholders_do_not_parse() {
        assert_eq!(parse_placeholder("a {{x}} b"), None);
        assert_eq!(parse_placeholder("{{x}} "), None);
        assert_eq!(parse_placeholder("{{}}"), None);
        assert_eq!(parse_placeholder("{{two words}}"), None);
        assert_eq!(parse_placeholder("{x}"), None);
        assert_eq!(parse_placeholder("{{x}}{{y}}"), None);
        assert_eq!(parse_placeholder("{{a-b}}"), None);
        assert_eq!(parse_placeholder(""), None);
        assert_eq!(parse_placeholder("{{café}}"), None);
    }

    #[test]
    fn placeholder_renders_double_braces() {
        assert_eq!(placeholder("issuer_did"), "{{issuer_did}}");
        assert_eq!(parse_placeholder(&placeholder("abc")), Some("abc"));
    }

    #[test]
    fn system_variables_round_trip_by_name() {
        for var in SystemVariable::ALL {
            assert_eq!(SystemVariable::from_name(var.as_str()), Some(var));
            assert_eq!(var.to_string(), var.as_str());
        }
        assert_eq!(SystemVariable::from_name("course_name"), None);
        assert_eq!(SystemVariable::IssuerDid.placeholder(), "{{issuer_did}}");
        assert_eq!(SystemVariable::IssueDate.placeholder(), "{{issue_date}}");
    }
}
