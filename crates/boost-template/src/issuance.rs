//! # Issuance-Time Placeholder Resolution
//!
//! The downstream half of the placeholder contract. A rendered credential
//! still contains `{{variable}}` strings; at issuance the reserved names are
//! filled from platform context and every other name from the values the
//! issuer supplies per recipient.
//!
//! Only whole-string placeholders are replaced, in string values and in
//! object keys alike. Text such as `"Hello {{name}}"` is a literal and
//! passes through unchanged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

use boost_core::{parse_placeholder, CredentialTemplate, SystemVariable};

use crate::serialize::template_to_json;
use crate::variables::extract_variables_by_type;

/// Per-recipient values for dynamic variables, keyed by variable name.
pub type VariableValues = BTreeMap<String, String>;

/// Platform values for the reserved placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceContext {
    /// Fills `{{issuer_did}}`.
    pub issuer_did: String,
    /// Fills `{{recipient_did}}`, when known.
    pub recipient_did: Option<String>,
    /// Fills `{{issue_date}}`.
    pub issued_at: DateTime<Utc>,
}

impl IssuanceContext {
    /// Context for issuing now, with no recipient DID.
    pub fn new(issuer_did: impl Into<String>) -> Self {
        Self {
            issuer_did: issuer_did.into(),
            recipient_did: None,
            issued_at: Utc::now(),
        }
    }

    pub fn with_recipient(mut self, recipient_did: impl Into<String>) -> Self {
        self.recipient_did = Some(recipient_did.into());
        self
    }

    pub fn issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    fn system_value(&self, var: SystemVariable) -> Option<String> {
        match var {
            SystemVariable::IssuerDid => Some(self.issuer_did.clone()),
            SystemVariable::IssueDate => {
                Some(self.issued_at.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            SystemVariable::RecipientDid => self.recipient_did.clone(),
        }
    }
}

/// Errors from resolving placeholders at issuance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    /// Dynamic variables with no supplied value, sorted.
    #[error("missing values for template variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    /// The credential needs `{{recipient_did}}` but the context has none.
    #[error("credential references {{{{recipient_did}}}} but no recipient DID was provided")]
    MissingRecipient,
}

/// Dynamic variables of `template` that `values` does not supply, sorted.
///
/// Reserved names are excluded; they come from the [`IssuanceContext`].
pub fn missing_variables(template: &CredentialTemplate, values: &VariableValues) -> Vec<String> {
    extract_variables_by_type(template)
        .dynamic
        .into_iter()
        .filter(|name| !values.contains_key(name))
        .collect()
}

/// Replace every whole-string placeholder in `credential`.
///
/// Reserved names resolve from `context`; supplied values for reserved
/// names are ignored. All unresolved dynamic variables are reported
/// together.
pub fn resolve_placeholders(
    credential: &Value,
    values: &VariableValues,
    context: &IssuanceContext,
) -> Result<Value, IssuanceError> {
    let mut resolver = Resolver {
        values,
        context,
        missing: BTreeSet::new(),
        missing_recipient: false,
    };
    let resolved = resolver.resolve(credential);

    if !resolver.missing.is_empty() {
        return Err(IssuanceError::MissingVariables(
            resolver.missing.into_iter().collect(),
        ));
    }
    if resolver.missing_recipient {
        return Err(IssuanceError::MissingRecipient);
    }
    Ok(resolved)
}

/// Render `template` and resolve its placeholders.
pub fn issue(
    template: &CredentialTemplate,
    values: &VariableValues,
    context: &IssuanceContext,
) -> Result<Value, IssuanceError> {
    let credential = template_to_json(template);
    let resolved = resolve_placeholders(&credential, values, context)?;
    tracing::info!(
        schema = %template.schema_type(),
        issuer = %context.issuer_did,
        variables = values.len(),
        "resolved credential for issuance"
    );
    Ok(resolved)
}

struct Resolver<'a> {
    values: &'a VariableValues,
    context: &'a IssuanceContext,
    missing: BTreeSet<String>,
    missing_recipient: bool,
}

impl Resolver<'_> {
    fn resolve(&mut self, value: &Value) -> Value {
        match value {
            Value::String(s) => match parse_placeholder(s) {
                Some(name) => self.lookup(name).map(Value::String).unwrap_or_else(|| value.clone()),
                None => value.clone(),
            },
            Value::Array(items) => Value::Array(items.iter().map(|v| self.resolve(v)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (self.resolve_key(k), self.resolve(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Custom fields may bind their key, so keys follow the same rule as
    /// string values.
    fn resolve_key(&mut self, key: &str) -> String {
        parse_placeholder(key)
            .and_then(|name| self.lookup(name))
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup(&mut self, name: &str) -> Option<String> {
        if let Some(var) = SystemVariable::from_name(name) {
            let resolved = self.context.system_value(var);
            if resolved.is_none() {
                self.missing_recipient = true;
            }
            return resolved;
        }
        let resolved = self.values.get(name).cloned();
        if resolved.is_none() {
            tracing::debug!(variable = name, "no value supplied for template variable");
            self.missing.insert(name.to_string());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn context() -> IssuanceContext {
        IssuanceContext::new("did:web:troop42.example")
            .issued_at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap())
    }

    fn values(pairs: &[(&str, &str)]) -> VariableValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn resolves_system_and_dynamic_placeholders() {
        let credential = json!({
            "issuer": "{{issuer_did}}",
            "issuanceDate": "{{issue_date}}",
            "credentialSubject": {
                "id": "{{recipient_did}}",
                "name": "{{recipient_name}}",
                "tags": ["{{recipient_name}}", 3]
            }
        });
        let ctx = context().with_recipient("did:key:z6Mk");
        let out = resolve_placeholders(&credential, &values(&[("recipient_name", "Ada")]), &ctx)
            .unwrap();
        assert_eq!(out["issuer"], "did:web:troop42.example");
        assert_eq!(out["issuanceDate"], "2024-06-01T12:30:00Z");
        assert_eq!(out["credentialSubject"]["id"], "did:key:z6Mk");
        assert_eq!(out["credentialSubject"]["name"], "Ada");
        assert_eq!(out["credentialSubject"]["tags"], json!(["Ada", 3]));
    }

    #[test]
    fn partial_text_is_left_alone() {
        let credential = json!({"description": "Awarded to {{recipient_name}}"});
        let out = resolve_placeholders(&credential, &VariableValues::new(), &context()).unwrap();
        assert_eq!(out, credential);
    }

    #[test]
    fn reports_all_missing_variables_sorted() {
        let credential = json!({"a": "{{zeta}}", "b": ["{{alpha}}", "{{zeta}}"]});
        let err = resolve_placeholders(&credential, &VariableValues::new(), &context())
            .unwrap_err();
        assert_eq!(
            err,
            IssuanceError::MissingVariables(vec!["alpha".into(), "zeta".into()])
        );
        assert_eq!(
            err.to_string(),
            "missing values for template variables: alpha, zeta"
        );
    }

    #[test]
    fn recipient_placeholder_needs_recipient() {
        let credential = json!({"credentialSubject": {"id": "{{recipient_did}}"}});
        let err = resolve_placeholders(&credential, &VariableValues::new(), &context())
            .unwrap_err();
        assert_eq!(err, IssuanceError::MissingRecipient);
        assert!(err.to_string().contains("{{recipient_did}}"));
    }

    #[test]
    fn placeholder_keys_are_resolved() {
        let credential = json!({"credentialSubject": {"{{extra_key}}": "{{extra_value}}"}});
        let out = resolve_placeholders(
            &credential,
            &values(&[("extra_key", "patrol"), ("extra_value", "Eagle")]),
            &context(),
        )
        .unwrap();
        assert_eq!(out["credentialSubject"], json!({"patrol": "Eagle"}));
    }

    #[test]
    fn missing_key_variable_is_reported() {
        let credential = json!({"credentialSubject": {"{{extra_key}}": "v"}});
        let err = resolve_placeholders(&credential, &VariableValues::new(), &context())
            .unwrap_err();
        assert_eq!(err, IssuanceError::MissingVariables(vec!["extra_key".into()]));
    }

    #[test]
    fn supplied_values_do_not_override_context() {
        let credential = json!({"issuer": "{{issuer_did}}"});
        let out = resolve_placeholders(
            &credential,
            &values(&[("issuer_did", "did:web:spoofed")]),
            &context(),
        )
        .unwrap();
        assert_eq!(out["issuer"], "did:web:troop42.example");
    }
}
