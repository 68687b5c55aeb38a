//! # Variable Analysis
//!
//! Answers "which values must the issuer supply?" for a template. The
//! analysis walks the same bindings the serializer emits, via
//! [`Obv3Template::visit_bindings`], so every placeholder that can appear
//! in the rendered credential is reported.
//!
//! Variables split into two groups:
//!
//! - **system**: the reserved `issuer_did`, `issue_date`, and
//!   `recipient_did`, filled in by issuance tooling from platform context.
//! - **dynamic**: everything else, supplied per recipient.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use boost_core::{parse_placeholder, CredentialTemplate, FieldBinding, Obv3Template, SystemVariable};

use crate::serialize::slot_to_json;

/// Variables of a template, split by who supplies them. Both lists are
/// sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedVariables {
    pub system: Vec<String>,
    pub dynamic: Vec<String>,
}

impl ExtractedVariables {
    fn from_sets(system: BTreeSet<String>, dynamic: BTreeSet<String>) -> Self {
        Self {
            system: system.into_iter().collect(),
            dynamic: dynamic.into_iter().collect(),
        }
    }

    /// True if the template needs no variables at all.
    pub fn is_empty(&self) -> bool {
        self.system.is_empty() && self.dynamic.is_empty()
    }

    /// Both groups merged, sorted.
    pub fn all(&self) -> Vec<String> {
        let merged: BTreeSet<&String> = self.system.iter().chain(&self.dynamic).collect();
        merged.into_iter().cloned().collect()
    }
}

/// Names of every dynamic binding in the template, sorted and deduplicated.
///
/// Unnamed dynamic bindings contribute the name the serializer derives
/// from their label. Passthrough templates report every placeholder in
/// their raw JSON, reserved names included.
pub fn extract_dynamic_variables(template: &CredentialTemplate) -> Vec<String> {
    match template {
        CredentialTemplate::Obv3(t) => {
            let mut names = BTreeSet::new();
            t.visit_bindings(&mut |slot, field| {
                if let Some(name) = field.effective_variable_name(slot.label) {
                    names.insert(name);
                }
            });
            names.into_iter().collect()
        }
        CredentialTemplate::Passthrough(p) => extract_variables_from_raw_json(&p.raw_json).all(),
    }
}

/// Variables of the template, split into system and dynamic.
pub fn extract_variables_by_type(template: &CredentialTemplate) -> ExtractedVariables {
    match template {
        CredentialTemplate::Obv3(t) => obv3_variables(t),
        CredentialTemplate::Passthrough(p) => extract_variables_from_raw_json(&p.raw_json),
    }
}

fn obv3_variables(template: &Obv3Template) -> ExtractedVariables {
    let mut system = BTreeSet::new();
    let mut dynamic = BTreeSet::new();

    // An absent issuer id still renders as the reserved placeholder.
    if template.issuer.id.is_none() {
        system.insert(SystemVariable::IssuerDid.as_str().to_string());
    }

    template.visit_bindings(&mut |slot, field: &FieldBinding| {
        if let Some(var) = slot.system {
            if slot_to_json(field, slot).is_none() {
                system.insert(var.as_str().to_string());
            }
        }
        if let Some(name) = field.effective_variable_name(slot.label) {
            if SystemVariable::from_name(&name).is_some() {
                system.insert(name);
            } else {
                dynamic.insert(name);
            }
        }
    });

    ExtractedVariables::from_sets(system, dynamic)
}

/// Variables referenced anywhere in a raw credential document.
///
/// Only string values and object keys that are exactly one placeholder
/// count, the same rule that decides whether a value is dynamic when a
/// credential is read back and what issuance resolves. A placeholder
/// embedded in longer text (`"Dear {{name}}"`) is not reported.
pub fn extract_variables_from_raw_json(json: &Value) -> ExtractedVariables {
    let mut system = BTreeSet::new();
    let mut dynamic = BTreeSet::new();
    scan(json, &mut |name| {
        if SystemVariable::from_name(name).is_some() {
            system.insert(name.to_string());
        } else {
            dynamic.insert(name.to_string());
        }
    });
    ExtractedVariables::from_sets(system, dynamic)
}

fn scan<F: FnMut(&str)>(value: &Value, found: &mut F) {
    match value {
        Value::String(s) => {
            if let Some(name) = parse_placeholder(s) {
                found(name);
            }
        }
        Value::Array(items) => items.iter().for_each(|v| scan(v, found)),
        Value::Object(map) => {
            for (key, v) in map {
                if let Some(name) = parse_placeholder(key) {
                    found(name);
                }
                scan(v, found);
            }
        }
        _ => {}
    }
}

/// Advisory validation of the fields every credential needs.
///
/// A field passes when it has a value or is bound dynamically. An empty
/// result means the template is complete enough to save.
pub fn validate_template(template: &Obv3Template) -> Vec<String> {
    let required: [(&FieldBinding, &str); 3] = [
        (&template.name, "Credential name is required"),
        (&template.issuer.name, "Issuer name is required"),
        (
            &template.credential_subject.achievement.name,
            "Achievement name is required",
        ),
    ];
    required
        .into_iter()
        .filter(|(field, _)| !field.is_present())
        .map(|(_, message)| message.to_string())
        .collect()
}
