//! # Field Bindings
//!
//! Every piece of data in a credential template is a [`FieldBinding`]: a
//! value that is either fixed at design time, filled in per recipient at
//! issuance, or injected by the issuing platform.
//!
//! The three modes are a closed sum type. A binding cannot be dynamic and
//! system-bound at the same time, and a system binding never carries a
//! user-editable value.
//!
//! ## Serialized Form
//!
//! Templates are saved as JSON with bindings tagged by `mode`:
//!
//! ```json
//! { "mode": "static",  "value": "Intro to Knots" }
//! { "mode": "dynamic", "variableName": "course_name", "defaultValue": "" }
//! { "mode": "system",  "description": "Issuer DID (auto-filled)" }
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Runs of characters that are not allowed in a derived variable name.
static NON_IDENT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Single characters that are not allowed in a user-typed variable name.
static NON_IDENT_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid regex"));

/// One piece of credential data and how it is bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FieldBinding {
    /// A literal value fixed when the template is designed.
    Static {
        /// The literal value. Empty means "no value".
        value: String,
    },

    /// A named placeholder resolved per recipient at issuance.
    Dynamic {
        /// Placeholder name. May be empty until the first serialization
        /// derives one from the field label.
        #[serde(rename = "variableName")]
        variable_name: String,
        /// Sample value shown in the editor. Not carried across JSON.
        #[serde(rename = "defaultValue", default)]
        default_value: String,
    },

    /// A value injected by the issuing platform. Not user-editable.
    System {
        /// Explanation shown in the editor.
        description: String,
    },
}

/// Create a static binding.
pub fn static_field(value: impl Into<String>) -> FieldBinding {
    FieldBinding::Static {
        value: value.into(),
    }
}

/// Create a dynamic binding with a default (sample) value.
pub fn dynamic_field(
    variable_name: impl Into<String>,
    default_value: impl Into<String>,
) -> FieldBinding {
    FieldBinding::Dynamic {
        variable_name: variable_name.into(),
        default_value: default_value.into(),
    }
}

/// Create a system binding.
pub fn system_field(description: impl Into<String>) -> FieldBinding {
    FieldBinding::System {
        description: description.into(),
    }
}

impl Default for FieldBinding {
    fn default() -> Self {
        static_field("")
    }
}

impl FieldBinding {
    /// The literal value (static) or sample value (dynamic). Always empty for
    /// system bindings.
    pub fn value(&self) -> &str {
        match self {
            FieldBinding::Static { value } => value,
            FieldBinding::Dynamic { default_value, .. } => default_value,
            FieldBinding::System { .. } => "",
        }
    }

    /// Whether this binding is resolved per recipient at issuance.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, FieldBinding::Dynamic { .. })
    }

    /// Whether this binding is injected by the issuing platform.
    pub fn is_system(&self) -> bool {
        matches!(self, FieldBinding::System { .. })
    }

    /// The placeholder name of a dynamic binding.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            FieldBinding::Dynamic { variable_name, .. } => Some(variable_name),
            _ => None,
        }
    }

    /// The editor description of a system binding.
    pub fn system_description(&self) -> Option<&str> {
        match self {
            FieldBinding::System { description } => Some(description),
            _ => None,
        }
    }

    /// Whether the serializer emits a key for this binding: a non-empty
    /// static value, or any dynamic binding.
    pub fn is_present(&self) -> bool {
        match self {
            FieldBinding::Static { value } => !value.is_empty(),
            FieldBinding::Dynamic { .. } => true,
            FieldBinding::System { .. } => false,
        }
    }

    /// The variable name this binding renders as, deriving one from `label`
    /// when a dynamic binding has none yet.
    pub fn effective_variable_name(&self, label: &str) -> Option<String> {
        match self {
            FieldBinding::Dynamic { variable_name, .. } if !variable_name.is_empty() => {
                Some(variable_name.clone())
            }
            FieldBinding::Dynamic { .. } => {
                let derived = label_to_variable_name(label);
                (!derived.is_empty()).then_some(derived)
            }
            _ => None,
        }
    }

    /// Flip between static and dynamic, keeping the current value.
    ///
    /// Switching to dynamic reuses nothing but the value; the variable name
    /// is derived from `label`. System bindings are returned unchanged.
    pub fn toggle_dynamic(&self, label: &str) -> FieldBinding {
        match self {
            FieldBinding::Static { value } => {
                dynamic_field(label_to_variable_name(label), value.clone())
            }
            FieldBinding::Dynamic { default_value, .. } => static_field(default_value.clone()),
            FieldBinding::System { .. } => self.clone(),
        }
    }

    /// Replace the value, keeping the binding mode.
    ///
    /// A dynamic binding without a variable name gets one derived from
    /// `label`. System bindings are returned unchanged.
    pub fn with_value(&self, value: impl Into<String>, label: &str) -> FieldBinding {
        match self {
            FieldBinding::Static { .. } => static_field(value),
            FieldBinding::Dynamic { variable_name, .. } => {
                let name = if variable_name.is_empty() {
                    label_to_variable_name(label)
                } else {
                    variable_name.clone()
                };
                dynamic_field(name, value)
            }
            FieldBinding::System { .. } => self.clone(),
        }
    }

    /// Rename the placeholder of a dynamic binding.
    ///
    /// The name is sanitized the way the editor does it: every character
    /// outside `[A-Za-z0-9_]` becomes `_`, then the whole name is lowercased.
    /// Non-dynamic bindings are returned unchanged.
    pub fn with_variable_name(&self, name: &str) -> FieldBinding {
        match self {
            FieldBinding::Dynamic { default_value, .. } => {
                let sanitized = NON_IDENT_CHAR.replace_all(name, "_").to_lowercase();
                dynamic_field(sanitized, default_value.clone())
            }
            _ => self.clone(),
        }
    }
}

/// Derive a placeholder name from a human field label.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `_`, and trims leading and trailing underscores:
/// `"Recipient Name"` becomes `recipient_name`.
pub fn label_to_variable_name(label: &str) -> String {
    let lowered = label.to_lowercase();
    let collapsed = NON_IDENT_RUN.replace_all(&lowered, "_");
    collapsed.trim_matches('_').to_string()
}
