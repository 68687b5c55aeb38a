//! # Error Types
//!
//! Turning an in-memory template into JSON, or an in-memory JSON value into
//! a template, cannot fail. Errors only arise at the text boundary, when raw
//! input has to be parsed before the transformer ever sees it.

use thiserror::Error;

/// Errors from parsing template and credential documents.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The input text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed, but its top level is not a JSON object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Name of a JSON value's kind, for error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
