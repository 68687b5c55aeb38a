//! # Schema Detection
//!
//! Classifies credential JSON by its `@context` and `type` arrays. Only
//! documents classified as OBv3 are parsed into a structured template.

use serde_json::Value;

use boost_core::SchemaType;

/// Context substrings that identify Open Badges 3.0.
const OBV3_CONTEXT_MARKERS: [&str; 3] = ["openbadges", "ob/v3", "purl.imsglobal.org/spec/ob"];

/// Context substrings that identify CLR 2.0.
const CLR_CONTEXT_MARKERS: [&str; 2] = ["clr/v2", "comprehensivelearnerrecord"];

/// Type names that identify CLR 2.0.
const CLR_TYPES: [&str; 2] = ["ClrCredential", "ComprehensiveLearnerRecord"];

/// Detect which credential schema a JSON document follows.
///
/// OBv3 requires both an Open Badges context and an `OpenBadgeCredential`
/// type. CLR 2.0 is matched by either its context or its type. Non-array
/// `@context` or `type` values count as empty.
pub fn detect_schema_type(json: &Value) -> SchemaType {
    let contexts = string_entries(json, "@context");
    let types = string_entries(json, "type");

    let obv3_context = contexts
        .iter()
        .any(|c| OBV3_CONTEXT_MARKERS.iter().any(|m| c.contains(m)));
    if obv3_context && types.iter().any(|t| *t == "OpenBadgeCredential") {
        return SchemaType::Obv3;
    }

    let clr_context = contexts
        .iter()
        .any(|c| CLR_CONTEXT_MARKERS.iter().any(|m| c.contains(m)));
    if clr_context || types.iter().any(|t| CLR_TYPES.iter().any(|c| c == t)) {
        return SchemaType::Clr2;
    }

    SchemaType::Custom
}

/// String entries of an array-valued key. Anything else yields nothing.
pub(crate) fn string_entries<'a>(json: &'a Value, key: &str) -> Vec<&'a str> {
    json.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn obv3_needs_context_and_type() {
        let doc = json!({
            "@context": ["https://www.w3.org/ns/credentials/v2",
                         "https://purl.imsglobal.org/spec/ob/v3p0/context-3.0.3.json"],
            "type": ["VerifiableCredential", "OpenBadgeCredential"],
        });
        assert_eq!(detect_schema_type(&doc), SchemaType::Obv3);

        let no_type = json!({
            "@context": ["https://purl.imsglobal.org/spec/ob/v3p0/context-3.0.3.json"],
            "type": ["VerifiableCredential"],
        });
        assert_eq!(detect_schema_type(&no_type), SchemaType::Custom);

        let no_context = json!({
            "@context": ["https://www.w3.org/ns/credentials/v2"],
            "type": ["OpenBadgeCredential"],
        });
        assert_eq!(detect_schema_type(&no_context), SchemaType::Custom);
    }

    #[test]
    fn legacy_openbadges_context_counts() {
        let doc = json!({
            "@context": ["https://w3id.org/openbadges/v2"],
            "type": ["OpenBadgeCredential"],
        });
        assert_eq!(detect_schema_type(&doc), SchemaType::Obv3);
    }

    #[test]
    fn clr_by_context_or_type() {
        let by_context = json!({
            "@context": ["https://purl.imsglobal.org/spec/clr/v2p0/context-2.0.1.json"],
            "type": ["VerifiableCredential"],
        });
        assert_eq!(detect_schema_type(&by_context), SchemaType::Clr2);

        let by_type = json!({"type": ["VerifiableCredential", "ClrCredential"]});
        assert_eq!(detect_schema_type(&by_type), SchemaType::Clr2);

        let legacy = json!({"type": ["ComprehensiveLearnerRecord"]});
        assert_eq!(detect_schema_type(&legacy), SchemaType::Clr2);
    }

    #[test]
    fn non_array_fields_are_ignored() {
        let doc = json!({
            "@context": "https://purl.imsglobal.org/spec/ob/v3p0/context-3.0.3.json",
            "type": "OpenBadgeCredential",
        });
        assert_eq!(detect_schema_type(&doc), SchemaType::Custom);
        assert_eq!(detect_schema_type(&json!({})), SchemaType::Custom);
        assert_eq!(detect_schema_type(&json!([1, 2])), SchemaType::Custom);
    }

    #[test]
    fn non_string_entries_are_skipped() {
        let doc = json!({
            "@context": [{"@vocab": "x"}, "https://purl.imsglobal.org/spec/ob/v3p0/context.json"],
            "type": [7, "OpenBadgeCredential"],
        });
        assert_eq!(detect_schema_type(&doc), SchemaType::Obv3);
    }
}
