//! # Credential JSON → Template
//!
//! Reads an arbitrary credential document back into a
//! [`CredentialTemplate`]. OBv3 documents are reconstructed field by field;
//! anything else is carried as a passthrough credential with its raw JSON
//! untouched.
//!
//! ## Lossy By Construction
//!
//! The serializer never embeds issuer metadata, so the issuer name is reset
//! to an empty static value and the rest of the issuer profile is not
//! reconstructed. Custom fields are always reset to empty. Evidence keeps
//! only the first of several types.
//!
//! ## Absence
//!
//! A key that is missing, `null`, `false`, `0`, or the empty string reads
//! back as `None` for optional fields, never as an empty binding.

use serde_json::Value;

use boost_core::error::json_kind;
use boost_core::{
    default_contexts, default_types, dynamic_field, parse_placeholder, static_field, system_field,
    AchievementTemplate, AlignmentTemplate, CredentialTemplate, CriteriaTemplate, EvidenceTemplate,
    FieldBinding, IdentifierEntryTemplate, IssuerTemplate, ItemId, Obv3Template,
    PassthroughCredential, PassthroughSchema, ResultDescriptionTemplate, ResultTemplate,
    SchemaType, SubjectTemplate, SystemVariable, TemplateError,
};

use crate::schema::{detect_schema_type, string_entries};

/// Name given to passthrough credentials that carry none.
pub const CUSTOM_CREDENTIAL_NAME: &str = "Custom Credential";

/// Read one JSON value as a binding.
///
/// `null` is an empty static value. Strings are taken verbatim and other
/// values are stringified. A string that is exactly one `{{name}}`
/// placeholder becomes a dynamic binding with an empty default; anything
/// else, including text with an embedded placeholder, is static.
pub fn json_to_field(value: &Value) -> FieldBinding {
    let text = match value {
        Value::Null => return static_field(""),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match parse_placeholder(&text) {
        Some(name) => dynamic_field(name, ""),
        None => static_field(text),
    }
}

/// Parse credential text into a template.
///
/// This is the only fallible entry point: the text must be JSON and its
/// top level must be an object.
pub fn parse_template(text: &str) -> Result<CredentialTemplate, TemplateError> {
    let json: Value = serde_json::from_str(text)?;
    if !json.is_object() {
        return Err(TemplateError::NotAnObject(json_kind(&json)));
    }
    Ok(json_to_template(&json))
}

/// Read a credential document into a template. Never fails.
pub fn json_to_template(json: &Value) -> CredentialTemplate {
    let schema = detect_schema_type(json);
    let passthrough_schema = match schema {
        SchemaType::Obv3 => return obv3_from_json(json).into(),
        SchemaType::Clr2 => PassthroughSchema::Clr2,
        SchemaType::Custom => PassthroughSchema::Custom,
    };

    let name = json
        .get("name")
        .filter(|v| truthy(v))
        .map(stringify)
        .unwrap_or_else(|| CUSTOM_CREDENTIAL_NAME.to_string());
    tracing::debug!(schema = %schema, name = %name, "carrying non-OBv3 credential as passthrough");

    CredentialTemplate::Passthrough(PassthroughCredential {
        schema_type: passthrough_schema,
        name,
        raw_json: json.clone(),
    })
}

fn obv3_from_json(json: &Value) -> Obv3Template {
    let contexts = string_array(json, "@context").unwrap_or_else(default_contexts);
    let types = string_array(json, "type").unwrap_or_else(default_types);

    let issuer_id = json.get("issuer").filter(|v| truthy(v)).map(|issuer| {
        let id = match issuer {
            Value::String(_) => issuer,
            Value::Object(obj) => obj.get("id").unwrap_or(&Value::Null),
            _ => &Value::Null,
        };
        promote_system(json_to_field(id), SystemVariable::IssuerDid)
    });

    let valid_from = ["validFrom", "issuanceDate"]
        .iter()
        .find_map(|key| json.get(*key).filter(|v| truthy(v)))
        .map(json_to_field)
        .unwrap_or_else(|| dynamic_field(SystemVariable::IssueDate.as_str(), ""));
    let valid_until = ["validUntil", "expirationDate"]
        .iter()
        .find_map(|key| json.get(*key).filter(|v| truthy(v)))
        .map(json_to_field);

    let subject = json.get("credentialSubject").unwrap_or(&Value::Null);

    let template = Obv3Template {
        contexts,
        types,
        id: opt_field(json, "id"),
        name: req_field(json, "name"),
        description: opt_field(json, "description"),
        image: opt_field(json, "image"),
        issuer: IssuerTemplate {
            id: issuer_id,
            name: static_field(""),
            ..Default::default()
        },
        credential_subject: subject_from_json(subject),
        valid_from: promote_system(valid_from, SystemVariable::IssueDate),
        valid_until,
        custom_fields: Vec::new(),
    };
    tracing::debug!(
        alignments = template.credential_subject.achievement.alignment.len(),
        evidence = template.credential_subject.evidence.len(),
        results = template.credential_subject.result.len(),
        "parsed OBv3 credential"
    );
    template
}

fn subject_from_json(subject: &Value) -> SubjectTemplate {
    let achievement = achievement_from_json(subject.get("achievement").unwrap_or(&Value::Null));

    let evidence = items(subject, "evidence")
        .iter()
        .enumerate()
        .map(|(i, e)| EvidenceTemplate {
            id: ItemId::indexed("evidence", i),
            evidence_type: e.get("type").filter(|v| truthy(v)).map(|t| match t {
                Value::Array(types) => json_to_field(types.first().unwrap_or(&Value::Null)),
                other => json_to_field(other),
            }),
            name: opt_field(e, "name"),
            description: opt_field(e, "description"),
            narrative: opt_field(e, "narrative"),
            genre: opt_field(e, "genre"),
            audience: opt_field(e, "audience"),
        })
        .collect();

    let result = items(subject, "result")
        .iter()
        .enumerate()
        .map(|(i, r)| ResultTemplate {
            id: ItemId::indexed("result", i),
            result_description: opt_field(r, "resultDescription"),
            value: opt_field(r, "value"),
            status: opt_field(r, "status"),
            achieved_level: opt_field(r, "achievedLevel"),
        })
        .collect();

    let identifier = items(subject, "identifier")
        .iter()
        .enumerate()
        .map(|(i, id)| IdentifierEntryTemplate {
            id: ItemId::indexed("subjectId", i),
            identifier: first_field(id, &["identityHash", "identifier"]),
            identifier_type: first_field(id, &["identityType", "identifierType"]),
        })
        .collect();

    SubjectTemplate {
        id: opt_field(subject, "id"),
        name: opt_field(subject, "name"),
        achievement,
        evidence,
        result,
        credits_earned: opt_field(subject, "creditsEarned"),
        activity_start_date: opt_field(subject, "activityStartDate"),
        activity_end_date: opt_field(subject, "activityEndDate"),
        term: opt_field(subject, "term"),
        license_number: opt_field(subject, "licenseNumber"),
        role: opt_field(subject, "role"),
        identifier,
    }
}

fn achievement_from_json(ach: &Value) -> AchievementTemplate {
    let criteria = ach
        .get("criteria")
        .filter(|c| c.is_object())
        .map(|c| CriteriaTemplate {
            id: opt_field(c, "id"),
            narrative: opt_field(c, "narrative"),
        });

    let alignment = items(ach, "alignment")
        .iter()
        .enumerate()
        .map(|(i, a)| AlignmentTemplate {
            id: ItemId::indexed("alignment", i),
            target_name: req_field(a, "targetName"),
            target_url: req_field(a, "targetUrl"),
            target_description: opt_field(a, "targetDescription"),
            target_framework: opt_field(a, "targetFramework"),
            target_code: opt_field(a, "targetCode"),
        })
        .collect();

    let other_identifier = items(ach, "otherIdentifier")
        .iter()
        .enumerate()
        .map(|(i, oi)| IdentifierEntryTemplate {
            id: ItemId::indexed("otherId", i),
            identifier: req_field(oi, "identifier"),
            identifier_type: req_field(oi, "identifierType"),
        })
        .collect();

    let result_description = items(ach, "resultDescription")
        .iter()
        .enumerate()
        .map(|(i, rd)| ResultDescriptionTemplate {
            id: rd
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(ItemId::from)
                .unwrap_or_else(|| ItemId::indexed("resultDesc", i)),
            name: req_field(rd, "name"),
            result_type: opt_field(rd, "resultType"),
            allowed_value: string_array(rd, "allowedValue").unwrap_or_default(),
            required_value: opt_field(rd, "requiredValue"),
        })
        .collect();

    AchievementTemplate {
        id: opt_field(ach, "id"),
        name: req_field(ach, "name"),
        description: req_field(ach, "description"),
        achievement_type: opt_field(ach, "achievementType"),
        image: opt_field(ach, "image"),
        criteria,
        alignment,
        human_code: opt_field(ach, "humanCode"),
        field_of_study: opt_field(ach, "fieldOfStudy"),
        specialization: opt_field(ach, "specialization"),
        credits_available: opt_field(ach, "creditsAvailable"),
        tag: string_array(ach, "tag").unwrap_or_default(),
        in_language: opt_field(ach, "inLanguage"),
        version: opt_field(ach, "version"),
        other_identifier,
        result_description,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// JSON truthiness: `null`, `false`, `0`, and `""` are falsy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Optional field: `None` unless the key holds a truthy value.
fn opt_field(obj: &Value, key: &str) -> Option<FieldBinding> {
    obj.get(key).filter(|v| truthy(v)).map(json_to_field)
}

/// Required field: empty static value unless the key holds a truthy value.
fn req_field(obj: &Value, key: &str) -> FieldBinding {
    opt_field(obj, key).unwrap_or_else(|| static_field(""))
}

/// First truthy key among `keys`, else an empty static value.
fn first_field(obj: &Value, keys: &[&str]) -> FieldBinding {
    keys.iter()
        .find_map(|key| opt_field(obj, key))
        .unwrap_or_else(|| static_field(""))
}

fn items<'a>(obj: &'a Value, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// String entries of an array-valued key, or `None` if it is not an array.
fn string_array(obj: &Value, key: &str) -> Option<Vec<String>> {
    obj.get(key)?.as_array()?;
    Some(
        string_entries(obj, key)
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

/// Read the slot's own reserved placeholder back as a system binding.
fn promote_system(field: FieldBinding, var: SystemVariable) -> FieldBinding {
    if field.variable_name() == Some(var.as_str()) {
        system_field(var.description())
    } else {
        field
    }
}
