//! # Template → Credential JSON
//!
//! Projects a [`CredentialTemplate`] into an OBv3 AchievementCredential.
//! Every binding becomes either a literal or a whole-string `{{variable}}`
//! placeholder.
//!
//! ## Conventions
//!
//! - Absence, not `null`, encodes "no value": optional keys are omitted
//!   when their binding is an empty static value.
//! - `name` always has a value (`"Untitled Credential"` fallback) and
//!   `criteria` is always present (`{"narrative": ""}` at minimum).
//! - The issuer is the bare identifier string. Issuer name, URL, and the
//!   rest of the profile are not embedded.
//! - The issuer and issuance-date slots fall back to the reserved
//!   `{{issuer_did}}` and `{{issue_date}}` placeholders, which issuance
//!   tooling resolves from platform context.
//! - A dynamic binding that has no variable name yet is rendered with a
//!   name derived from its field label.
//!
//! Serialization is total and deterministic. Array order is preserved.

use serde_json::{json, Map, Value};

use boost_core::template::slots::*;
use boost_core::{
    placeholder, AchievementTemplate, BindingSlot, CredentialTemplate, FieldBinding, Obv3Template,
    SubjectTemplate,
};

/// Fallback credential name.
pub const UNTITLED_CREDENTIAL: &str = "Untitled Credential";

/// Fallback achievement name.
pub const DEFAULT_ACHIEVEMENT_NAME: &str = "Achievement";

/// Fallback evidence type.
pub const DEFAULT_EVIDENCE_TYPE: &str = "Evidence";

/// Render one binding as its JSON string.
///
/// Dynamic bindings with a variable name become `{{variable_name}}`.
/// Otherwise a non-empty value is returned as-is and an empty one as
/// `None`, leaving the caller to omit the key or substitute a default.
/// System bindings always yield `None`; their slots have canonical
/// placeholders of their own.
pub fn field_to_json(field: &FieldBinding) -> Option<String> {
    match field {
        FieldBinding::Dynamic { variable_name, .. } if !variable_name.is_empty() => {
            Some(placeholder(variable_name))
        }
        FieldBinding::System { .. } => None,
        other => {
            let value = other.value();
            (!value.is_empty()).then(|| value.to_string())
        }
    }
}

/// Render a binding in the context of its slot, deriving a variable name
/// from the slot label for unnamed dynamic bindings.
pub(crate) fn slot_to_json(field: &FieldBinding, slot: BindingSlot) -> Option<String> {
    match field {
        FieldBinding::Dynamic { variable_name, .. } if variable_name.is_empty() => {
            match field.effective_variable_name(slot.label) {
                Some(derived) => {
                    tracing::debug!(
                        path = slot.path,
                        variable = %derived,
                        "derived variable name for unnamed dynamic field"
                    );
                    Some(placeholder(&derived))
                }
                None => field_to_json(field),
            }
        }
        _ => field_to_json(field),
    }
}

/// Serialize any template. Passthrough templates yield their raw JSON
/// unchanged.
pub fn template_to_json(template: &CredentialTemplate) -> Value {
    match template {
        CredentialTemplate::Obv3(t) => obv3_to_json(t),
        CredentialTemplate::Passthrough(p) => {
            tracing::debug!(schema = %p.schema_type, "passing raw credential through");
            p.raw_json.clone()
        }
    }
}

/// Conversion of a template into credential JSON.
pub trait ToCredentialJson {
    /// Render the credential body.
    fn to_json(&self) -> Value;
}

impl ToCredentialJson for Obv3Template {
    fn to_json(&self) -> Value {
        obv3_to_json(self)
    }
}

impl ToCredentialJson for CredentialTemplate {
    fn to_json(&self) -> Value {
        template_to_json(self)
    }
}

/// Serialize a structured OBv3 template.
pub fn obv3_to_json(template: &Obv3Template) -> Value {
    let mut credential = Map::new();
    credential.insert("@context".into(), json!(template.contexts));
    credential.insert("type".into(), json!(template.types));

    put_opt(&mut credential, "id", template.id.as_ref(), CREDENTIAL_ID);
    credential.insert(
        "name".into(),
        Value::String(
            slot_to_json(&template.name, CREDENTIAL_NAME)
                .unwrap_or_else(|| UNTITLED_CREDENTIAL.to_string()),
        ),
    );
    put_opt(
        &mut credential,
        "description",
        template.description.as_ref(),
        CREDENTIAL_DESCRIPTION,
    );
    put_opt(
        &mut credential,
        "image",
        template.image.as_ref(),
        CREDENTIAL_IMAGE,
    );

    credential.insert(
        "issuer".into(),
        Value::String(system_slot(template.issuer.id.as_ref(), ISSUER_ID)),
    );
    credential.insert(
        "issuanceDate".into(),
        Value::String(system_slot(Some(&template.valid_from), VALID_FROM)),
    );
    put_opt(
        &mut credential,
        "expirationDate",
        template.valid_until.as_ref(),
        VALID_UNTIL,
    );

    credential.insert("credentialSubject".into(), subject_to_json(template));

    Value::Object(credential)
}

/// Resolve a system slot, falling back to its reserved placeholder.
fn system_slot(field: Option<&FieldBinding>, slot: BindingSlot) -> String {
    field
        .and_then(|f| slot_to_json(f, slot))
        .or_else(|| slot.system.map(|var| var.placeholder()))
        .unwrap_or_default()
}

/// Insert `key` when the binding is present (non-empty static or dynamic).
fn put_opt(
    map: &mut Map<String, Value>,
    key: &str,
    field: Option<&FieldBinding>,
    slot: BindingSlot,
) {
    if let Some(field) = field.filter(|f| f.is_present()) {
        if let Some(value) = slot_to_json(field, slot) {
            map.insert(key.to_string(), Value::String(value));
        }
    }
}

/// Resolve a required binding, substituting `default` when empty.
fn required(field: &FieldBinding, slot: BindingSlot, default: &str) -> Value {
    Value::String(slot_to_json(field, slot).unwrap_or_else(|| default.to_string()))
}

fn subject_to_json(template: &Obv3Template) -> Value {
    let subject: &SubjectTemplate = &template.credential_subject;
    let mut out = Map::new();
    out.insert("type".into(), json!(["AchievementSubject"]));

    put_opt(&mut out, "id", subject.id.as_ref(), SUBJECT_ID);
    put_opt(&mut out, "name", subject.name.as_ref(), SUBJECT_NAME);

    out.insert(
        "achievement".into(),
        achievement_to_json(&subject.achievement),
    );

    put_opt(
        &mut out,
        "creditsEarned",
        subject.credits_earned.as_ref(),
        CREDITS_EARNED,
    );
    put_opt(
        &mut out,
        "activityStartDate",
        subject.activity_start_date.as_ref(),
        ACTIVITY_START_DATE,
    );
    put_opt(
        &mut out,
        "activityEndDate",
        subject.activity_end_date.as_ref(),
        ACTIVITY_END_DATE,
    );
    put_opt(&mut out, "term", subject.term.as_ref(), TERM);
    put_opt(
        &mut out,
        "licenseNumber",
        subject.license_number.as_ref(),
        LICENSE_NUMBER,
    );
    put_opt(&mut out, "role", subject.role.as_ref(), ROLE);

    if !subject.identifier.is_empty() {
        let identifiers: Vec<Value> = subject
            .identifier
            .iter()
            .map(|id| {
                json!({
                    "type": "IdentityObject",
                    "identityHash": required(&id.identifier, RECIPIENT_IDENTIFIER, ""),
                    "identityType": required(&id.identifier_type, RECIPIENT_IDENTIFIER_TYPE, ""),
                    "hashed": false,
                })
            })
            .collect();
        out.insert("identifier".into(), Value::Array(identifiers));
    }

    if !subject.result.is_empty() {
        let results: Vec<Value> = subject
            .result
            .iter()
            .map(|r| {
                let mut result = Map::new();
                result.insert("type".into(), json!(["Result"]));
                put_opt(
                    &mut result,
                    "resultDescription",
                    r.result_description.as_ref(),
                    RESULT_DESCRIPTION_REF,
                );
                put_opt(&mut result, "value", r.value.as_ref(), RESULT_VALUE);
                put_opt(&mut result, "status", r.status.as_ref(), RESULT_STATUS);
                put_opt(
                    &mut result,
                    "achievedLevel",
                    r.achieved_level.as_ref(),
                    RESULT_ACHIEVED_LEVEL,
                );
                Value::Object(result)
            })
            .collect();
        out.insert("result".into(), Value::Array(results));
    }

    if !subject.evidence.is_empty() {
        let evidence: Vec<Value> = subject
            .evidence
            .iter()
            .map(|e| {
                let evidence_type = e
                    .evidence_type
                    .as_ref()
                    .and_then(|t| slot_to_json(t, EVIDENCE_TYPE))
                    .unwrap_or_else(|| DEFAULT_EVIDENCE_TYPE.to_string());
                let mut item = Map::new();
                item.insert("type".into(), json!([evidence_type]));
                put_opt(&mut item, "name", e.name.as_ref(), EVIDENCE_NAME);
                put_opt(
                    &mut item,
                    "description",
                    e.description.as_ref(),
                    EVIDENCE_DESCRIPTION,
                );
                put_opt(
                    &mut item,
                    "narrative",
                    e.narrative.as_ref(),
                    EVIDENCE_NARRATIVE,
                );
                put_opt(&mut item, "genre", e.genre.as_ref(), EVIDENCE_GENRE);
                put_opt(
                    &mut item,
                    "audience",
                    e.audience.as_ref(),
                    EVIDENCE_AUDIENCE,
                );
                Value::Object(item)
            })
            .collect();
        out.insert("evidence".into(), Value::Array(evidence));
    }

    for field in &template.custom_fields {
        let Some(key) = slot_to_json(&field.key, CUSTOM_FIELD_KEY) else {
            continue;
        };
        if out.contains_key(&key) {
            tracing::warn!(
                key = %key,
                "custom field would overwrite a standard subject key; skipped"
            );
            continue;
        }
        let value = slot_to_json(&field.value, CUSTOM_FIELD_VALUE).unwrap_or_default();
        out.insert(key, Value::String(value));
    }

    Value::Object(out)
}

fn achievement_to_json(ach: &AchievementTemplate) -> Value {
    let mut out = Map::new();
    out.insert("type".into(), json!(["Achievement"]));

    put_opt(&mut out, "id", ach.id.as_ref(), ACHIEVEMENT_ID);
    out.insert(
        "name".into(),
        required(&ach.name, ACHIEVEMENT_NAME, DEFAULT_ACHIEVEMENT_NAME),
    );
    out.insert(
        "description".into(),
        required(&ach.description, ACHIEVEMENT_DESCRIPTION, ""),
    );
    put_opt(
        &mut out,
        "achievementType",
        ach.achievement_type.as_ref(),
        ACHIEVEMENT_TYPE,
    );
    put_opt(&mut out, "image", ach.image.as_ref(), ACHIEVEMENT_IMAGE);

    // OBv3 requires criteria on every achievement.
    let mut criteria = Map::new();
    if let Some(c) = &ach.criteria {
        put_opt(&mut criteria, "id", c.id.as_ref(), CRITERIA_ID);
        put_opt(
            &mut criteria,
            "narrative",
            c.narrative.as_ref(),
            CRITERIA_NARRATIVE,
        );
    }
    if criteria.is_empty() {
        criteria.insert("narrative".into(), Value::String(String::new()));
    }
    out.insert("criteria".into(), Value::Object(criteria));

    put_opt(&mut out, "humanCode", ach.human_code.as_ref(), HUMAN_CODE);
    put_opt(
        &mut out,
        "fieldOfStudy",
        ach.field_of_study.as_ref(),
        FIELD_OF_STUDY,
    );
    put_opt(
        &mut out,
        "specialization",
        ach.specialization.as_ref(),
        SPECIALIZATION,
    );
    put_opt(
        &mut out,
        "creditsAvailable",
        ach.credits_available.as_ref(),
        CREDITS_AVAILABLE,
    );
    if !ach.tag.is_empty() {
        out.insert("tag".into(), json!(ach.tag));
    }
    put_opt(
        &mut out,
        "inLanguage",
        ach.in_language.as_ref(),
        IN_LANGUAGE,
    );
    put_opt(&mut out, "version", ach.version.as_ref(), VERSION);

    if !ach.other_identifier.is_empty() {
        let ids: Vec<Value> = ach
            .other_identifier
            .iter()
            .map(|oi| {
                json!({
                    "type": "IdentifierEntry",
                    "identifier": required(&oi.identifier, OTHER_IDENTIFIER, ""),
                    "identifierType": required(&oi.identifier_type, OTHER_IDENTIFIER_TYPE, ""),
                })
            })
            .collect();
        out.insert("otherIdentifier".into(), Value::Array(ids));
    }

    if !ach.result_description.is_empty() {
        let descs: Vec<Value> = ach
            .result_description
            .iter()
            .map(|rd| {
                let mut desc = Map::new();
                desc.insert("id".into(), Value::String(rd.id.to_string()));
                desc.insert("type".into(), json!(["ResultDescription"]));
                desc.insert(
                    "name".into(),
                    required(&rd.name, RESULT_DESCRIPTION_NAME, ""),
                );
                put_opt(
                    &mut desc,
                    "resultType",
                    rd.result_type.as_ref(),
                    RESULT_DESCRIPTION_TYPE,
                );
                if !rd.allowed_value.is_empty() {
                    desc.insert("allowedValue".into(), json!(rd.allowed_value));
                }
                put_opt(
                    &mut desc,
                    "requiredValue",
                    rd.required_value.as_ref(),
                    RESULT_DESCRIPTION_REQUIRED_VALUE,
                );
                Value::Object(desc)
            })
            .collect();
        out.insert("resultDescription".into(), Value::Array(descs));
    }

    if !ach.alignment.is_empty() {
        let alignments: Vec<Value> = ach
            .alignment
            .iter()
            .map(|a| {
                let mut align = Map::new();
                align.insert("type".into(), json!(["Alignment"]));
                align.insert(
                    "targetName".into(),
                    required(&a.target_name, ALIGNMENT_TARGET_NAME, ""),
                );
                align.insert(
                    "targetUrl".into(),
                    required(&a.target_url, ALIGNMENT_TARGET_URL, ""),
                );
                put_opt(
                    &mut align,
                    "targetDescription",
                    a.target_description.as_ref(),
                    ALIGNMENT_TARGET_DESCRIPTION,
                );
                put_opt(
                    &mut align,
                    "targetFramework",
                    a.target_framework.as_ref(),
                    ALIGNMENT_TARGET_FRAMEWORK,
                );
                put_opt(
                    &mut align,
                    "targetCode",
                    a.target_code.as_ref(),
                    ALIGNMENT_TARGET_CODE,
                );
                Value::Object(align)
            })
            .collect();
        out.insert("alignment".into(), Value::Array(alignments));
    }

    Value::Object(out)
}
