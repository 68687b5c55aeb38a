//! # Credential Template Model
//!
//! The editable structure of an Open Badges v3 AchievementCredential, built
//! entirely out of [`FieldBinding`]s and ordered collections of them.
//!
//! ## Optional Fields
//!
//! `Option<FieldBinding>` distinguishes "field never set" (`None`) from
//! "field set to an empty string" (`Some(static_field(""))`). The editor
//! relies on this for toggles such as "has expiration", which is exactly
//! [`Obv3Template::has_expiration`].
//!
//! ## Schema Dispatch
//!
//! Only OBv3 credentials are edited structurally. Anything else (CLR 2.0,
//! unknown schemas) is carried as a [`PassthroughCredential`] whose raw JSON
//! is authoritative and never touched by the transformer.
//!
//! ## Binding Walk
//!
//! [`Obv3Template::visit_bindings`] visits every binding the template holds,
//! in serializer order, together with its [`BindingSlot`]. Anything that
//! needs "all the fields" (variable analysis, label-derived variable names)
//! goes through this one walk so it cannot drift from the serializer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::binding::FieldBinding;
use crate::ids::ItemId;
use crate::placeholder::SystemVariable;

/// Default JSON-LD contexts for a new OBv3 credential.
pub const DEFAULT_CONTEXTS: [&str; 2] = [
    "https://www.w3.org/ns/credentials/v2",
    "https://purl.imsglobal.org/spec/ob/v3p0/context-3.0.3.json",
];

/// Default credential types for a new OBv3 credential.
pub const DEFAULT_TYPES: [&str; 2] = ["VerifiableCredential", "OpenBadgeCredential"];

/// `DEFAULT_CONTEXTS` as owned strings.
pub fn default_contexts() -> Vec<String> {
    DEFAULT_CONTEXTS.iter().map(|s| s.to_string()).collect()
}

/// `DEFAULT_TYPES` as owned strings.
pub fn default_types() -> Vec<String> {
    DEFAULT_TYPES.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Schema dispatch
// ---------------------------------------------------------------------------

/// Which credential data model a document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// Open Badges 3.0 AchievementCredential.
    Obv3,
    /// Comprehensive Learner Record 2.0.
    Clr2,
    /// Anything else.
    Custom,
}

impl SchemaType {
    /// Wire name (`obv3`, `clr2`, `custom`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Obv3 => "obv3",
            SchemaType::Clr2 => "clr2",
            SchemaType::Custom => "custom",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schemas that are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassthroughSchema {
    /// Comprehensive Learner Record 2.0.
    Clr2,
    /// Anything else.
    Custom,
}

impl PassthroughSchema {
    /// Wire name (`clr2`, `custom`).
    pub fn as_str(&self) -> &'static str {
        SchemaType::from(*self).as_str()
    }
}

impl fmt::Display for PassthroughSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PassthroughSchema> for SchemaType {
    fn from(schema: PassthroughSchema) -> Self {
        match schema {
            PassthroughSchema::Clr2 => SchemaType::Clr2,
            PassthroughSchema::Custom => SchemaType::Custom,
        }
    }
}

/// A non-OBv3 credential carried through the editor as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassthroughCredential {
    /// Detected schema.
    pub schema_type: PassthroughSchema,
    /// Display name for lists and headers.
    pub name: String,
    /// The authoritative credential body.
    pub raw_json: serde_json::Value,
}

/// A credential template of any schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CredentialTemplate {
    /// A structurally edited OBv3 template.
    Obv3(Box<Obv3Template>),
    /// A raw credential of another schema.
    Passthrough(PassthroughCredential),
}

impl CredentialTemplate {
    /// The schema of this template.
    pub fn schema_type(&self) -> SchemaType {
        match self {
            CredentialTemplate::Obv3(_) => SchemaType::Obv3,
            CredentialTemplate::Passthrough(p) => p.schema_type.into(),
        }
    }

    /// The structured OBv3 template, if this is one.
    pub fn as_obv3(&self) -> Option<&Obv3Template> {
        match self {
            CredentialTemplate::Obv3(t) => Some(t),
            CredentialTemplate::Passthrough(_) => None,
        }
    }

    /// Mutable access to the structured OBv3 template, if this is one.
    pub fn as_obv3_mut(&mut self) -> Option<&mut Obv3Template> {
        match self {
            CredentialTemplate::Obv3(t) => Some(t),
            CredentialTemplate::Passthrough(_) => None,
        }
    }
}

impl From<Obv3Template> for CredentialTemplate {
    fn from(template: Obv3Template) -> Self {
        CredentialTemplate::Obv3(Box::new(template))
    }
}

// ---------------------------------------------------------------------------
// OBv3 template
// ---------------------------------------------------------------------------

/// The editable structure of an OBv3 AchievementCredential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obv3Template {
    /// JSON-LD `@context`, emitted verbatim.
    #[serde(default = "default_contexts")]
    pub contexts: Vec<String>,
    /// Credential `type`, emitted verbatim.
    #[serde(default = "default_types")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldBinding>,
    #[serde(default)]
    pub name: FieldBinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<FieldBinding>,
    #[serde(default)]
    pub issuer: IssuerTemplate,
    #[serde(default)]
    pub credential_subject: SubjectTemplate,
    /// Issuance timestamp. Conventionally system-bound.
    #[serde(default)]
    pub valid_from: FieldBinding,
    /// Expiration. `Some` means the credential expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<FieldBinding>,
    /// Free-form extension data added to the credential subject.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
}

/// Issuer profile fields. Only `id` reaches the serialized credential; the
/// rest is presentation metadata resolved from the issuer's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldBinding>,
    #[serde(default)]
    pub name: FieldBinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<FieldBinding>,
}

/// The recipient and what they achieved (OBv3 `AchievementSubject`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldBinding>,
    #[serde(default)]
    pub achievement: AchievementTemplate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<EvidenceTemplate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result: Vec<ResultTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_earned: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_start_date: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_end_date: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<FieldBinding>,
    /// Recipient identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<IdentifierEntryTemplate>,
}

/// OBv3 `Achievement`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldBinding>,
    #[serde(default)]
    pub name: FieldBinding,
    #[serde(default)]
    pub description: FieldBinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_type: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<CriteriaTemplate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alignment: Vec<AlignmentTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_code: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_available: Option<FieldBinding>,
    /// Literal tags, emitted verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_language: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_identifier: Vec<IdentifierEntryTemplate>,
    /// Possible results of this achievement.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result_description: Vec<ResultDescriptionTemplate>,
}

/// OBv3 `Criteria`. Always emitted, even when both fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<FieldBinding>,
}

/// OBv3 `Alignment` to an external framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentTemplate {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub target_name: FieldBinding,
    #[serde(default)]
    pub target_url: FieldBinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_description: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_framework: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_code: Option<FieldBinding>,
}

/// OBv3 `Evidence`. Only one representative type is modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceTemplate {
    #[serde(default)]
    pub id: ItemId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub evidence_type: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<FieldBinding>,
}

/// OBv3 `Result`: a grade or score the recipient achieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTemplate {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_description: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_level: Option<FieldBinding>,
}

/// An identifier and its type. Used for recipient identifiers and for an
/// achievement's other identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierEntryTemplate {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub identifier: FieldBinding,
    #[serde(default)]
    pub identifier_type: FieldBinding,
}

/// OBv3 `ResultDescription`. Its `id` is part of the credential (results
/// refer to it), unlike the item ids of other collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDescriptionTemplate {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default)]
    pub name: FieldBinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<FieldBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_value: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_value: Option<FieldBinding>,
}

/// A free-form key/value pair. Both sides may be bound dynamically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    #[serde(default)]
    pub id: ItemId,
    pub key: FieldBinding,
    pub value: FieldBinding,
}

impl Obv3Template {
    /// Whether the credential expires.
    pub fn has_expiration(&self) -> bool {
        self.valid_until.is_some()
    }

    /// Add (`Some`) or remove (`None`) the expiration.
    pub fn set_expiration(&mut self, valid_until: Option<FieldBinding>) {
        self.valid_until = valid_until;
    }

    /// Copy-and-replace form of [`set_expiration`](Self::set_expiration).
    pub fn with_expiration(mut self, valid_until: Option<FieldBinding>) -> Self {
        self.set_expiration(valid_until);
        self
    }

    /// Visit every binding in serializer order.
    ///
    /// Absent optional bindings are skipped. Issuer metadata and custom
    /// fields are visited too, even though the issuer metadata is not
    /// embedded in the serialized credential.
    pub fn visit_bindings<F>(&self, visit: &mut F)
    where
        F: FnMut(BindingSlot, &FieldBinding),
    {
        use slots::*;

        let opt = |slot: BindingSlot, b: &Option<FieldBinding>, visit: &mut F| {
            if let Some(b) = b {
                visit(slot, b);
            }
        };

        // Core
        opt(CREDENTIAL_ID, &self.id, visit);
        visit(CREDENTIAL_NAME, &self.name);
        opt(CREDENTIAL_DESCRIPTION, &self.description, visit);
        opt(CREDENTIAL_IMAGE, &self.image, visit);

        // Issuer
        let issuer = &self.issuer;
        opt(ISSUER_ID, &issuer.id, visit);
        visit(ISSUER_NAME, &issuer.name);
        opt(ISSUER_URL, &issuer.url, visit);
        opt(ISSUER_EMAIL, &issuer.email, visit);
        opt(ISSUER_DESCRIPTION, &issuer.description, visit);
        opt(ISSUER_IMAGE, &issuer.image, visit);

        // Dates
        visit(VALID_FROM, &self.valid_from);
        opt(VALID_UNTIL, &self.valid_until, visit);

        // Subject
        let subject = &self.credential_subject;
        opt(SUBJECT_ID, &subject.id, visit);
        opt(SUBJECT_NAME, &subject.name, visit);

        // Achievement
        let ach = &subject.achievement;
        opt(ACHIEVEMENT_ID, &ach.id, visit);
        visit(ACHIEVEMENT_NAME, &ach.name);
        visit(ACHIEVEMENT_DESCRIPTION, &ach.description);
        opt(ACHIEVEMENT_TYPE, &ach.achievement_type, visit);
        opt(ACHIEVEMENT_IMAGE, &ach.image, visit);
        if let Some(criteria) = &ach.criteria {
            opt(CRITERIA_ID, &criteria.id, visit);
            opt(CRITERIA_NARRATIVE, &criteria.narrative, visit);
        }
        opt(HUMAN_CODE, &ach.human_code, visit);
        opt(FIELD_OF_STUDY, &ach.field_of_study, visit);
        opt(SPECIALIZATION, &ach.specialization, visit);
        opt(CREDITS_AVAILABLE, &ach.credits_available, visit);
        opt(IN_LANGUAGE, &ach.in_language, visit);
        opt(VERSION, &ach.version, visit);
        for oi in &ach.other_identifier {
            visit(OTHER_IDENTIFIER, &oi.identifier);
            visit(OTHER_IDENTIFIER_TYPE, &oi.identifier_type);
        }
        for rd in &ach.result_description {
            visit(RESULT_DESCRIPTION_NAME, &rd.name);
            opt(RESULT_DESCRIPTION_TYPE, &rd.result_type, visit);
            opt(RESULT_DESCRIPTION_REQUIRED_VALUE, &rd.required_value, visit);
        }
        for a in &ach.alignment {
            visit(ALIGNMENT_TARGET_NAME, &a.target_name);
            visit(ALIGNMENT_TARGET_URL, &a.target_url);
            opt(ALIGNMENT_TARGET_DESCRIPTION, &a.target_description, visit);
            opt(ALIGNMENT_TARGET_FRAMEWORK, &a.target_framework, visit);
            opt(ALIGNMENT_TARGET_CODE, &a.target_code, visit);
        }

        // Subject extras
        opt(CREDITS_EARNED, &subject.credits_earned, visit);
        opt(ACTIVITY_START_DATE, &subject.activity_start_date, visit);
        opt(ACTIVITY_END_DATE, &subject.activity_end_date, visit);
        opt(TERM, &subject.term, visit);
        opt(LICENSE_NUMBER, &subject.license_number, visit);
        opt(ROLE, &subject.role, visit);
        for id in &subject.identifier {
            visit(RECIPIENT_IDENTIFIER, &id.identifier);
            visit(RECIPIENT_IDENTIFIER_TYPE, &id.identifier_type);
        }
        for r in &subject.result {
            opt(RESULT_DESCRIPTION_REF, &r.result_description, visit);
            opt(RESULT_VALUE, &r.value, visit);
            opt(RESULT_STATUS, &r.status, visit);
            opt(RESULT_ACHIEVED_LEVEL, &r.achieved_level, visit);
        }
        for e in &subject.evidence {
            opt(EVIDENCE_TYPE, &e.evidence_type, visit);
            opt(EVIDENCE_NAME, &e.name, visit);
            opt(EVIDENCE_DESCRIPTION, &e.description, visit);
            opt(EVIDENCE_NARRATIVE, &e.narrative, visit);
            opt(EVIDENCE_GENRE, &e.genre, visit);
            opt(EVIDENCE_AUDIENCE, &e.audience, visit);
        }

        for f in &self.custom_fields {
            visit(CUSTOM_FIELD_KEY, &f.key);
            visit(CUSTOM_FIELD_VALUE, &f.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Binding slots
// ---------------------------------------------------------------------------

/// Where a binding lives in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingSlot {
    /// Dotted credential path; `[]` marks a collection item.
    pub path: &'static str,
    /// Human label shown in the editor. Unnamed dynamic bindings derive
    /// their variable name from it.
    pub label: &'static str,
    /// The reserved placeholder the serializer emits when this slot has no
    /// value of its own.
    pub system: Option<SystemVariable>,
}

impl BindingSlot {
    const fn new(path: &'static str, label: &'static str) -> Self {
        Self {
            path,
            label,
            system: None,
        }
    }

    const fn system(path: &'static str, label: &'static str, var: SystemVariable) -> Self {
        Self {
            path,
            label,
            system: Some(var),
        }
    }
}

/// Every binding slot of [`Obv3Template`].
pub mod slots {
    use super::BindingSlot;
    use crate::placeholder::SystemVariable;

    pub const CREDENTIAL_ID: BindingSlot = BindingSlot::new("id", "Credential ID");
    pub const CREDENTIAL_NAME: BindingSlot = BindingSlot::new("name", "Credential Name");
    pub const CREDENTIAL_DESCRIPTION: BindingSlot =
        BindingSlot::new("description", "Credential Description");
    pub const CREDENTIAL_IMAGE: BindingSlot = BindingSlot::new("image", "Credential Image");

    pub const ISSUER_ID: BindingSlot =
        BindingSlot::system("issuer", "Issuer DID", SystemVariable::IssuerDid);
    pub const ISSUER_NAME: BindingSlot = BindingSlot::new("issuer.name", "Issuer Name");
    pub const ISSUER_URL: BindingSlot = BindingSlot::new("issuer.url", "Issuer URL");
    pub const ISSUER_EMAIL: BindingSlot = BindingSlot::new("issuer.email", "Issuer Email");
    pub const ISSUER_DESCRIPTION: BindingSlot =
        BindingSlot::new("issuer.description", "Issuer Description");
    pub const ISSUER_IMAGE: BindingSlot = BindingSlot::new("issuer.image", "Issuer Image");

    pub const VALID_FROM: BindingSlot =
        BindingSlot::system("issuanceDate", "Valid From", SystemVariable::IssueDate);
    pub const VALID_UNTIL: BindingSlot = BindingSlot::new("expirationDate", "Valid Until");

    pub const SUBJECT_ID: BindingSlot = BindingSlot::new("credentialSubject.id", "Recipient DID");
    pub const SUBJECT_NAME: BindingSlot =
        BindingSlot::new("credentialSubject.name", "Recipient Name");

    pub const ACHIEVEMENT_ID: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.id", "Achievement ID");
    pub const ACHIEVEMENT_NAME: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.name", "Achievement Name");
    pub const ACHIEVEMENT_DESCRIPTION: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.description",
        "Achievement Description",
    );
    pub const ACHIEVEMENT_TYPE: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.achievementType",
        "Achievement Type",
    );
    pub const ACHIEVEMENT_IMAGE: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.image", "Achievement Image");
    pub const CRITERIA_ID: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.criteria.id", "Criteria URL");
    pub const CRITERIA_NARRATIVE: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.criteria.narrative",
        "Criteria Narrative",
    );
    pub const HUMAN_CODE: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.humanCode", "Human Code");
    pub const FIELD_OF_STUDY: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.fieldOfStudy", "Field of Study");
    pub const SPECIALIZATION: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.specialization", "Specialization");
    pub const CREDITS_AVAILABLE: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.creditsAvailable",
        "Credits Available",
    );
    pub const IN_LANGUAGE: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.inLanguage", "Language");
    pub const VERSION: BindingSlot =
        BindingSlot::new("credentialSubject.achievement.version", "Version");
    pub const OTHER_IDENTIFIER: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.otherIdentifier[].identifier",
        "Other Identifier",
    );
    pub const OTHER_IDENTIFIER_TYPE: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.otherIdentifier[].identifierType",
        "Other Identifier Type",
    );
    pub const RESULT_DESCRIPTION_NAME: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.resultDescription[].name",
        "Result Description Name",
    );
    pub const RESULT_DESCRIPTION_TYPE: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.resultDescription[].resultType",
        "Result Type",
    );
    pub const RESULT_DESCRIPTION_REQUIRED_VALUE: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.resultDescription[].requiredValue",
        "Required Value",
    );
    pub const ALIGNMENT_TARGET_NAME: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.alignment[].targetName",
        "Alignment Target Name",
    );
    pub const ALIGNMENT_TARGET_URL: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.alignment[].targetUrl",
        "Alignment Target URL",
    );
    pub const ALIGNMENT_TARGET_DESCRIPTION: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.alignment[].targetDescription",
        "Alignment Target Description",
    );
    pub const ALIGNMENT_TARGET_FRAMEWORK: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.alignment[].targetFramework",
        "Alignment Target Framework",
    );
    pub const ALIGNMENT_TARGET_CODE: BindingSlot = BindingSlot::new(
        "credentialSubject.achievement.alignment[].targetCode",
        "Alignment Target Code",
    );

    pub const CREDITS_EARNED: BindingSlot =
        BindingSlot::new("credentialSubject.creditsEarned", "Credits Earned");
    pub const ACTIVITY_START_DATE: BindingSlot =
        BindingSlot::new("credentialSubject.activityStartDate", "Activity Start Date");
    pub const ACTIVITY_END_DATE: BindingSlot =
        BindingSlot::new("credentialSubject.activityEndDate", "Activity End Date");
    pub const TERM: BindingSlot = BindingSlot::new("credentialSubject.term", "Term");
    pub const LICENSE_NUMBER: BindingSlot =
        BindingSlot::new("credentialSubject.licenseNumber", "License Number");
    pub const ROLE: BindingSlot = BindingSlot::new("credentialSubject.role", "Role");
    pub const RECIPIENT_IDENTIFIER: BindingSlot = BindingSlot::new(
        "credentialSubject.identifier[].identityHash",
        "Recipient Identifier",
    );
    pub const RECIPIENT_IDENTIFIER_TYPE: BindingSlot = BindingSlot::new(
        "credentialSubject.identifier[].identityType",
        "Recipient Identifier Type",
    );
    pub const RESULT_DESCRIPTION_REF: BindingSlot = BindingSlot::new(
        "credentialSubject.result[].resultDescription",
        "Result Description",
    );
    pub const RESULT_VALUE: BindingSlot =
        BindingSlot::new("credentialSubject.result[].value", "Result Value");
    pub const RESULT_STATUS: BindingSlot =
        BindingSlot::new("credentialSubject.result[].status", "Result Status");
    pub const RESULT_ACHIEVED_LEVEL: BindingSlot = BindingSlot::new(
        "credentialSubject.result[].achievedLevel",
        "Achieved Level",
    );
    pub const EVIDENCE_TYPE: BindingSlot =
        BindingSlot::new("credentialSubject.evidence[].type", "Evidence Type");
    pub const EVIDENCE_NAME: BindingSlot =
        BindingSlot::new("credentialSubject.evidence[].name", "Evidence Name");
    pub const EVIDENCE_DESCRIPTION: BindingSlot = BindingSlot::new(
        "credentialSubject.evidence[].description",
        "Evidence Description",
    );
    pub const EVIDENCE_NARRATIVE: BindingSlot =
        BindingSlot::new("credentialSubject.evidence[].narrative", "Evidence Narrative");
    pub const EVIDENCE_GENRE: BindingSlot =
        BindingSlot::new("credentialSubject.evidence[].genre", "Evidence Genre");
    pub const EVIDENCE_AUDIENCE: BindingSlot =
        BindingSlot::new("credentialSubject.evidence[].audience", "Evidence Audience");

    pub const CUSTOM_FIELD_KEY: BindingSlot =
        BindingSlot::new("credentialSubject[custom].key", "Custom Field Key");
    pub const CUSTOM_FIELD_VALUE: BindingSlot =
        BindingSlot::new("credentialSubject[custom].value", "Custom Field Value");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{dynamic_field, static_field, system_field};

    fn minimal() -> Obv3Template {
        Obv3Template {
            contexts: default_contexts(),
            types: default_types(),
            id: None,
            name: static_field("Knot Tying"),
            description: None,
            image: None,
            issuer: IssuerTemplate {
                id: Some(system_field(SystemVariable::IssuerDid.description())),
                name: static_field("Troop 42"),
                ..Default::default()
            },
            credential_subject: SubjectTemplate {
                name: Some(dynamic_field("recipient_name", "")),
                achievement: AchievementTemplate {
                    name: static_field("Knot Tying"),
                    ..Default::default()
                },
                ..Default::default()
            },
            valid_from: system_field(SystemVariable::IssueDate.description()),
            valid_until: None,
            custom_fields: Vec::new(),
        }
    }

    #[test]
    fn expiration_toggle_is_explicit() {
        let t = minimal();
        assert!(!t.has_expiration());

        let with = t.clone().with_expiration(Some(dynamic_field("expires_at", "")));
        assert!(with.has_expiration());
        assert!(!t.has_expiration(), "copy-and-replace leaves the original alone");

        let without = with.with_expiration(None);
        assert!(!without.has_expiration());
    }

    #[test]
    fn visit_bindings_skips_absent_optionals() {
        let t = minimal();
        let mut paths = Vec::new();
        t.visit_bindings(&mut |slot, _| paths.push(slot.path));
        assert_eq!(
            paths,
            vec![
                "name",
                "issuer",
                "issuer.name",
                "issuanceDate",
                "credentialSubject.name",
                "credentialSubject.achievement.name",
                "credentialSubject.achievement.description",
            ]
        );
    }

    #[test]
    fn visit_bindings_reaches_collections_and_custom_fields() {
        let mut t = minimal();
        t.credential_subject.achievement.alignment.push(AlignmentTemplate {
            id: ItemId::new(),
            target_name: static_field("Knots"),
            target_url: dynamic_field("framework_url", ""),
            target_description: None,
            target_framework: None,
            target_code: Some(static_field("K-1")),
        });
        t.custom_fields.push(CustomField {
            id: ItemId::new(),
            key: static_field("patrol"),
            value: dynamic_field("patrol_name", ""),
        });

        let mut dynamic = Vec::new();
        t.visit_bindings(&mut |slot, b| {
            if b.is_dynamic() {
                dynamic.push(slot.label);
            }
        });
        assert_eq!(
            dynamic,
            vec!["Recipient Name", "Alignment Target URL", "Custom Field Value"]
        );
    }

    #[test]
    fn system_slots_name_their_reserved_variable() {
        assert_eq!(slots::ISSUER_ID.system, Some(SystemVariable::IssuerDid));
        assert_eq!(slots::VALID_FROM.system, Some(SystemVariable::IssueDate));
        assert_eq!(slots::CREDENTIAL_NAME.system, None);
    }

    #[test]
    fn schema_type_of_variants() {
        let obv3: CredentialTemplate = minimal().into();
        assert_eq!(obv3.schema_type(), SchemaType::Obv3);
        assert!(obv3.as_obv3().is_some());

        let pass = CredentialTemplate::Passthrough(PassthroughCredential {
            schema_type: PassthroughSchema::Clr2,
            name: "Transcript".to_string(),
            raw_json: serde_json::json!({"type": ["ClrCredential"]}),
        });
        assert_eq!(pass.schema_type(), SchemaType::Clr2);
        assert!(pass.as_obv3().is_none());
        assert_eq!(pass.schema_type().to_string(), "clr2");
    }

    #[test]
    fn passthrough_schema_names_match_schema_type() {
        for schema in [PassthroughSchema::Clr2, PassthroughSchema::Custom] {
            assert_eq!(schema.as_str(), SchemaType::from(schema).as_str());
            assert_eq!(schema.to_string(), schema.as_str());
        }
        assert_eq!(PassthroughSchema::Custom.as_str(), "custom");
    }

    #[test]
    fn template_file_format_round_trips() {
        let t: CredentialTemplate = minimal()
            .with_expiration(Some(static_field("2030-01-01T00:00:00Z")))
            .into();
        let text = serde_json::to_string_pretty(&t).unwrap();
        assert!(text.contains("\"kind\": \"obv3\""));
        assert!(text.contains("\"validUntil\""));
        let back: CredentialTemplate = serde_json::from_str(&text).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn template_file_defaults_missing_sections() {
        let t: CredentialTemplate = serde_json::from_value(serde_json::json!({
            "kind": "obv3",
            "name": {"mode": "static", "value": "Only a name"}
        }))
        .unwrap();
        let t = t.as_obv3().unwrap();
        assert_eq!(t.contexts, default_contexts());
        assert_eq!(t.types, default_types());
        assert_eq!(t.name.value(), "Only a name");
        assert!(t.credential_subject.achievement.criteria.is_none());
    }
}
