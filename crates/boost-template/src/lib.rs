//! # boost-template: Credential Template Transformer
//!
//! Converts between the editable [`boost_core::Obv3Template`] model and
//! OBv3 AchievementCredential JSON with `{{variable}}` placeholders.
//!
//! ## Modules
//!
//! - [`presets`]: the fixed catalog of starting templates.
//! - [`serialize`]: template → credential JSON.
//! - [`deserialize`]: credential JSON → template.
//! - [`schema`]: OBv3 / CLR 2.0 / custom detection.
//! - [`variables`]: which placeholders a template needs, and advisory
//!   validation.
//! - [`issuance`]: filling placeholders at issuance time.
//!
//! ## Round Trip
//!
//! `json_to_template(template_to_json(t))` preserves every binding mode and
//! variable name the serializer emits. It does not preserve issuer
//! metadata, custom fields, or dynamic default values, none of which are
//! written into the credential.

pub mod deserialize;
pub mod issuance;
pub mod presets;
pub mod schema;
pub mod serialize;
pub mod variables;

pub use deserialize::{json_to_field, json_to_template, parse_template};
pub use issuance::{
    issue, missing_variables, resolve_placeholders, IssuanceContext, IssuanceError, VariableValues,
};
pub use presets::{
    blank_template, instantiate_preset, instantiate_preset_with_issuer, preset, presets,
    IssuerDefaults, PresetSummary, TemplatePreset,
};
pub use schema::detect_schema_type;
pub use serialize::{field_to_json, obv3_to_json, template_to_json, ToCredentialJson};
pub use variables::{
    extract_dynamic_variables, extract_variables_by_type, extract_variables_from_raw_json,
    validate_template, ExtractedVariables,
};
