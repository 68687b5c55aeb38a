//! # boost-core: Foundational Types for Boost Credential Templates
//!
//! This crate defines the data model that the template transformer in
//! `boost-template` operates on. It depends on no other `boost-*` crate.
//!
//! ## Key Design Principles
//!
//! 1. **Bindings are a closed sum type.** A [`FieldBinding`] is static,
//!    dynamic, or system-bound, never two at once.
//!
//! 2. **One placeholder grammar.** A value is either entirely `{{name}}` or
//!    entirely a literal; [`parse_placeholder`] is the single definition.
//!
//! 3. **Presence is explicit.** Optional template fields are
//!    `Option<FieldBinding>`; `None` and an empty static value are
//!    different states.
//!
//! 4. **Schema dispatch is an enum.** [`CredentialTemplate`] is either a
//!    structured OBv3 template or a raw passthrough credential.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Templates are plain owned values; `Clone` is a deep copy.

pub mod binding;
pub mod error;
pub mod ids;
pub mod placeholder;
pub mod template;

// Re-export primary types for ergonomic imports.
pub use binding::{dynamic_field, label_to_variable_name, static_field, system_field, FieldBinding};
pub use error::TemplateError;
pub use ids::ItemId;
pub use placeholder::{parse_placeholder, placeholder, SystemVariable};
pub use template::{
    default_contexts, default_types, slots, AchievementTemplate, AlignmentTemplate, BindingSlot,
    CredentialTemplate, CriteriaTemplate, CustomField, EvidenceTemplate, IdentifierEntryTemplate,
    IssuerTemplate, Obv3Template, PassthroughCredential, PassthroughSchema,
    ResultDescriptionTemplate, ResultTemplate, SchemaType, SubjectTemplate, DEFAULT_CONTEXTS,
    DEFAULT_TYPES,
};
