//! # Preset Catalog
//!
//! Starting points for new credential templates. The catalog is built once
//! and never handed out by reference: every accessor returns a deep copy,
//! so editing an instantiated preset can never leak into the catalog or
//! into another instantiation.
//!
//! Every preset starts from the same base: default contexts and types, a
//! system-bound issuer id and issuance date, and a dynamic recipient name.

use std::sync::LazyLock;

use serde::Serialize;

use boost_core::{
    default_contexts, default_types, dynamic_field, static_field, system_field,
    AchievementTemplate, AlignmentTemplate, CriteriaTemplate, EvidenceTemplate, IssuerTemplate,
    ItemId, Obv3Template, ResultDescriptionTemplate, ResultTemplate, SubjectTemplate,
    SystemVariable,
};

/// Id of the empty preset.
pub const BLANK_PRESET_ID: &str = "blank";

/// A named template starting point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplatePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Display icon (an emoji).
    pub icon: &'static str,
    pub template: Obv3Template,
}

/// Catalog listing entry, without the template body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Issuer profile values applied when instantiating a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuerDefaults {
    pub name: Option<String>,
    pub image: Option<String>,
}

static CATALOG: LazyLock<Vec<TemplatePreset>> = LazyLock::new(build_catalog);

/// Summaries of every preset, in catalog order.
pub fn presets() -> Vec<PresetSummary> {
    CATALOG
        .iter()
        .map(|p| PresetSummary {
            id: p.id,
            name: p.name,
            description: p.description,
            icon: p.icon,
        })
        .collect()
}

/// A deep copy of one preset.
pub fn preset(id: &str) -> Option<TemplatePreset> {
    CATALOG.iter().find(|p| p.id == id).cloned()
}

/// A fresh, independently editable template from a preset.
pub fn instantiate_preset(id: &str) -> Option<Obv3Template> {
    let template = preset(id).map(|p| p.template);
    if template.is_none() {
        tracing::warn!(preset = id, "unknown preset");
    }
    template
}

/// A fresh copy of the blank template.
pub fn blank_template() -> Obv3Template {
    instantiate_preset(BLANK_PRESET_ID).unwrap_or_else(base_template)
}

/// Instantiate a preset and fill the issuer name and image from the
/// issuer's profile. Issuer fields the preset binds dynamically are kept.
pub fn instantiate_preset_with_issuer(id: &str, issuer: &IssuerDefaults) -> Option<Obv3Template> {
    let mut template = instantiate_preset(id)?;
    if let Some(name) = &issuer.name {
        if !template.issuer.name.is_dynamic() {
            template.issuer.name = static_field(name.as_str());
        }
    }
    if let Some(image) = &issuer.image {
        if !template.issuer.image.as_ref().is_some_and(|f| f.is_dynamic()) {
            template.issuer.image = Some(static_field(image.as_str()));
        }
    }
    tracing::debug!(preset = id, "instantiated preset with issuer defaults");
    Some(template)
}

// ---------------------------------------------------------------------------
// Catalog contents
// ---------------------------------------------------------------------------

fn base_template() -> Obv3Template {
    Obv3Template {
        contexts: default_contexts(),
        types: default_types(),
        id: None,
        name: static_field(""),
        description: None,
        image: None,
        issuer: IssuerTemplate {
            id: Some(system_field(SystemVariable::IssuerDid.description())),
            name: static_field(""),
            ..Default::default()
        },
        credential_subject: SubjectTemplate {
            name: Some(dynamic_field("recipient_name", "")),
            achievement: AchievementTemplate {
                name: static_field(""),
                description: static_field(""),
                ..Default::default()
            },
            ..Default::default()
        },
        valid_from: system_field(SystemVariable::IssueDate.description()),
        valid_until: None,
        custom_fields: Vec::new(),
    }
}

fn criteria(narrative: &str) -> Option<CriteriaTemplate> {
    Some(CriteriaTemplate {
        id: None,
        narrative: Some(static_field(narrative)),
    })
}

fn build_catalog() -> Vec<TemplatePreset> {
    vec![
        TemplatePreset {
            id: BLANK_PRESET_ID,
            name: "Blank",
            description: "Start from scratch",
            icon: "📄",
            template: base_template(),
        },
        TemplatePreset {
            id: "course-completion",
            name: "Course Completion",
            description: "Recognize a learner who finished a course",
            icon: "🎓",
            template: course_completion(),
        },
        TemplatePreset {
            id: "badge",
            name: "Achievement Badge",
            description: "A simple badge for a skill or accomplishment",
            icon: "🏅",
            template: badge(),
        },
        TemplatePreset {
            id: "certificate",
            name: "Certificate",
            description: "A formal certificate with field of study",
            icon: "📜",
            template: certificate(),
        },
        TemplatePreset {
            id: "license",
            name: "License",
            description: "A professional license that expires",
            icon: "🪪",
            template: license(),
        },
        TemplatePreset {
            id: "membership",
            name: "Membership",
            description: "Membership in an organization, with a role",
            icon: "🤝",
            template: membership(),
        },
        TemplatePreset {
            id: "micro-credential",
            name: "Micro-Credential",
            description: "A skill credential aligned to a competency framework",
            icon: "⚡",
            template: micro_credential(),
        },
    ]
}

fn course_completion() -> Obv3Template {
    let mut t = base_template();
    t.name = static_field("Course Completion Certificate");
    t.description = Some(static_field("Awarded for successfully completing a course."));
    let subject = &mut t.credential_subject;
    subject.activity_start_date = Some(dynamic_field("course_start_date", ""));
    subject.activity_end_date = Some(dynamic_field("course_end_date", ""));
    subject.achievement = AchievementTemplate {
        name: dynamic_field("course_name", ""),
        description: dynamic_field("course_description", ""),
        achievement_type: Some(static_field("Course")),
        criteria: criteria("Completed all required modules and assessments."),
        credits_available: Some(dynamic_field("credits", "")),
        ..Default::default()
    };
    t
}

fn badge() -> Obv3Template {
    let mut t = base_template();
    t.name = static_field("Achievement Badge");
    t.credential_subject.achievement = AchievementTemplate {
        name: dynamic_field("badge_name", ""),
        description: dynamic_field("badge_description", ""),
        achievement_type: Some(static_field("Badge")),
        image: Some(dynamic_field("badge_image", "")),
        criteria: Some(CriteriaTemplate {
            id: None,
            narrative: Some(dynamic_field("criteria", "")),
        }),
        ..Default::default()
    };
    t
}

fn certificate() -> Obv3Template {
    let mut t = base_template();
    t.name = static_field("Certificate");
    t.credential_subject.achievement = AchievementTemplate {
        name: dynamic_field("certificate_name", ""),
        description: static_field("Certifies mastery of the stated field of study."),
        achievement_type: Some(static_field("Certificate")),
        criteria: criteria("Met every requirement of the certificate program."),
        field_of_study: Some(dynamic_field("field_of_study", "")),
        ..Default::default()
    };
    t.credential_subject.evidence.push(EvidenceTemplate {
        id: ItemId::indexed("evidence", 0),
        evidence_type: Some(static_field("Evidence")),
        name: Some(static_field("Final Project")),
        description: None,
        narrative: Some(dynamic_field("project_summary", "")),
        genre: None,
        audience: None,
    });
    t
}

fn license() -> Obv3Template {
    let mut t = base_template();
    t.name = static_field("Professional License");
    t.valid_until = Some(dynamic_field("expiration_date", ""));
    t.credential_subject.license_number = Some(dynamic_field("license_number", ""));
    t.credential_subject.achievement = AchievementTemplate {
        name: dynamic_field("license_type", ""),
        description: static_field("Licensed to practice in the stated jurisdiction."),
        achievement_type: Some(static_field("License")),
        criteria: criteria("Passed the licensing examination."),
        ..Default::default()
    };
    t
}

fn membership() -> Obv3Template {
    let mut t = base_template();
    t.name = static_field("Membership");
    t.valid_until = Some(dynamic_field("membership_expires", ""));
    let subject = &mut t.credential_subject;
    subject.role = Some(dynamic_field("member_role", ""));
    subject.activity_start_date = Some(dynamic_field("member_since", ""));
    subject.achievement = AchievementTemplate {
        name: dynamic_field("organization_name", ""),
        description: static_field("Member in good standing."),
        achievement_type: Some(static_field("Membership")),
        ..Default::default()
    };
    t
}

fn micro_credential() -> Obv3Template {
    let mut t = base_template();
    t.name = static_field("Micro-Credential");
    t.credential_subject.achievement = AchievementTemplate {
        name: dynamic_field("skill_name", ""),
        description: dynamic_field("skill_description", ""),
        achievement_type: Some(static_field("MicroCredential")),
        criteria: criteria("Demonstrated the skill in a supervised assessment."),
        alignment: vec![AlignmentTemplate {
            id: ItemId::indexed("alignment", 0),
            target_name: dynamic_field("competency_name", ""),
            target_url: dynamic_field("competency_url", ""),
            target_description: None,
            target_framework: Some(dynamic_field("framework_name", "")),
            target_code: None,
        }],
        result_description: vec![ResultDescriptionTemplate {
            id: ItemId::from("urn:uuid:assessment-level"),
            name: static_field("Assessment Level"),
            result_type: Some(static_field("RubricCriterionLevel")),
            allowed_value: Vec::new(),
            required_value: None,
        }],
        ..Default::default()
    };
    t.credential_subject.result.push(ResultTemplate {
        id: ItemId::indexed("result", 0),
        result_description: Some(static_field("urn:uuid:assessment-level")),
        value: None,
        status: None,
        achieved_level: Some(dynamic_field("achieved_level", "")),
    });
    t
}
