//! # Template ↔ Credential Round Trip
//!
//! Exercises the serializer and deserializer together:
//!
//! 1. The blank template renders the canonical OBv3 skeleton.
//! 2. Binding modes and variable names survive JSON → template → JSON.
//! 3. The placeholder grammar is anchored to the whole string.
//! 4. Variable analysis agrees with what the serializer writes.

use boost_core::{
    dynamic_field, static_field, AlignmentTemplate, CredentialTemplate, FieldBinding, ItemId,
    Obv3Template,
};
use boost_template::{
    blank_template, extract_dynamic_variables, extract_variables_from_raw_json, field_to_json,
    instantiate_preset, json_to_field, json_to_template, obv3_to_json, presets, template_to_json,
    ToCredentialJson,
};
use serde_json::json;

fn reparse(template: &Obv3Template) -> Obv3Template {
    match json_to_template(&obv3_to_json(template)) {
        CredentialTemplate::Obv3(t) => *t,
        other => panic!("rendered template did not read back as OBv3: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 1. Blank skeleton
// ---------------------------------------------------------------------------

#[test]
fn blank_template_renders_skeleton() {
    let json = blank_template().to_json();
    assert_eq!(
        json["@context"],
        json!([
            "https://www.w3.org/ns/credentials/v2",
            "https://purl.imsglobal.org/spec/ob/v3p0/context-3.0.3.json"
        ])
    );
    assert_eq!(json["type"], json!(["VerifiableCredential", "OpenBadgeCredential"]));
    assert_eq!(json["name"], "Untitled Credential");
    assert_eq!(json["issuer"], "{{issuer_did}}");
    assert_eq!(json["issuanceDate"], "{{issue_date}}");
    assert_eq!(json["credentialSubject"]["type"], json!(["AchievementSubject"]));
    assert_eq!(json["credentialSubject"]["name"], "{{recipient_name}}");
    assert_eq!(
        json["credentialSubject"]["achievement"]["criteria"],
        json!({"narrative": ""})
    );
    assert!(json.get("expirationDate").is_none());
}

#[test]
fn every_preset_renders_criteria_and_system_slots() {
    for summary in presets() {
        let json = instantiate_preset(summary.id).unwrap().to_json();
        assert!(
            json["credentialSubject"]["achievement"]["criteria"].is_object(),
            "{} has no criteria",
            summary.id
        );
        assert_eq!(json["issuer"], "{{issuer_did}}", "{}", summary.id);
        assert_eq!(json["issuanceDate"], "{{issue_date}}", "{}", summary.id);
    }
}

// ---------------------------------------------------------------------------
// 2. Modes and names survive
// ---------------------------------------------------------------------------

#[test]
fn presets_round_trip_binding_modes() {
    for summary in presets() {
        let original = instantiate_preset(summary.id).unwrap();
        let back = reparse(&original);

        assert_eq!(
            extract_dynamic_variables(&CredentialTemplate::from(back.clone())),
            extract_dynamic_variables(&CredentialTemplate::from(original.clone())),
            "{} lost dynamic variables",
            summary.id
        );
        assert!(back.valid_from.is_system(), "{}", summary.id);
        assert!(
            back.issuer.id.as_ref().is_some_and(FieldBinding::is_system),
            "{}",
            summary.id
        );
        assert_eq!(back.has_expiration(), original.has_expiration());
        assert_eq!(obv3_to_json(&back), obv3_to_json(&original), "{}", summary.id);
    }
}

#[test]
fn round_trip_drops_issuer_metadata_and_custom_fields() {
    let mut t = instantiate_preset("badge").unwrap();
    t.issuer.name = static_field("Troop 42");
    t.issuer.email = Some(static_field("leader@troop42.example"));
    t.custom_fields.push(boost_core::CustomField {
        id: ItemId::new(),
        key: static_field("patrol"),
        value: static_field("Eagles"),
    });

    let back = reparse(&t);
    assert_eq!(back.issuer.name, static_field(""));
    assert!(back.issuer.email.is_none());
    assert!(back.custom_fields.is_empty());
}

#[test]
fn alignment_order_survives() {
    let mut t = blank_template();
    t.name = static_field("Ordered");
    for i in 0..4 {
        t.credential_subject.achievement.alignment.push(AlignmentTemplate {
            id: ItemId::new(),
            target_name: static_field(format!("Target {i}")),
            target_url: dynamic_field(format!("url_{i}"), ""),
            target_description: None,
            target_framework: None,
            target_code: None,
        });
    }
    let back = reparse(&t);
    let names: Vec<&str> = back
        .credential_subject
        .achievement
        .alignment
        .iter()
        .map(|a| a.target_name.value())
        .collect();
    assert_eq!(names, vec!["Target 0", "Target 1", "Target 2", "Target 3"]);
    assert_eq!(
        back.credential_subject.achievement.alignment[2].target_url,
        dynamic_field("url_2", "")
    );
}

// ---------------------------------------------------------------------------
// 3. Placeholder anchoring
// ---------------------------------------------------------------------------

#[test]
fn embedded_placeholder_is_literal() {
    assert_eq!(json_to_field(&json!("a {{x}} b")), static_field("a {{x}} b"));
    assert_eq!(json_to_field(&json!("{{x}}")), dynamic_field("x", ""));
    assert_eq!(json_to_field(&json!("{{x}}{{y}}")), static_field("{{x}}{{y}}"));
    assert_eq!(json_to_field(&json!("{{ x }}")), static_field("{{ x }}"));
}

// ---------------------------------------------------------------------------
// 4. Analyzer agrees with serializer
// ---------------------------------------------------------------------------

#[test]
fn extraction_is_complete_sorted_and_deduplicated() {
    let mut t = blank_template();
    t.credential_subject.name = None;
    t.name = dynamic_field("zeta_title", "");
    t.credential_subject.achievement.name = dynamic_field("alpha_name", "");
    t.credential_subject.achievement.alignment.push(AlignmentTemplate {
        id: ItemId::new(),
        target_name: static_field("Framework"),
        target_url: dynamic_field("mid_url", ""),
        target_description: Some(dynamic_field("alpha_name", "")),
        target_framework: None,
        target_code: None,
    });
    let vars = extract_dynamic_variables(&t.into());
    assert_eq!(vars, vec!["alpha_name", "mid_url", "zeta_title"]);
}

#[test]
fn analyzer_covers_every_rendered_dynamic_placeholder() {
    for summary in presets() {
        let template: CredentialTemplate = instantiate_preset(summary.id).unwrap().into();
        let rendered = template_to_json(&template);
        let in_json = extract_variables_from_raw_json(&rendered).dynamic;
        let analyzed = extract_dynamic_variables(&template);
        for name in &in_json {
            assert!(
                analyzed.contains(name),
                "{}: {name} rendered but not analyzed",
                summary.id
            );
        }
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn dynamic_binding_round_trips(name in "[A-Za-z0-9_]{1,24}", default in ".*") {
            let rendered = field_to_json(&dynamic_field(name.as_str(), default)).unwrap();
            prop_assert_eq!(json_to_field(&json!(rendered)), dynamic_field(name.as_str(), ""));
        }

        #[test]
        fn static_binding_round_trips(value in ".+") {
            prop_assume!(boost_core::parse_placeholder(&value).is_none());
            let rendered = field_to_json(&static_field(value.as_str())).unwrap();
            prop_assert_eq!(json_to_field(&json!(rendered)), static_field(value.as_str()));
        }

        #[test]
        fn serialization_is_deterministic(title in "[ -~]{0,40}") {
            let mut t = blank_template();
            t.name = static_field(title);
            prop_assert_eq!(obv3_to_json(&t), obv3_to_json(&t.clone()));
        }
    }
}
