//! Submission payload assembly.
//!
//! Turns a draft's fields into the body the backend expects: camelCase keys,
//! trimmed text, compacted lists, files split out as attachments, auxiliary
//! selections merged into the body. Fields marked local-only never leave the
//! client. An end date is sent blank while its ongoing flag is set.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use hireflow_types::field::FieldValue;
use hireflow_types::submission::{Attachment, SubmissionPayload};

use crate::array_field;
use crate::definition::{FieldKind, WizardDefinition};
use crate::validate::rule::Rule;

/// `application_email` -> `applicationEmail`.
pub fn wire_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = !out.is_empty();
            continue;
        }
        if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn build_payload(
    def: &WizardDefinition,
    fields: &BTreeMap<String, FieldValue>,
    selections: &BTreeMap<String, String>,
) -> SubmissionPayload {
    let mut body = Map::new();
    let mut attachments = Vec::new();
    let open_ended = open_ended_fields(def, fields);

    for spec in def.fields.iter().filter(|f| f.submit) {
        let key = wire_key(spec.name);
        if open_ended.contains(spec.name) {
            body.insert(key, Value::String(String::new()));
            continue;
        }
        let value = fields
            .get(spec.name)
            .cloned()
            .unwrap_or_else(|| spec.default_value());

        match value {
            // Passwords go out exactly as typed.
            FieldValue::Text(s) if matches!(spec.kind, FieldKind::Secret) => {
                body.insert(key, Value::String(s));
            }
            FieldValue::Text(s) | FieldValue::Choice(s) => {
                body.insert(key, Value::String(s.trim().to_string()));
            }
            FieldValue::List(items) => {
                let compacted = array_field::compact(&items);
                body.insert(
                    key,
                    Value::Array(compacted.into_iter().map(Value::String).collect()),
                );
            }
            FieldValue::Flag(b) => {
                body.insert(key, Value::Bool(b));
            }
            FieldValue::File(Some(file)) => attachments.push(Attachment { name: key, file }),
            FieldValue::File(None) => {}
        }
    }

    for selection in def.selections {
        let value = selections
            .get(selection.key)
            .cloned()
            .unwrap_or_else(|| selection.default_option().to_string());
        body.insert(wire_key(selection.key), Value::String(value));
    }

    SubmissionPayload {
        kind: def.kind,
        endpoint: def.endpoint.to_string(),
        encoding: def.encoding,
        body,
        attachments,
        authenticated: def.requires_auth,
    }
}

/// End dates whose ongoing flag is set.
fn open_ended_fields(
    def: &WizardDefinition,
    fields: &BTreeMap<String, FieldValue>,
) -> BTreeSet<&'static str> {
    def.all_rules()
        .filter_map(|rule| match *rule {
            Rule::EndDate { field, ongoing, .. } => fields
                .get(ongoing)
                .and_then(FieldValue::as_flag)
                .unwrap_or(false)
                .then_some(field),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use hireflow_types::field::FileRef;
    use hireflow_types::submission::PayloadEncoding;
    use hireflow_types::wizard::WizardKind;
    use serde_json::json;

    use super::*;
    use crate::definition::definition_for;

    #[test]
    fn test_wire_key() {
        assert_eq!(wire_key("title"), "title");
        assert_eq!(wire_key("application_email"), "applicationEmail");
        assert_eq!(wire_key("open_to_remote"), "openToRemote");
    }

    #[test]
    fn test_job_posting_payload_compacts_lists() {
        let def = definition_for(WizardKind::JobPosting);
        let mut fields = BTreeMap::new();
        fields.insert("title".into(), FieldValue::Text("  Engineer ".into()));
        fields.insert(
            "skills".into(),
            FieldValue::List(vec!["Rust".into(), "  ".into(), "".into(), "SQL".into()]),
        );

        let payload = build_payload(def, &fields, &BTreeMap::new());
        assert_eq!(payload.endpoint, "/jobs");
        assert_eq!(payload.encoding, PayloadEncoding::Json);
        assert!(payload.authenticated);
        assert_eq!(payload.body["title"], json!("Engineer"));
        assert_eq!(payload.body["skills"], json!(["Rust", "SQL"]));
        assert_eq!(payload.body["benefits"], json!([]));
        assert_eq!(payload.body["jobType"], json!("Full-time"));
        assert!(payload.attachments.is_empty());
    }

    #[test]
    fn test_signup_payload_keeps_password_and_drops_local_fields() {
        let def = definition_for(WizardKind::Signup);
        let mut fields = BTreeMap::new();
        fields.insert("password".into(), FieldValue::Text(" Abc12345".into()));
        fields.insert("confirm_password".into(), FieldValue::Text(" Abc12345".into()));
        fields.insert("accept_terms".into(), FieldValue::Flag(true));

        let payload = build_payload(def, &fields, &BTreeMap::new());
        assert_eq!(payload.body["password"], json!(" Abc12345"));
        assert!(!payload.body.contains_key("confirmPassword"));
        assert!(!payload.body.contains_key("acceptTerms"));
        assert_eq!(payload.body["role"], json!("job_seeker"));
        assert!(!payload.authenticated);
    }

    #[test]
    fn test_files_become_attachments_and_selections_merge() {
        let def = definition_for(WizardKind::CoverLetter);
        let file = FileRef {
            path: "/tmp/cv.pdf".into(),
            file_name: "cv.pdf".into(),
            size_bytes: 1024,
            content_type: "application/pdf".into(),
        };
        let mut fields = BTreeMap::new();
        fields.insert("resume".into(), FieldValue::File(Some(file.clone())));

        let payload = build_payload(def, &fields, &BTreeMap::new());
        assert_eq!(payload.attachments, vec![Attachment {
            name: "resume".into(),
            file
        }]);
        assert!(!payload.body.contains_key("resume"));

        let def = definition_for(WizardKind::ResumeBuilder);
        let mut selections = BTreeMap::new();
        selections.insert("template".to_string(), "classic".to_string());
        let payload = build_payload(def, &BTreeMap::new(), &selections);
        assert_eq!(payload.body["template"], json!("classic"));
    }

    #[test]
    fn test_ongoing_role_sends_blank_end_date() {
        let def = definition_for(WizardKind::ResumeBuilder);
        let mut fields = BTreeMap::new();
        fields.insert("start_date".into(), FieldValue::Text("2024-03".into()));
        fields.insert("end_date".into(), FieldValue::Text("present".into()));
        fields.insert("currently_employed".into(), FieldValue::Flag(true));

        let payload = build_payload(def, &fields, &BTreeMap::new());
        assert_eq!(payload.body["endDate"], json!(""));
        assert_eq!(payload.body["startDate"], json!("2024-03"));
        assert_eq!(payload.body["currentlyEmployed"], json!(true));

        fields.insert("currently_employed".into(), FieldValue::Flag(false));
        fields.insert("end_date".into(), FieldValue::Text("2025-01".into()));
        let payload = build_payload(def, &fields, &BTreeMap::new());
        assert_eq!(payload.body["endDate"], json!("2025-01"));
    }
}
