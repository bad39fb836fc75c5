//! Draft types: the in-progress state of one wizard and its persisted form.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::{FieldValue, FileRef};
use crate::wizard::WizardKind;

/// Field name -> human-readable message.
pub type ErrorMap = BTreeMap<String, String>;

/// Mutable state of one in-progress wizard instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardDraft {
    pub kind: WizardKind,
    pub fields: BTreeMap<String, FieldValue>,
    /// 1-indexed, always within `1..=total_steps`.
    pub current_step: u8,
    pub total_steps: u8,
    pub errors: ErrorMap,
    /// Auxiliary UI choices such as the chosen resume template.
    pub selections: BTreeMap<String, String>,
    pub is_submitting: bool,
    /// Set after a successful submission; edits are no longer applied.
    pub is_terminal: bool,
}

impl WizardDraft {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text or choice value of a field, empty when missing.
    pub fn text(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    /// Entries of a list field, empty slice when missing.
    pub fn list(&self, name: &str) -> &[String] {
        self.fields
            .get(name)
            .and_then(FieldValue::as_list)
            .unwrap_or(&[])
    }

    pub fn flag(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn file(&self, name: &str) -> Option<&FileRef> {
        self.fields.get(name).and_then(FieldValue::as_file)
    }

    /// The part of the draft that survives a reload.
    pub fn to_persisted(&self) -> PersistedDraft {
        PersistedDraft {
            fields: self.fields.clone(),
            current_step: self.current_step,
            selections: self.selections.clone(),
            saved_at: Utc::now(),
        }
    }
}

/// Serialized draft record, one per wizard kind.
///
/// No schema version: a record that fails to parse is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDraft {
    pub fields: BTreeMap<String, FieldValue>,
    pub current_step: u8,
    #[serde(default)]
    pub selections: BTreeMap<String, String>,
    pub saved_at: DateTime<Utc>,
}

/// A saved draft row as the store sees it.
///
/// `state_json` holds a serialized [`PersistedDraft`]; the store never parses
/// it beyond what listing needs.
#[derive(Debug, Clone)]
pub struct StoredDraft {
    pub kind: WizardKind,
    pub state_json: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight summary of a stored draft for listing.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSummary {
    pub kind: WizardKind,
    /// `None` when the stored JSON is unreadable.
    pub current_step: Option<u8>,
    pub updated_at: DateTime<Utc>,
}
