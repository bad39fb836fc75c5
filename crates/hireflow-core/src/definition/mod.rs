//! Declarative wizard definitions.
//!
//! A [`WizardDefinition`] is everything the engine needs to know about one
//! kind of wizard: its field schema, its steps and the rules gating each
//! step, which step is the read-only review, and where the finished draft is
//! submitted. Definitions are `static` tables; there is exactly one per
//! [`WizardKind`].

pub mod cover_letter;
pub mod job_posting;
pub mod profile;
pub mod resume;
pub mod signup;

use hireflow_types::field::FieldValue;
use hireflow_types::submission::PayloadEncoding;
use hireflow_types::wizard::WizardKind;

use crate::validate::rule::Rule;

/// Upper bound for uploaded documents (5 MB).
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions accepted for resume uploads.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Input kind of a field, deciding its default value and how it is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Masked input; never written to the draft store.
    Secret,
    List,
    Flag,
    File {
        accept: &'static [&'static str],
        max_bytes: u64,
    },
    /// One of a fixed set of options; defaults to the first.
    Choice { options: &'static [&'static str] },
}

/// Schema entry for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub step: u8,
    pub kind: FieldKind,
    /// Whether the field is part of the submitted payload.
    pub submit: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, step: u8, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            step,
            kind,
            submit: true,
        }
    }

    pub const fn text(name: &'static str, label: &'static str, step: u8) -> Self {
        Self::new(name, label, step, FieldKind::Text)
    }

    pub const fn long_text(name: &'static str, label: &'static str, step: u8) -> Self {
        Self::new(name, label, step, FieldKind::LongText)
    }

    pub const fn secret(name: &'static str, label: &'static str, step: u8) -> Self {
        Self::new(name, label, step, FieldKind::Secret)
    }

    pub const fn list(name: &'static str, label: &'static str, step: u8) -> Self {
        Self::new(name, label, step, FieldKind::List)
    }

    pub const fn flag(name: &'static str, label: &'static str, step: u8) -> Self {
        Self::new(name, label, step, FieldKind::Flag)
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        step: u8,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, step, FieldKind::Choice { options })
    }

    pub const fn file(
        name: &'static str,
        label: &'static str,
        step: u8,
        accept: &'static [&'static str],
        max_bytes: u64,
    ) -> Self {
        Self::new(name, label, step, FieldKind::File { accept, max_bytes })
    }

    /// Keep the field out of the submitted payload.
    pub const fn local_only(self) -> Self {
        Self {
            submit: false,
            ..self
        }
    }

    /// Value of the field in a fresh draft.
    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text | FieldKind::LongText | FieldKind::Secret => {
                FieldValue::Text(String::new())
            }
            FieldKind::List => FieldValue::List(vec![String::new()]),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::File { .. } => FieldValue::File(None),
            FieldKind::Choice { options } => {
                FieldValue::Choice(options.first().copied().unwrap_or_default().to_string())
            }
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self.kind, FieldKind::Secret)
    }

    /// Options of a choice field, empty for every other kind.
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice { options } => options,
            _ => &[],
        }
    }
}

/// One screen of a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub number: u8,
    pub title: &'static str,
    /// Rules that must pass before leaving this step.
    pub rules: &'static [Rule],
    /// Read-only render of the draft; adds no validation of its own.
    pub review: bool,
}

/// An auxiliary choice stored next to the fields (e.g. resume template).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

impl SelectionSpec {
    pub fn default_option(&self) -> &'static str {
        self.options.first().copied().unwrap_or_default()
    }
}

/// Complete static configuration of one wizard kind.
#[derive(Debug)]
pub struct WizardDefinition {
    pub kind: WizardKind,
    pub title: &'static str,
    pub steps: &'static [StepSpec],
    pub fields: &'static [FieldSpec],
    pub selections: &'static [SelectionSpec],
    /// Backend path the finished draft is posted to.
    pub endpoint: &'static str,
    pub encoding: PayloadEncoding,
    /// Whether submitting needs the session bearer credential.
    pub requires_auth: bool,
}

impl WizardDefinition {
    pub fn total_steps(&self) -> u8 {
        self.steps.len() as u8
    }

    pub fn step(&self, number: u8) -> Option<&'static StepSpec> {
        self.steps.iter().find(|s| s.number == number)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn selection(&self, key: &str) -> Option<&'static SelectionSpec> {
        self.selections.iter().find(|s| s.key == key)
    }

    /// Fields rendered on the given step, in schema order.
    pub fn fields_in_step(&self, number: u8) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.fields.iter().filter(move |f| f.step == number)
    }

    /// Rules gating the given step; empty for unknown steps.
    pub fn rules_for(&self, number: u8) -> &'static [Rule] {
        self.step(number).map(|s| s.rules).unwrap_or(&[])
    }

    /// Every rule of every step, in step order.
    pub fn all_rules(&self) -> impl Iterator<Item = &'static Rule> + '_ {
        self.steps.iter().flat_map(|s| s.rules.iter())
    }
}

/// The static definition for a wizard kind.
pub fn definition_for(kind: WizardKind) -> &'static WizardDefinition {
    match kind {
        WizardKind::JobPosting => &job_posting::DEFINITION,
        WizardKind::ProfileCompletion => &profile::DEFINITION,
        WizardKind::ResumeBuilder => &resume::DEFINITION,
        WizardKind::Signup => &signup::DEFINITION,
        WizardKind::CoverLetter => &cover_letter::DEFINITION,
    }
}
