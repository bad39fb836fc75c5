//! Step validator.
//!
//! Evaluates the rules gating one step of a wizard and collects failures into
//! an [`ErrorMap`]. A step is passable iff the map is empty. Rules run in
//! declaration order and the first failure per field wins, so `Required`
//! listed before a format rule reports "is required" rather than "invalid".

use std::collections::BTreeMap;

use hireflow_types::draft::ErrorMap;
use hireflow_types::field::FieldValue;
use hireflow_types::wizard::WizardKind;

use crate::definition::{WizardDefinition, definition_for};

/// Error map for one step. Unknown steps and steps without rules pass.
pub fn validate_step(
    def: &WizardDefinition,
    step: u8,
    fields: &BTreeMap<String, FieldValue>,
) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for rule in def.rules_for(step) {
        let target = rule.target();
        if errors.contains_key(target) {
            continue;
        }
        if !rule.passes(fields) {
            errors.insert(target.to_string(), rule.message().to_string());
        }
    }
    errors
}

/// [`validate_step`] keyed by wizard kind.
pub fn validate_wizard_step(
    kind: WizardKind,
    step: u8,
    fields: &BTreeMap<String, FieldValue>,
) -> ErrorMap {
    validate_step(definition_for(kind), step, fields)
}

/// First failing message among every rule targeting `name`, across all steps.
pub fn validate_field(
    def: &WizardDefinition,
    name: &str,
    fields: &BTreeMap<String, FieldValue>,
) -> Option<&'static str> {
    def.all_rules()
        .filter(|rule| rule.target() == name)
        .find(|rule| !rule.passes(fields))
        .map(|rule| rule.message())
}

/// Validate every step in order; returns the first failing step and its errors.
pub fn validate_all(
    def: &WizardDefinition,
    fields: &BTreeMap<String, FieldValue>,
) -> Option<(u8, ErrorMap)> {
    def.steps.iter().find_map(|step| {
        let errors = validate_step(def, step.number, fields);
        (!errors.is_empty()).then_some((step.number, errors))
    })
}
