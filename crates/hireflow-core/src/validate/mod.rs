//! Validation: single-value format checks, declarative rules, and the step
//! validator that evaluates a wizard step's rule set against a draft.

pub mod field;
pub mod rule;
pub mod step;
