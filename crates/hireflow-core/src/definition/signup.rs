//! Account signup: credentials, then role and terms.

use hireflow_types::submission::PayloadEncoding;
use hireflow_types::wizard::WizardKind;

use super::{FieldSpec, StepSpec, WizardDefinition};
use crate::validate::rule::Rule;

pub const ROLES: &[&str] = &["job_seeker", "employer"];

pub static DEFINITION: WizardDefinition = WizardDefinition {
    kind: WizardKind::Signup,
    title: "Create your account",
    steps: &[
        StepSpec {
            number: 1,
            title: "Account",
            rules: &[
                Rule::Required {
                    field: "full_name",
                    message: "Full name is required",
                },
                Rule::Name {
                    field: "full_name",
                    message: "Name must be at least 2 letters and contain no digits",
                },
                Rule::Required {
                    field: "email",
                    message: "Email is required",
                },
                Rule::Email {
                    field: "email",
                    message: "Enter a valid email address",
                },
                Rule::Required {
                    field: "password",
                    message: "Password is required",
                },
                Rule::Password {
                    field: "password",
                    message: "Password needs 8+ characters with an uppercase letter, a lowercase letter and a digit",
                },
                Rule::Required {
                    field: "confirm_password",
                    message: "Please confirm your password",
                },
                Rule::Matches {
                    field: "confirm_password",
                    other: "password",
                    message: "Passwords do not match",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 2,
            title: "Role",
            rules: &[Rule::Accepted {
                field: "accept_terms",
                message: "You must accept the terms to continue",
            }],
            review: false,
        },
    ],
    fields: &[
        FieldSpec::text("full_name", "Full name", 1),
        FieldSpec::text("email", "Email", 1),
        FieldSpec::secret("password", "Password", 1),
        FieldSpec::secret("confirm_password", "Confirm password", 1).local_only(),
        FieldSpec::choice("role", "I am a", 2, ROLES),
        FieldSpec::flag("accept_terms", "I accept the terms of service", 2).local_only(),
    ],
    selections: &[],
    endpoint: "/auth/signup",
    encoding: PayloadEncoding::Json,
    requires_auth: false,
};
