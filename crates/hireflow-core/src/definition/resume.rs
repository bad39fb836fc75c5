//! Resume builder wizard with a template choice and a preview step.

use hireflow_types::submission::PayloadEncoding;
use hireflow_types::wizard::WizardKind;

use super::{FieldSpec, SelectionSpec, StepSpec, WizardDefinition};
use crate::validate::rule::Rule;

pub const TEMPLATES: &[&str] = &["modern", "classic", "minimal", "creative"];

pub static DEFINITION: WizardDefinition = WizardDefinition {
    kind: WizardKind::ResumeBuilder,
    title: "Build your resume",
    steps: &[
        StepSpec {
            number: 1,
            title: "Personal information",
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
                Rule::Phone {
                    field: "phone",
                    message: "Enter a valid phone number (10-15 digits)",
                },
                Rule::LinkedIn {
                    field: "linkedin",
                    message: "Enter a LinkedIn profile URL",
                },
                Rule::GitHub {
                    field: "github",
                    message: "Enter a GitHub profile URL",
                },
                Rule::Url {
                    field: "website",
                    message: "Enter a valid URL",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 2,
            title: "Experience",
            rules: &[
                Rule::Required {
                    field: "position_title",
                    message: "Job title is required",
                },
                Rule::Required {
                    field: "employer",
                    message: "Employer is required",
                },
                Rule::Required {
                    field: "start_date",
                    message: "Start date is required",
                },
                Rule::Date {
                    field: "start_date",
                    message: "Use the YYYY-MM format",
                },
                Rule::EndDate {
                    field: "end_date",
                    ongoing: "currently_employed",
                    message: "Use the YYYY-MM format",
                },
                Rule::DateOrder {
                    start: "start_date",
                    end: "end_date",
                    ongoing: "currently_employed",
                    message: "End date cannot be before start date",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 3,
            title: "Education and skills",
            rules: &[Rule::MinEntries {
                field: "skills",
                min: 1,
                message: "Add at least one skill",
            }],
            review: false,
        },
        StepSpec {
            number: 4,
            title: "Preview",
            rules: &[],
            review: true,
        },
    ],
    fields: &[
        FieldSpec::text("full_name", "Full name", 1),
        FieldSpec::text("email", "Email", 1),
        FieldSpec::text("phone", "Phone", 1),
        FieldSpec::text("linkedin", "LinkedIn", 1),
        FieldSpec::text("github", "GitHub", 1),
        FieldSpec::text("website", "Website", 1),
        FieldSpec::text("position_title", "Job title", 2),
        FieldSpec::text("employer", "Employer", 2),
        FieldSpec::text("start_date", "Start date (YYYY-MM)", 2),
        FieldSpec::text("end_date", "End date (YYYY-MM)", 2),
        FieldSpec::flag("currently_employed", "I currently work here", 2),
        FieldSpec::list("achievements", "Achievements", 2),
        FieldSpec::long_text("summary", "Professional summary", 3),
        FieldSpec::list("education", "Education", 3),
        FieldSpec::list("skills", "Skills", 3),
    ],
    selections: &[SelectionSpec {
        key: "template",
        label: "Template",
        options: TEMPLATES,
    }],
    endpoint: "/resumes",
    encoding: PayloadEncoding::Json,
    requires_auth: true,
};
