//! Job posting wizard: basics, description, review.

use hireflow_types::submission::PayloadEncoding;
use hireflow_types::wizard::WizardKind;

use super::{FieldSpec, StepSpec, WizardDefinition};
use crate::validate::rule::Rule;

pub const JOB_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Internship", "Temporary"];

pub const WORK_MODES: &[&str] = &["On-site", "Hybrid", "Remote"];

pub static DEFINITION: WizardDefinition = WizardDefinition {
    kind: WizardKind::JobPosting,
    title: "Post a job",
    steps: &[
        StepSpec {
            number: 1,
            title: "Job basics",
            rules: &[
                Rule::Required {
                    field: "title",
                    message: "Job title is required",
                },
                Rule::Required {
                    field: "company",
                    message: "Company name is required",
                },
                Rule::Required {
                    field: "location",
                    message: "Location is required",
                },
                Rule::Salary {
                    field: "salary",
                    message: "Salary may only contain digits, $, commas, k and ranges",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 2,
            title: "Description and requirements",
            rules: &[
                Rule::Required {
                    field: "description",
                    message: "Job description is required",
                },
                Rule::Email {
                    field: "application_email",
                    message: "Enter a valid email address",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 3,
            title: "Review",
            rules: &[],
            review: true,
        },
    ],
    fields: &[
        FieldSpec::text("title", "Job title", 1),
        FieldSpec::text("company", "Company", 1),
        FieldSpec::text("location", "Location", 1),
        FieldSpec::choice("job_type", "Job type", 1, JOB_TYPES),
        FieldSpec::choice("work_mode", "Work mode", 1, WORK_MODES),
        FieldSpec::text("salary", "Salary range", 1),
        FieldSpec::long_text("description", "Job description", 2),
        FieldSpec::list("requirements", "Requirements", 2),
        FieldSpec::list("skills", "Skills", 2),
        FieldSpec::list("benefits", "Benefits", 2),
        FieldSpec::text("application_email", "Application email", 2),
    ],
    selections: &[],
    endpoint: "/jobs",
    encoding: PayloadEncoding::Json,
    requires_auth: true,
};
