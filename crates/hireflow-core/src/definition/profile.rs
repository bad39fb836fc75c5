//! Profile completion wizard, shown to job seekers after their first login.

use hireflow_types::submission::PayloadEncoding;
use hireflow_types::wizard::WizardKind;

use super::{DOCUMENT_EXTENSIONS, FieldSpec, MAX_DOCUMENT_BYTES, StepSpec, WizardDefinition};
use crate::validate::rule::Rule;

pub const EXPERIENCE_LEVELS: &[&str] = &["Entry level", "Mid level", "Senior", "Lead", "Executive"];

pub static DEFINITION: WizardDefinition = WizardDefinition {
    kind: WizardKind::ProfileCompletion,
    title: "Complete your profile",
    steps: &[
        StepSpec {
            number: 1,
            title: "Personal details",
            rules: &[
                Rule::Required {
                    field: "first_name",
                    message: "First name is required",
                },
                Rule::Name {
                    field: "first_name",
                    message: "First name must be at least 2 letters and contain no digits",
                },
                Rule::Required {
                    field: "last_name",
                    message: "Last name is required",
                },
                Rule::Name {
                    field: "last_name",
                    message: "Last name must be at least 2 letters and contain no digits",
                },
                Rule::Required {
                    field: "phone",
                    message: "Phone number is required",
                },
                Rule::Phone {
                    field: "phone",
                    message: "Enter a valid phone number (10-15 digits)",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 2,
            title: "Professional summary",
            rules: &[
                Rule::Required {
                    field: "headline",
                    message: "Professional headline is required",
                },
                Rule::MinLength {
                    field: "bio",
                    min: 20,
                    message: "Tell us a bit more (at least 20 characters)",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 3,
            title: "Skills",
            rules: &[Rule::MinEntries {
                field: "skills",
                min: 1,
                message: "Add at least one skill",
            }],
            review: false,
        },
        StepSpec {
            number: 4,
            title: "Education",
            rules: &[Rule::MinEntries {
                field: "education",
                min: 1,
                message: "Add at least one education entry",
            }],
            review: false,
        },
        StepSpec {
            number: 5,
            title: "Experience and links",
            rules: &[
                Rule::LinkedIn {
                    field: "linkedin",
                    message: "Enter a LinkedIn profile URL",
                },
                Rule::GitHub {
                    field: "github",
                    message: "Enter a GitHub profile URL",
                },
                Rule::Url {
                    field: "portfolio",
                    message: "Enter a valid URL",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 6,
            title: "Resume and preferences",
            rules: &[
                Rule::File {
                    field: "resume",
                    accept: DOCUMENT_EXTENSIONS,
                    max_bytes: MAX_DOCUMENT_BYTES,
                    message: "Resume must be a PDF or Word document under 5 MB",
                },
                Rule::Salary {
                    field: "desired_salary",
                    message: "Salary may only contain digits, $, commas, k and ranges",
                },
            ],
            review: false,
        },
    ],
    fields: &[
        FieldSpec::text("first_name", "First name", 1),
        FieldSpec::text("last_name", "Last name", 1),
        FieldSpec::text("phone", "Phone", 1),
        FieldSpec::text("location", "Location", 1),
        FieldSpec::text("headline", "Professional headline", 2),
        FieldSpec::choice("experience_level", "Experience level", 2, EXPERIENCE_LEVELS),
        FieldSpec::long_text("bio", "About you", 2),
        FieldSpec::list("skills", "Skills", 3),
        FieldSpec::list("languages", "Languages", 3),
        FieldSpec::list("education", "Education", 4),
        FieldSpec::list("certifications", "Certifications", 4),
        FieldSpec::list("experience", "Work experience", 5),
        FieldSpec::text("linkedin", "LinkedIn", 5),
        FieldSpec::text("github", "GitHub", 5),
        FieldSpec::text("portfolio", "Portfolio", 5),
        FieldSpec::file("resume", "Resume", 6, DOCUMENT_EXTENSIONS, MAX_DOCUMENT_BYTES),
        FieldSpec::text("desired_salary", "Desired salary", 6),
        FieldSpec::flag("open_to_remote", "Open to remote work", 6),
    ],
    selections: &[],
    endpoint: "/profile/complete",
    encoding: PayloadEncoding::Multipart,
    requires_auth: true,
};
