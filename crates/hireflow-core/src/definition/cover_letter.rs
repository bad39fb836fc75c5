//! Cover letter generation: resume file plus job description, sent as
//! multipart to the AI endpoint. The response carries the generated letter.

use hireflow_types::submission::PayloadEncoding;
use hireflow_types::wizard::WizardKind;

use super::{DOCUMENT_EXTENSIONS, FieldSpec, MAX_DOCUMENT_BYTES, StepSpec, WizardDefinition};
use crate::validate::rule::Rule;

pub const TONES: &[&str] = &["professional", "enthusiastic", "concise"];

pub static DEFINITION: WizardDefinition = WizardDefinition {
    kind: WizardKind::CoverLetter,
    title: "Generate a cover letter",
    steps: &[
        StepSpec {
            number: 1,
            title: "Resume and job description",
            rules: &[
                Rule::Required {
                    field: "resume",
                    message: "Upload your resume",
                },
                Rule::File {
                    field: "resume",
                    accept: DOCUMENT_EXTENSIONS,
                    max_bytes: MAX_DOCUMENT_BYTES,
                    message: "Resume must be a PDF or Word document under 5 MB",
                },
                Rule::Required {
                    field: "job_description",
                    message: "Paste the job description",
                },
                Rule::MinLength {
                    field: "job_description",
                    min: 50,
                    message: "Job description should be at least 50 characters",
                },
            ],
            review: false,
        },
        StepSpec {
            number: 2,
            title: "Review",
            rules: &[],
            review: true,
        },
    ],
    fields: &[
        FieldSpec::file("resume", "Resume", 1, DOCUMENT_EXTENSIONS, MAX_DOCUMENT_BYTES),
        FieldSpec::long_text("job_description", "Job description", 1),
        FieldSpec::choice("tone", "Tone", 1, TONES),
    ],
    selections: &[],
    endpoint: "/ai/cover-letter",
    encoding: PayloadEncoding::Multipart,
    requires_auth: true,
};
