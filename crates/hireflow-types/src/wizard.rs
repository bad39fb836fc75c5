use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The multi-step forms the engine knows how to drive.
///
/// Each kind maps to exactly one static definition in `hireflow-core` and to
/// exactly one draft slot in the draft store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardKind {
    /// Employer posts a new job listing (3 steps).
    JobPosting,
    /// Job seeker completes their profile after signing up (6 steps).
    ProfileCompletion,
    /// Job seeker builds a resume from a template (4 steps).
    ResumeBuilder,
    /// Account creation (2 steps).
    Signup,
    /// Cover letter generation from a resume file and a job description (2 steps).
    CoverLetter,
}

impl WizardKind {
    /// Every wizard kind, in menu order.
    pub const ALL: [WizardKind; 5] = [
        WizardKind::JobPosting,
        WizardKind::ProfileCompletion,
        WizardKind::ResumeBuilder,
        WizardKind::Signup,
        WizardKind::CoverLetter,
    ];

    /// Stable slug used as the draft store key and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            WizardKind::JobPosting => "job-posting",
            WizardKind::ProfileCompletion => "profile-completion",
            WizardKind::ResumeBuilder => "resume-builder",
            WizardKind::Signup => "signup",
            WizardKind::CoverLetter => "cover-letter",
        }
    }
}

impl fmt::Display for WizardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for WizardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "job-posting" | "job" => Ok(WizardKind::JobPosting),
            "profile-completion" | "profile" => Ok(WizardKind::ProfileCompletion),
            "resume-builder" | "resume" => Ok(WizardKind::ResumeBuilder),
            "signup" | "sign-up" => Ok(WizardKind::Signup),
            "cover-letter" | "cover" => Ok(WizardKind::CoverLetter),
            other => Err(format!("unknown wizard: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() {
        for kind in WizardKind::ALL {
            assert_eq!(kind.slug().parse::<WizardKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_accepts_short_aliases() {
        assert_eq!("job".parse::<WizardKind>().unwrap(), WizardKind::JobPosting);
        assert_eq!(
            "Profile_Completion".parse::<WizardKind>().unwrap(),
            WizardKind::ProfileCompletion
        );
        assert!("nope".parse::<WizardKind>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&WizardKind::ResumeBuilder).unwrap();
        assert_eq!(json, "\"resume-builder\"");
    }
}
