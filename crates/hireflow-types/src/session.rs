use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Account role chosen at signup or on first login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[serde(alias = "jobseeker", alias = "candidate")]
    JobSeeker,
    #[serde(alias = "recruiter")]
    Employer,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::JobSeeker => write!(f, "job_seeker"),
            UserRole::Employer => write!(f, "employer"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "job_seeker" | "jobseeker" | "candidate" => Ok(UserRole::JobSeeker),
            "employer" | "recruiter" => Ok(UserRole::Employer),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_aliases() {
        assert_eq!("job-seeker".parse::<UserRole>().unwrap(), UserRole::JobSeeker);
        assert_eq!("Recruiter".parse::<UserRole>().unwrap(), UserRole::Employer);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_aliases() {
        let role: UserRole = serde_json::from_str("\"jobseeker\"").unwrap();
        assert_eq!(role, UserRole::JobSeeker);
        assert_eq!(serde_json::to_string(&UserRole::Employer).unwrap(), "\"employer\"");
    }
}
