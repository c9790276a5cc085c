// src/types/posting.rs
//! Job posting and company profile, as supplied or extracted

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// Name used when no company name can be determined.
pub const PLACEHOLDER_COMPANY_NAME: &str = "Company";

/// About-text stamped on a company whose description was not supplied.
pub const NOT_PROVIDED: &str = "Not provided";

const GENERIC_COMPANY_NAMES: &[&str] = &[
    "company",
    "the company",
    "our company",
    "unknown",
    "n/a",
    "not provided",
    "not mentioned",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_responsibilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Free-form: "50-200 employees" or a bare head count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_news: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobPosting {
    /// Whether the posting carries anything a customization can work with.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || !self.description.trim().is_empty()
    }

    /// Description followed by a "Requirements:" block when requirements exist.
    pub fn job_text(&self) -> String {
        let mut text = self.description.clone();
        if !self.requirements.is_empty() {
            text.push_str("\n\nRequirements:\n");
            text.push_str(&self.requirements.join("\n"));
        }
        text
    }

    /// Company name hint carried by the posting, if it is a usable name.
    pub fn company_hint(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !is_generic_company_name(name))
    }
}

impl CompanyProfile {
    /// Minimal profile synthesized from a job posting's company hint.
    pub fn from_hint(hint: Option<&str>) -> Self {
        Self {
            name: hint.unwrap_or(PLACEHOLDER_COMPANY_NAME).to_string(),
            ..Self::default()
        }
    }

    /// Profile for a company whose information was not supplied at all.
    pub fn not_provided(hint: Option<&str>) -> Self {
        Self {
            about: NOT_PROVIDED.to_string(),
            ..Self::from_hint(hint)
        }
    }

    /// Replace an empty name with the placeholder.
    pub fn with_fallback_name(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = PLACEHOLDER_COMPANY_NAME.to_string();
        }
        self
    }

    /// Company values joined into one line, if any.
    pub fn values_line(&self) -> Option<String> {
        self.values
            .as_ref()
            .filter(|values| !values.is_empty())
            .map(|values| values.join(", "))
    }
}

/// Placeholder words a model sometimes returns instead of a proper name.
pub fn is_generic_company_name(name: &str) -> bool {
    let lowered = name.trim().to_lowercase();
    lowered.is_empty() || GENERIC_COMPANY_NAMES.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_text_appends_requirements_block() {
        let job = JobPosting {
            description: "Build APIs.".to_string(),
            requirements: vec!["Rust".to_string(), "SQL".to_string()],
            ..JobPosting::default()
        };
        assert_eq!(job.job_text(), "Build APIs.\n\nRequirements:\nRust\nSQL");
    }

    #[test]
    fn test_job_text_without_requirements() {
        let job = JobPosting {
            description: "Build APIs.".to_string(),
            ..JobPosting::default()
        };
        assert_eq!(job.job_text(), "Build APIs.");
    }

    #[test]
    fn test_null_fields_from_extraction_are_tolerated() {
        let json = r#"{"title": "Dev", "description": null, "requirements": null, "company_name": null}"#;
        let job: JobPosting = serde_json::from_str(json).unwrap();
        assert_eq!(job.title, "Dev");
        assert!(job.description.is_empty());
        assert!(job.requirements.is_empty());
        assert!(job.company_name.is_none());
    }

    #[test]
    fn test_extra_job_fields_are_kept_for_snapshots() {
        let json = r#"{"title": "Dev", "salary": "100k", "remote": true}"#;
        let job: JobPosting = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["salary"], "100k");
        assert_eq!(value["remote"], true);
    }

    #[test]
    fn test_generic_company_names() {
        assert!(is_generic_company_name("Company"));
        assert!(is_generic_company_name("  the company "));
        assert!(is_generic_company_name(""));
        assert!(!is_generic_company_name("Tech Innovations Inc."));
    }

    #[test]
    fn test_company_fallbacks() {
        assert_eq!(CompanyProfile::from_hint(None).name, PLACEHOLDER_COMPANY_NAME);
        assert_eq!(CompanyProfile::from_hint(Some("Acme")).name, "Acme");

        let missing = CompanyProfile::not_provided(Some("Acme"));
        assert_eq!(missing.name, "Acme");
        assert_eq!(missing.about, NOT_PROVIDED);

        let unnamed = CompanyProfile::default().with_fallback_name();
        assert_eq!(unnamed.name, PLACEHOLDER_COMPANY_NAME);
    }

    #[test]
    fn test_company_hint_skips_generic_names() {
        let job = JobPosting {
            company_name: Some("The Company".to_string()),
            ..JobPosting::default()
        };
        assert_eq!(job.company_hint(), None);

        let job = JobPosting {
            company_name: Some(" Acme ".to_string()),
            ..JobPosting::default()
        };
        assert_eq!(job.company_hint(), Some("Acme"));
    }
}
