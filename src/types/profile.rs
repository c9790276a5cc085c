// src/types/profile.rs
//! Candidate base profile, as stored in `inputs/base_data.json`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_optional_string, lenient_string, null_as_default};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    /// Category name -> skills, in file order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: IndexMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    /// Keys we do not model are carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display-only leaves (dates, GPA, links) are kept as the raw JSON value so
/// `2019` stays a number in the copy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honors: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateProfile {
    /// Placeholder profile written when no base data file exists yet.
    pub fn skeleton() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "Your Name".to_string(),
                title: Some("Your Professional Title".to_string()),
                email: Some("your.email@example.com".to_string()),
                phone: Some("+1-234-567-8900".to_string()),
                location: Some("City, Country".to_string()),
                linkedin: Some("linkedin.com/in/yourprofile".to_string()),
                github: Some("github.com/yourusername".to_string()),
                website: Some("yourwebsite.com".to_string()),
                extra: Map::new(),
            },
            summary: "Professional summary or objective statement".to_string(),
            experience: vec![Experience {
                title: "Job Title".to_string(),
                company: "Company Name".to_string(),
                location: Some(Value::from("City, Country")),
                start_date: Some(Value::from("Jan 2020")),
                end_date: Some(Value::from("Present")),
                responsibilities: vec![
                    "Key achievement or responsibility 1".to_string(),
                    "Key achievement or responsibility 2".to_string(),
                    "Key achievement or responsibility 3".to_string(),
                ],
                extra: Map::new(),
            }],
            education: vec![Education {
                degree: "Degree Name".to_string(),
                institution: "University Name".to_string(),
                location: Some(Value::from("City, Country")),
                graduation_date: Some(Value::from("Year")),
                gpa: Some(Value::from("3.8/4.0")),
                honors: Some(Value::from("Cum Laude")),
                extra: Map::new(),
            }],
            skills: IndexMap::from([
                (
                    "Technical".to_string(),
                    vec!["Skill 1".to_string(), "Skill 2".to_string(), "Skill 3".to_string()],
                ),
                (
                    "Languages".to_string(),
                    vec!["English (Native)".to_string(), "Spanish (Fluent)".to_string()],
                ),
                (
                    "Tools".to_string(),
                    vec!["Tool 1".to_string(), "Tool 2".to_string(), "Tool 3".to_string()],
                ),
            ]),
            projects: vec![Project {
                name: "Project Name".to_string(),
                description: "Brief project description".to_string(),
                technologies: vec!["Tech 1".to_string(), "Tech 2".to_string()],
                link: Some(Value::from("github.com/project")),
                extra: Map::new(),
            }],
            certifications: vec![Certification {
                name: "Certification Name".to_string(),
                issuer: Some(Value::from("Issuing Organization")),
                date: Some(Value::from("Year")),
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }

    /// First `limit` skills across all categories, in category order.
    pub fn top_skills(&self, limit: usize) -> Vec<String> {
        self.skills
            .values()
            .flatten()
            .filter(|skill| !skill.trim().is_empty())
            .take(limit)
            .cloned()
            .collect()
    }

    /// Leading responsibilities of the most recent (first listed) position.
    pub fn recent_highlights(&self, limit: usize) -> Vec<String> {
        self.experience
            .first()
            .map(|exp| exp.responsibilities.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let json = r#"{
            "personal_info": {"name": "Ada", "pronouns": "she/her"},
            "summary": "Engineer",
            "experience": [{"title": "Dev", "company": "X", "responsibilities": ["a"], "team": "core"}],
            "skills": {"Languages": ["Rust"], "Tools": ["git"]},
            "awards": ["Best paper"]
        }"#;

        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.personal_info.extra["pronouns"], "she/her");
        assert_eq!(profile.experience[0].extra["team"], "core");
        assert_eq!(profile.extra["awards"][0], "Best paper");

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["awards"][0], "Best paper");
        assert_eq!(value["personal_info"]["pronouns"], "she/her");
    }

    #[test]
    fn test_nested_entries_keep_unknown_keys() {
        let json = r#"{
            "education": [{"degree": "BSc", "institution": "MIT", "field": "CS"}],
            "projects": [{"name": "P", "url": "https://example.com/p"}],
            "certifications": [{"name": "CKA", "credential_id": "ABC-123"}]
        }"#;

        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["education"][0]["field"], "CS");
        assert_eq!(value["projects"][0]["url"], "https://example.com/p");
        assert_eq!(value["certifications"][0]["credential_id"], "ABC-123");
    }

    #[test]
    fn test_numeric_leaves_are_accepted() {
        let json = r#"{
            "personal_info": {"name": "Ada", "phone": 5551234},
            "experience": [{"title": "Dev", "company": 42, "start_date": 2019, "end_date": "Present"}],
            "education": [{"degree": "BSc", "institution": "MIT", "graduation_date": 2019, "gpa": 3.8}],
            "certifications": [{"name": "CKA", "date": 2021}]
        }"#;

        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.personal_info.phone.as_deref(), Some("5551234"));
        assert_eq!(profile.experience[0].company, "42");

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["education"][0]["graduation_date"], 2019);
        assert_eq!(value["education"][0]["gpa"], 3.8);
        assert_eq!(value["experience"][0]["start_date"], 2019);
        assert_eq!(value["certifications"][0]["date"], 2021);
    }

    #[test]
    fn test_structured_value_for_text_field_is_rejected() {
        let json = r#"{"personal_info": {"name": {"first": "Ada"}}}"#;
        assert!(serde_json::from_str::<CandidateProfile>(json).is_err());
    }

    #[test]
    fn test_skill_categories_keep_file_order() {
        let json = r#"{"skills": {"Zeta": ["z"], "Alpha": ["a1", "a2"], "Mid": ["m"]}}"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        let categories: Vec<&str> = profile.skills.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(profile.top_skills(3), vec!["z", "a1", "a2"]);
    }

    #[test]
    fn test_null_sections_default_to_empty() {
        let json = r#"{"summary": null, "experience": null, "skills": null}"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert!(profile.summary.is_empty());
        assert!(profile.experience.is_empty());
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_recent_highlights_uses_first_position() {
        let profile = CandidateProfile::skeleton();
        let highlights = profile.recent_highlights(2);
        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0], "Key achievement or responsibility 1");
    }
}
