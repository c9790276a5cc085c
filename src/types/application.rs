// src/types/application.rs
use serde::{Deserialize, Serialize};

use super::{CandidateProfile, CompanyProfile, JobPosting};

/// Summary of the targeted job, carried next to the tailored profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobInfo {
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub company_about: String,
    pub company_website: String,
}

impl JobInfo {
    pub fn new(job: &JobPosting, company: &CompanyProfile) -> Self {
        Self {
            title: job.title.clone(),
            company: company.name.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            company_about: company.about.clone(),
            company_website: company.website.clone().unwrap_or_default(),
        }
    }
}

/// The tailored profile handed to rendering.
///
/// Serializes flat: the profile's keys sit next to `cover_letter` and
/// `job_info`, which is the shape templates and `customized_data.json` see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizedApplication {
    #[serde(flatten)]
    pub profile: CandidateProfile,
    pub cover_letter: String,
    pub job_info: JobInfo,
}

impl CustomizedApplication {
    /// Cover letter split into its blank-line separated paragraphs.
    pub fn cover_letter_paragraphs(&self) -> Vec<&str> {
        self.cover_letter
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}
