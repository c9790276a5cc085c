// src/strategy/mod.rs
//! Content strategies: how extraction and rewriting are carried out
//!
//! The strategy is picked once at startup. `HeuristicStrategy` never leaves
//! the process; `AssistedStrategy` calls a [`TextGenerator`] and drops back to
//! the heuristic for any call that fails.

pub mod assisted;
pub mod heuristic;

pub use assisted::AssistedStrategy;
pub use heuristic::HeuristicStrategy;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::app_log;
use crate::generation::{GenerationClient, GenerationConfig, TextGenerator};
use crate::types::{CandidateProfile, CompanyProfile, JobPosting};

const TOP_SKILLS: usize = 6;
const RECENT_HIGHLIGHTS: usize = 3;

#[async_trait]
pub trait ContentStrategy: Send + Sync {
    /// Short label for logs and console output.
    fn name(&self) -> &'static str;

    /// Whether this strategy calls out to a text generator.
    fn uses_generation(&self) -> bool;

    async fn extract_job(&self, text: &str) -> JobPosting;

    async fn extract_company(&self, text: &str) -> CompanyProfile;

    async fn rewrite_summary(&self, summary: &str, job_text: &str) -> String;

    async fn rewrite_bullets(&self, bullets: &[String], job_text: &str) -> Vec<String>;

    async fn write_cover_letter(&self, brief: &CoverLetterBrief) -> String;
}

/// Everything a cover letter may draw on, gathered from profile and job.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoverLetterBrief {
    pub candidate_name: String,
    pub candidate_role: String,
    pub candidate_location: String,
    pub top_skills: Vec<String>,
    pub recent_highlights: Vec<String>,
    pub job_title: String,
    pub company_name: String,
    pub company_mission: String,
}

impl CoverLetterBrief {
    pub fn new(profile: &CandidateProfile, job: &JobPosting, company: &CompanyProfile) -> Self {
        let info = &profile.personal_info;

        let mut mission = company.about.trim().to_string();
        if let Some(values) = company.values_line() {
            if !mission.is_empty() {
                mission.push(' ');
            }
            mission.push_str(&format!("Values: {}.", values));
        }

        Self {
            candidate_name: info.name.clone(),
            candidate_role: info.title.clone().unwrap_or_default(),
            candidate_location: info.location.clone().unwrap_or_default(),
            top_skills: profile.top_skills(TOP_SKILLS),
            recent_highlights: profile.recent_highlights(RECENT_HIGHLIGHTS),
            job_title: job.title.clone(),
            company_name: company.name.clone(),
            company_mission: mission,
        }
    }
}

/// Pick the strategy for this run.
///
/// Generation is used only when asked for and credentials resolved; asking
/// without credentials logs why the heuristic is used instead.
pub fn select_strategy(
    use_ai: bool,
    generation: Option<GenerationConfig>,
) -> Result<Arc<dyn ContentStrategy>> {
    match (use_ai, generation) {
        (true, Some(config)) => {
            let client = GenerationClient::new(config)?;
            let generator: Arc<dyn TextGenerator> = Arc::new(client);
            Ok(Arc::new(AssistedStrategy::new(generator)))
        }
        (true, None) => {
            app_log!(
                warn,
                "No text-generation credentials found (set OPENAI_API_KEY or CV_LLM_ENDPOINT) - AI features disabled"
            );
            Ok(Arc::new(HeuristicStrategy))
        }
        (false, _) => Ok(Arc::new(HeuristicStrategy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_collects_profile_and_job_fields() {
        let profile = CandidateProfile::skeleton();
        let job = JobPosting {
            title: "Backend Engineer".to_string(),
            ..JobPosting::default()
        };
        let company = CompanyProfile {
            name: "Acme".to_string(),
            about: "We build anvils.".to_string(),
            values: Some(vec!["Craft".to_string(), "Safety".to_string()]),
            ..CompanyProfile::default()
        };

        let brief = CoverLetterBrief::new(&profile, &job, &company);
        assert_eq!(brief.candidate_name, "Your Name");
        assert_eq!(brief.candidate_role, "Your Professional Title");
        assert_eq!(brief.top_skills.len(), TOP_SKILLS);
        assert_eq!(brief.recent_highlights.len(), RECENT_HIGHLIGHTS);
        assert_eq!(brief.company_mission, "We build anvils. Values: Craft, Safety.");
    }

    #[test]
    fn test_strategy_selection() {
        assert!(!select_strategy(false, None).unwrap().uses_generation());
        assert!(!select_strategy(true, None).unwrap().uses_generation());

        let config = GenerationConfig::from_lookup(|key| {
            (key == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        });
        assert!(!select_strategy(false, config.clone()).unwrap().uses_generation());
        assert!(select_strategy(true, config).unwrap().uses_generation());
    }
}
