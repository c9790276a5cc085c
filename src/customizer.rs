// src/customizer.rs
//! Tailors a copy of the candidate profile to one job

use std::sync::Arc;

use crate::app_log;
use crate::strategy::{ContentStrategy, CoverLetterBrief};
use crate::types::{CandidateProfile, CompanyProfile, CustomizedApplication, JobInfo, JobPosting};

pub struct ContentCustomizer {
    strategy: Arc<dyn ContentStrategy>,
}

impl ContentCustomizer {
    pub fn new(strategy: Arc<dyn ContentStrategy>) -> Self {
        Self { strategy }
    }

    /// Build the application record from a deep copy of `profile`.
    ///
    /// `profile` itself is never touched. Rewrite failures are absorbed by
    /// the strategy, so this cannot fail.
    pub async fn customize(
        &self,
        profile: &CandidateProfile,
        job: &JobPosting,
        company: &CompanyProfile,
    ) -> CustomizedApplication {
        let mut tailored = profile.clone();
        let job_text = job.job_text();

        tailored.summary = self
            .strategy
            .rewrite_summary(&tailored.summary, &job_text)
            .await;

        for (index, experience) in tailored.experience.iter_mut().enumerate() {
            if experience.responsibilities.is_empty() {
                continue;
            }
            app_log!(
                debug,
                "Tailoring experience {} ({} at {})",
                index + 1,
                experience.title,
                experience.company
            );
            experience.responsibilities = self
                .strategy
                .rewrite_bullets(&experience.responsibilities, &job_text)
                .await;
        }

        let brief = CoverLetterBrief::new(profile, job, company);
        let cover_letter = self.strategy.write_cover_letter(&brief).await;

        CustomizedApplication {
            profile: tailored,
            cover_letter,
            job_info: JobInfo::new(job, company),
        }
    }
}
