// src/extractor.rs
//! Free text to structured job posting / company profile

use std::sync::Arc;

use crate::app_log;
use crate::strategy::ContentStrategy;
use crate::types::{CompanyProfile, JobPosting};

/// Job and company regions of a merged plain-text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSections {
    pub job: String,
    /// `None` when the text carries no company-labelled region.
    pub company: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Preamble,
    Job,
    Company,
}

fn classify_marker(line: &str) -> Option<Region> {
    let upper = line.to_uppercase();

    if upper.contains("COMPANY") && ["INFO", "ABOUT", "==="].iter().any(|m| upper.contains(m)) {
        return Some(Region::Company);
    }
    if upper.contains("JOB") && ["DESC", "ROLE", "==="].iter().any(|m| upper.contains(m)) {
        return Some(Region::Job);
    }
    None
}

/// Split merged text on section marker lines.
///
/// Markers are matched case-insensitively: "COMPANY" with INFO/ABOUT/===, or
/// "JOB" with DESC/ROLE/===. Marker lines are dropped. Lines before the first
/// marker are ambiguous and stay with the job region. Without any job marker
/// the whole text is the job and no company region is reported.
pub fn split_sections(text: &str) -> MergedSections {
    let mut current = Region::Preamble;
    let mut preamble = Vec::new();
    let mut job = Vec::new();
    let mut company = Vec::new();
    let mut saw_job_marker = false;
    let mut saw_company_marker = false;

    for line in text.lines() {
        if let Some(region) = classify_marker(line) {
            match region {
                Region::Job => saw_job_marker = true,
                Region::Company => saw_company_marker = true,
                Region::Preamble => {}
            }
            current = region;
            continue;
        }

        match current {
            Region::Preamble => preamble.push(line),
            Region::Job => job.push(line),
            Region::Company => company.push(line),
        }
    }

    if !saw_job_marker {
        return MergedSections {
            job: text.trim().to_string(),
            company: None,
        };
    }

    let job_text = preamble
        .into_iter()
        .chain(job)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    let company_text = company.join("\n").trim().to_string();

    MergedSections {
        job: if job_text.is_empty() {
            text.trim().to_string()
        } else {
            job_text
        },
        company: (saw_company_marker && !company_text.is_empty()).then_some(company_text),
    }
}

/// Runs extraction through whichever content strategy was selected.
pub struct TextExtractor {
    strategy: Arc<dyn ContentStrategy>,
}

impl TextExtractor {
    pub fn new(strategy: Arc<dyn ContentStrategy>) -> Self {
        Self { strategy }
    }

    pub async fn extract_job(&self, text: &str) -> JobPosting {
        self.strategy.extract_job(text).await
    }

    pub async fn extract_company(&self, text: &str) -> CompanyProfile {
        self.strategy.extract_company(text).await.with_fallback_name()
    }

    /// Extract both regions of a merged text independently.
    pub async fn extract_merged(&self, text: &str) -> (JobPosting, CompanyProfile) {
        let sections = split_sections(text);
        let job = self.extract_job(&sections.job).await;

        let company = match sections.company {
            Some(company_text) => self.extract_company(&company_text).await,
            None => {
                app_log!(
                    warn,
                    "No company section found in merged input, company information marked as not provided"
                );
                CompanyProfile::not_provided(job.company_hint())
            }
        };

        (job, company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::HeuristicStrategy;
    use crate::types::posting::NOT_PROVIDED;

    #[test]
    fn test_split_on_markers() {
        let text = "=== COMPANY INFO ===\nAbout Acme\nWe build anvils.\n\n=== JOB DESCRIPTION ===\nBackend Engineer\nWrite Rust services all day long";
        let sections = split_sections(text);
        assert_eq!(sections.job, "Backend Engineer\nWrite Rust services all day long");
        assert_eq!(sections.company.as_deref(), Some("About Acme\nWe build anvils."));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let text = "About the company:\nGlobex\nThe Job Role:\nAnalyst";
        let sections = split_sections(text);
        assert_eq!(sections.company.as_deref(), Some("Globex"));
        assert_eq!(sections.job, "Analyst");
    }

    #[test]
    fn test_preamble_goes_to_job() {
        let text = "Posted today\nJOB DESCRIPTION\nDeveloper";
        let sections = split_sections(text);
        assert_eq!(sections.job, "Posted today\nDeveloper");
        assert_eq!(sections.company, None);
    }

    #[test]
    fn test_without_job_marker_everything_is_job() {
        let text = "COMPANY INFO\nAcme\nDeveloper wanted";
        let sections = split_sections(text);
        assert_eq!(sections.job, text);
        assert_eq!(sections.company, None);
    }

    #[test]
    fn test_plain_text_has_no_company() {
        let sections = split_sections("Senior Engineer\nSome details");
        assert_eq!(sections.job, "Senior Engineer\nSome details");
        assert!(sections.company.is_none());
    }

    #[tokio::test]
    async fn test_merged_extraction_without_company_region() {
        let extractor = TextExtractor::new(Arc::new(HeuristicStrategy));
        let (job, company) = extractor.extract_merged("Platform Engineer\nRun the fleet").await;

        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(company.name, "Company");
        assert_eq!(company.about, NOT_PROVIDED);
    }

    #[tokio::test]
    async fn test_merged_extraction_with_both_regions() {
        let extractor = TextExtractor::new(Arc::new(HeuristicStrategy));
        let text = "COMPANY INFO\nAbout Acme Corp\nAnvils.\nJOB DESCRIPTION\nBackend Engineer";
        let (job, company) = extractor.extract_merged(text).await;

        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(company.name, "Acme Corp");
        assert_eq!(company.about, "About Acme Corp\nAnvils.");
    }
}
