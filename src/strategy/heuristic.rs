// src/strategy/heuristic.rs
//! Deterministic strategy: line heuristics for extraction, pass-through for
//! rewriting and a fixed cover-letter template

use async_trait::async_trait;

use super::{ContentStrategy, CoverLetterBrief};
use crate::types::posting::PLACEHOLDER_COMPANY_NAME;
use crate::types::{CompanyProfile, JobPosting};
use crate::utils::{join_natural, truncate_chars};

const MAX_NAME_CHARS: usize = 100;
const MAX_REQUIREMENTS: usize = 10;
const MIN_REQUIREMENT_CHARS: usize = 20;
const DEFAULT_JOB_TITLE: &str = "Position";
const COMPANY_PREFIXES: &[&str] = &["About ", "Company: "];

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

/// First line as title, whole text as description, long lines as requirements.
pub fn extract_job(text: &str) -> JobPosting {
    let lines: Vec<&str> = text.trim().lines().collect();

    let title = lines
        .first()
        .map(|line| truncate_chars(line.trim(), MAX_NAME_CHARS))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string());

    let requirements = lines
        .iter()
        .filter(|line| !line.trim().is_empty() && line.chars().count() > MIN_REQUIREMENT_CHARS)
        .map(|line| line.trim().to_string())
        .take(MAX_REQUIREMENTS)
        .collect();

    JobPosting {
        title,
        description: text.to_string(),
        requirements,
        ..JobPosting::default()
    }
}

/// First line minus "About " / "Company: " as name, whole text as about.
pub fn extract_company(text: &str) -> CompanyProfile {
    let first_line = text.trim().lines().next().unwrap_or_default();

    let stripped = COMPANY_PREFIXES
        .iter()
        .fold(first_line.to_string(), |line, prefix| line.replace(prefix, ""));
    let name = truncate_chars(stripped.trim(), MAX_NAME_CHARS);

    CompanyProfile {
        name: if name.is_empty() {
            PLACEHOLDER_COMPANY_NAME.to_string()
        } else {
            name
        },
        about: text.to_string(),
        ..CompanyProfile::default()
    }
}

/// Salutation, a paragraph naming role, company and skills, a stock
/// paragraph, and the closing.
pub fn template_cover_letter(brief: &CoverLetterBrief) -> String {
    let role = if brief.job_title.trim().is_empty() {
        "the open position".to_string()
    } else {
        format!("the {} position", brief.job_title.trim())
    };
    let company = if brief.company_name.trim().is_empty() {
        "your company"
    } else {
        brief.company_name.trim()
    };

    let skills_sentence = if brief.top_skills.is_empty() {
        "My background aligns closely with what this role calls for.".to_string()
    } else {
        format!(
            "My experience with {} aligns closely with what this role calls for.",
            join_natural(&brief.top_skills)
        )
    };

    let opening = format!(
        "I am excited to apply for {} at {}. {}",
        role, company, skills_sentence
    );

    let boilerplate = format!(
        "Throughout my career I have focused on delivering reliable, well-crafted work and on \
         collaborating closely with the people around me. I would welcome the chance to bring \
         that same commitment to {} and to discuss how I can contribute.",
        company
    );

    let signature = if brief.candidate_name.trim().is_empty() {
        "Sincerely,".to_string()
    } else {
        format!("Sincerely,\n{}", brief.candidate_name.trim())
    };

    [
        "Dear Hiring Manager,".to_string(),
        opening,
        boilerplate,
        signature,
    ]
    .join("\n\n")
}

#[async_trait]
impl ContentStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn uses_generation(&self) -> bool {
        false
    }

    async fn extract_job(&self, text: &str) -> JobPosting {
        extract_job(text)
    }

    async fn extract_company(&self, text: &str) -> CompanyProfile {
        extract_company(text)
    }

    async fn rewrite_summary(&self, summary: &str, _job_text: &str) -> String {
        summary.to_string()
    }

    async fn rewrite_bullets(&self, bullets: &[String], _job_text: &str) -> Vec<String> {
        bullets.to_vec()
    }

    async fn write_cover_letter(&self, brief: &CoverLetterBrief) -> String {
        template_cover_letter(brief)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_line(i: usize) -> String {
        format!("Requirement number {} with plenty of detail", i)
    }

    #[test]
    fn test_job_title_and_capped_requirements() {
        let mut lines = vec!["Senior Engineer".to_string()];
        lines.extend((1..=12).map(long_line));
        let text = lines.join("\n");

        let job = extract_job(&text);
        assert_eq!(job.title, "Senior Engineer");
        assert_eq!(job.requirements.len(), 10);
        assert_eq!(job.requirements[0], long_line(1));
        assert_eq!(job.description, text);
    }

    #[test]
    fn test_short_lines_are_not_requirements() {
        let job = extract_job("Dev\nshort\n\n   still short   \nThis line is definitely long enough");
        assert_eq!(job.requirements, vec!["This line is definitely long enough"]);
    }

    #[test]
    fn test_job_title_truncated_to_100_chars() {
        let text = "x".repeat(150);
        assert_eq!(extract_job(&text).title.chars().count(), 100);
    }

    #[test]
    fn test_empty_job_text_gets_default_title() {
        assert_eq!(extract_job("   ").title, DEFAULT_JOB_TITLE);
    }

    #[test]
    fn test_company_prefixes_stripped() {
        assert_eq!(extract_company("About Acme Corp\nWe build anvils.").name, "Acme Corp");
        assert_eq!(extract_company("Company: Globex\nMore text").name, "Globex");
        assert_eq!(extract_company("Initech").name, "Initech");
        assert_eq!(extract_company("").name, PLACEHOLDER_COMPANY_NAME);
    }

    #[test]
    fn test_company_about_is_full_text() {
        let text = "About Acme\nWe build anvils.";
        assert_eq!(extract_company(text).about, text);
    }

    #[test]
    fn test_template_cover_letter_shape() {
        let brief = CoverLetterBrief {
            candidate_name: "Ada Lovelace".to_string(),
            top_skills: vec!["Rust".to_string(), "SQL".to_string()],
            job_title: "Backend Engineer".to_string(),
            company_name: "Acme".to_string(),
            ..CoverLetterBrief::default()
        };

        let letter = template_cover_letter(&brief);
        let paragraphs: Vec<&str> = letter.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 4);
        assert_eq!(paragraphs[0], "Dear Hiring Manager,");
        assert!(paragraphs[1].contains("the Backend Engineer position at Acme"));
        assert!(paragraphs[1].contains("Rust and SQL"));
        assert_eq!(paragraphs[3], "Sincerely,\nAda Lovelace");
    }

    #[tokio::test]
    async fn test_rewrites_pass_through() {
        let strategy = HeuristicStrategy;
        let bullets = vec!["One".to_string(), "Two".to_string()];
        assert_eq!(strategy.rewrite_summary("Summary", "job").await, "Summary");
        assert_eq!(strategy.rewrite_bullets(&bullets, "job").await, bullets);
    }
}
