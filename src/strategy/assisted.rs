// src/strategy/assisted.rs
//! Generation-backed strategy with per-call fallback to the heuristic

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{heuristic, ContentStrategy, CoverLetterBrief};
use crate::app_log;
use crate::generation::parse::{parse_bullets, parse_json_response};
use crate::generation::prompts::{self, CoverLetterFields};
use crate::generation::{ChatMessage, GenerationError, TextGenerator};
use crate::types::posting::is_generic_company_name;
use crate::types::{CompanyProfile, JobPosting};

pub struct AssistedStrategy {
    generator: Arc<dyn TextGenerator>,
}

impl AssistedStrategy {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn ask(
        &self,
        system: &str,
        prompt: String,
        (temperature, max_tokens): (f32, u32),
    ) -> Result<String, GenerationError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(prompt)];
        self.generator
            .generate(&messages, temperature, max_tokens)
            .await
    }

    async fn ask_json<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: String,
        settings: (f32, u32),
    ) -> Result<T, GenerationError> {
        let response = self.ask(system, prompt, settings).await?;
        parse_json_response(&response)
    }

    async fn draft_cover_letter(&self, brief: &CoverLetterBrief) -> Result<String, GenerationError> {
        let skills = brief.top_skills.join(", ");
        let highlights = brief
            .recent_highlights
            .iter()
            .map(|h| format!("  - {}", h))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = prompts::cover_letter_draft_prompt(&CoverLetterFields {
            name: &brief.candidate_name,
            role: &brief.candidate_role,
            location: &brief.candidate_location,
            skills: &skills,
            highlights: &highlights,
            job_title: &brief.job_title,
            company: &brief.company_name,
            mission: &brief.company_mission,
        });

        self.ask(
            prompts::COVER_LETTER_SYSTEM,
            prompt,
            prompts::COVER_LETTER_DRAFT_SETTINGS,
        )
        .await
    }
}

#[async_trait]
impl ContentStrategy for AssistedStrategy {
    fn name(&self) -> &'static str {
        "assisted"
    }

    fn uses_generation(&self) -> bool {
        true
    }

    async fn extract_job(&self, text: &str) -> JobPosting {
        app_log!(info, "🤖 Parsing job description with AI...");

        let parsed = self
            .ask_json::<JobPosting>(
                prompts::JOB_PARSE_SYSTEM,
                prompts::job_parse_prompt(text),
                prompts::EXTRACTION_SETTINGS,
            )
            .await;

        match parsed {
            Ok(job) if job.has_content() => {
                app_log!(info, "✓ Job description parsed: {}", job.title);
                job
            }
            Ok(_) => {
                app_log!(warn, "AI job parsing returned no title or description, using line heuristics");
                heuristic::extract_job(text)
            }
            Err(e) => {
                app_log!(warn, "AI job parsing failed, using line heuristics: {}", e);
                heuristic::extract_job(text)
            }
        }
    }

    async fn extract_company(&self, text: &str) -> CompanyProfile {
        app_log!(info, "🤖 Parsing company information with AI...");

        let parsed = self
            .ask_json::<CompanyProfile>(
                prompts::COMPANY_PARSE_SYSTEM,
                prompts::company_parse_prompt(text),
                prompts::COMPANY_EXTRACTION_SETTINGS,
            )
            .await;

        match parsed {
            Ok(mut company) => {
                if is_generic_company_name(&company.name) {
                    let fallback = heuristic::extract_company(text).name;
                    app_log!(
                        warn,
                        "AI returned generic company name '{}', using '{}' from the text",
                        company.name,
                        fallback
                    );
                    company.name = fallback;
                }
                if company.about.trim().is_empty() {
                    company.about = text.to_string();
                }
                app_log!(info, "✓ Company information parsed: {}", company.name);
                company
            }
            Err(e) => {
                app_log!(warn, "AI company parsing failed, using line heuristics: {}", e);
                heuristic::extract_company(text)
            }
        }
    }

    async fn rewrite_summary(&self, summary: &str, job_text: &str) -> String {
        if summary.trim().is_empty() {
            return summary.to_string();
        }

        app_log!(info, "🤖 Optimizing professional summary with AI...");
        match self
            .ask(
                prompts::SUMMARY_SYSTEM,
                prompts::summary_prompt(summary, job_text),
                prompts::SUMMARY_SETTINGS,
            )
            .await
        {
            Ok(rewritten) if !rewritten.trim().is_empty() => rewritten.trim().to_string(),
            Ok(_) => summary.to_string(),
            Err(e) => {
                app_log!(warn, "Summary rewrite failed, keeping original: {}", e);
                summary.to_string()
            }
        }
    }

    async fn rewrite_bullets(&self, bullets: &[String], job_text: &str) -> Vec<String> {
        if bullets.is_empty() {
            return Vec::new();
        }

        app_log!(info, "🤖 Optimizing {} bullets with AI...", bullets.len());
        match self
            .ask(
                prompts::BULLETS_SYSTEM,
                prompts::bullets_prompt(bullets, job_text),
                prompts::BULLET_SETTINGS,
            )
            .await
        {
            Ok(response) => parse_bullets(&response, bullets),
            Err(e) => {
                app_log!(warn, "Bullet rewrite failed, keeping original: {}", e);
                bullets.to_vec()
            }
        }
    }

    async fn write_cover_letter(&self, brief: &CoverLetterBrief) -> String {
        app_log!(info, "🤖 Drafting cover letter with AI...");
        let draft = match self.draft_cover_letter(brief).await {
            Ok(draft) => draft,
            Err(e) => {
                app_log!(warn, "Cover letter draft failed, using template: {}", e);
                return heuristic::template_cover_letter(brief);
            }
        };

        match self
            .ask(
                prompts::COVER_LETTER_SYSTEM,
                prompts::cover_letter_polish_prompt(&draft),
                prompts::COVER_LETTER_POLISH_SETTINGS,
            )
            .await
        {
            Ok(polished) if !polished.trim().is_empty() => polished.trim().to_string(),
            Ok(_) => draft,
            Err(e) => {
                app_log!(warn, "Cover letter polish failed, keeping draft: {}", e);
                draft
            }
        }
    }
}
