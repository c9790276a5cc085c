// src/normalizer.rs
//! Turns one merged input file, or a job file plus a company file, into a
//! canonical (JobPosting, CompanyProfile) pair

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app_log;
use crate::core::FsOps;
use crate::extractor::TextExtractor;
use crate::types::{CompanyProfile, JobPosting};

/// Section keys accepted in a merged JSON input. Either job key pairs with
/// either company key.
const JOB_SECTION_KEYS: &[&str] = &["job", "job_description"];
const COMPANY_SECTION_KEYS: &[&str] = &["company", "company_info"];

/// Fatal input problems. Nothing is written when one of these is raised.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{kind} file not found: {}", .path.display())]
    MissingFile { kind: &'static str, path: PathBuf },

    #[error(
        "Could not determine a job posting from {}: expected {{\"job\", \"company\"}}, \
         {{\"job_description\", \"company_info\"}} or a job object with a title or description",
        .path.display()
    )]
    UndeterminableJob { path: PathBuf },

    #[error("{kind} file {} holds JSON that is not an object", .path.display())]
    NotAnObject { kind: &'static str, path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// One JSON file with job and company sections.
    MergedJson,
    /// One plain-text file split on section markers.
    MergedText,
    /// One JSON job posting, company synthesized from it.
    BareJob,
    /// Legacy two-file mode.
    SeparateFiles,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputMode::MergedJson => "merged JSON",
            InputMode::MergedText => "merged text",
            InputMode::BareJob => "single job posting",
            InputMode::SeparateFiles => "separate job and company files",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    pub job: JobPosting,
    pub company: CompanyProfile,
    pub mode: InputMode,
}

pub struct InputNormalizer {
    extractor: TextExtractor,
}

impl InputNormalizer {
    pub fn new(extractor: TextExtractor) -> Self {
        Self { extractor }
    }

    /// Read and normalize the inputs. JSON versus text is decided by whether
    /// the content parses, never by file extension.
    pub async fn normalize(
        &self,
        job_path: &Path,
        company_path: Option<&Path>,
    ) -> Result<NormalizedInput> {
        let input = match company_path {
            None => {
                let content = read_input(job_path, "Job").await?;
                self.normalize_merged(&content, job_path).await?
            }
            Some(company_path) => {
                let job_content = read_input(job_path, "Job").await?;
                let company_content = read_input(company_path, "Company").await?;
                self.normalize_separate(&job_content, job_path, &company_content, company_path)
                    .await?
            }
        };

        Ok(NormalizedInput {
            company: input.company.with_fallback_name(),
            ..input
        })
    }

    /// Single-file mode over already-read content.
    pub async fn normalize_merged(&self, content: &str, path: &Path) -> Result<NormalizedInput> {
        let value = match serde_json::from_str::<Value>(content) {
            Ok(value) => value,
            Err(_) => {
                app_log!(info, "📄 Detected plain text input, extracting job and company sections");
                let (job, company) = self.extractor.extract_merged(content).await;
                return Ok(NormalizedInput {
                    job,
                    company,
                    mode: InputMode::MergedText,
                });
            }
        };

        let Value::Object(map) = value else {
            return Err(undeterminable(path));
        };

        if let Some((job, company)) = self.split_json_sections(&map, path).await? {
            app_log!(info, "✓ Loaded merged job and company data from single file");
            return Ok(NormalizedInput {
                job,
                company,
                mode: InputMode::MergedJson,
            });
        }

        if let Some(section) = single_job_section(&map) {
            let job = self.job_from_value(section.clone(), path).await?;
            app_log!(
                warn,
                "Merged input has a job section but no company section, company information marked as not provided"
            );
            let company = CompanyProfile::not_provided(job.company_hint());
            return Ok(NormalizedInput {
                job,
                company,
                mode: InputMode::MergedJson,
            });
        }

        if has_company_section(&map) {
            return Err(undeterminable(path));
        }

        let job: JobPosting = from_json_object(map, path)?;
        if !job.has_content() {
            return Err(undeterminable(path));
        }

        app_log!(info, "✓ Loaded job posting from single file, company synthesized from it");
        let company = CompanyProfile::from_hint(job.company_hint());
        Ok(NormalizedInput {
            job,
            company,
            mode: InputMode::BareJob,
        })
    }

    /// Two-file mode over already-read content.
    pub async fn normalize_separate(
        &self,
        job_content: &str,
        job_path: &Path,
        company_content: &str,
        company_path: &Path,
    ) -> Result<NormalizedInput> {
        let job = match serde_json::from_str::<Value>(job_content) {
            Ok(Value::Object(map)) => {
                app_log!(info, "✓ Loaded job data from JSON file");
                from_json_object(map, job_path)?
            }
            Ok(_) => return Err(not_an_object("Job", job_path)),
            Err(_) => {
                app_log!(info, "📄 Detected plain text job file, extracting");
                self.extractor.extract_job(job_content).await
            }
        };

        let company = match serde_json::from_str::<Value>(company_content) {
            Ok(Value::Object(map)) => {
                app_log!(info, "✓ Loaded company data from JSON file");
                from_json_object(map, company_path)?
            }
            Ok(_) => return Err(not_an_object("Company", company_path)),
            Err(_) => {
                app_log!(info, "📄 Detected plain text company file, extracting");
                self.extractor.extract_company(company_content).await
            }
        };

        Ok(NormalizedInput {
            job,
            company,
            mode: InputMode::SeparateFiles,
        })
    }

    async fn split_json_sections(
        &self,
        map: &Map<String, Value>,
        path: &Path,
    ) -> Result<Option<(JobPosting, CompanyProfile)>> {
        let (Some(job), Some(company)) = (
            section(map, JOB_SECTION_KEYS),
            section(map, COMPANY_SECTION_KEYS),
        ) else {
            return Ok(None);
        };

        let job = self.job_from_value(job.clone(), path).await?;
        let company = self.company_from_value(company.clone(), path).await?;
        Ok(Some((job, company)))
    }

    /// A section is either a structured object or free text to extract from.
    async fn job_from_value(&self, value: Value, path: &Path) -> Result<JobPosting> {
        match value {
            Value::Object(map) => from_json_object(map, path),
            Value::String(text) => Ok(self.extractor.extract_job(&text).await),
            _ => Err(undeterminable(path)),
        }
    }

    async fn company_from_value(&self, value: Value, path: &Path) -> Result<CompanyProfile> {
        match value {
            Value::Object(map) => from_json_object(map, path),
            Value::String(text) => Ok(self.extractor.extract_company(&text).await),
            Value::Null => Ok(CompanyProfile::default()),
            _ => Err(not_an_object("Company", path)),
        }
    }
}

async fn read_input(path: &Path, kind: &'static str) -> Result<String> {
    if !path.exists() {
        return Err(InputError::MissingFile {
            kind,
            path: path.to_path_buf(),
        }
        .into());
    }
    FsOps::read_file_safe(path).await
}

fn from_json_object<T: DeserializeOwned>(map: Map<String, Value>, path: &Path) -> Result<T> {
    serde_json::from_value(Value::Object(map))
        .with_context(|| format!("Unexpected field types in {}", path.display()))
}

fn section<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

fn single_job_section(map: &Map<String, Value>) -> Option<&Value> {
    JOB_SECTION_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|value| value.is_object())
}

fn has_company_section(map: &Map<String, Value>) -> bool {
    COMPANY_SECTION_KEYS
        .iter()
        .any(|key| map.get(*key).is_some_and(Value::is_object))
}

fn undeterminable(path: &Path) -> anyhow::Error {
    InputError::UndeterminableJob {
        path: path.to_path_buf(),
    }
    .into()
}

fn not_an_object(kind: &'static str, path: &Path) -> anyhow::Error {
    InputError::NotAnObject {
        kind,
        path: path.to_path_buf(),
    }
    .into()
}
