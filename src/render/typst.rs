// src/render/typst.rs
//! Rendering through the external `typst` compiler

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::{DocumentKind, DocumentRenderer};
use crate::app_log;
use crate::core::{FsOps, TemplateEngine};
use crate::types::CustomizedApplication;
use crate::utils::escape_typst_markup;

/// Data file every template reads with `json("data.json")`.
pub const DATA_FILE: &str = "data.json";

const LETTER_DATE_FORMAT: &str = "%B %d, %Y";

pub struct TypstRenderer {
    engine: TemplateEngine,
    template: String,
    typst_bin: String,
}

impl TypstRenderer {
    /// Fails when the template set is missing or incomplete.
    pub fn new(templates_dir: PathBuf, template: &str, typst_bin: &str) -> Result<Self> {
        let engine = TemplateEngine::new(templates_dir)?;
        engine.require_template(template)?;

        Ok(Self {
            engine,
            template: template.to_string(),
            typst_bin: typst_bin.to_string(),
        })
    }

    async fn compile(&self, workspace: &Path, main_file: &str, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.typst_bin);
        cmd.arg("compile")
            .arg(main_file)
            .arg(output)
            .arg("--root")
            .arg(workspace)
            .current_dir(workspace);

        let result = cmd.output().await.with_context(|| {
            format!(
                "Failed to execute typst command '{}'. Is Typst installed?",
                self.typst_bin
            )
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stdout = String::from_utf8_lossy(&result.stdout);
            anyhow::bail!(
                "Typst compilation of {} failed: stderr={}, stdout={}",
                main_file,
                stderr,
                stdout
            );
        }

        Ok(())
    }
}

/// Scalar `{{var}}` values, escaped for Typst markup.
pub fn template_variables(
    application: &CustomizedApplication,
    date: NaiveDate,
) -> HashMap<String, String> {
    let info = &application.profile.personal_info;
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();

    [
        ("name", info.name.clone()),
        ("title", optional(&info.title)),
        ("email", optional(&info.email)),
        ("phone", optional(&info.phone)),
        ("location", optional(&info.location)),
        ("job_title", application.job_info.title.clone()),
        ("company", application.job_info.company.clone()),
        ("date", date.format(LETTER_DATE_FORMAT).to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), escape_typst_markup(&value)))
    .collect()
}

#[async_trait]
impl DocumentRenderer for TypstRenderer {
    async fn render(
        &self,
        kind: DocumentKind,
        application: &CustomizedApplication,
        output: &Path,
    ) -> Result<()> {
        let workspace = tempfile::Builder::new()
            .prefix("cv-tailor-")
            .tempdir()
            .context("Failed to create temporary workspace")?;

        let template = self
            .engine
            .prepare_template_workspace(&self.template, workspace.path())
            .await?;
        let main_file = kind.template_file(template).to_string();

        FsOps::write_json_pretty(&workspace.path().join(DATA_FILE), application).await?;

        let main_path = workspace.path().join(&main_file);
        let source = FsOps::read_file_safe(&main_path).await?;
        let variables = template_variables(application, Local::now().date_naive());
        FsOps::write_file_safe(&main_path, &TemplateEngine::process_variables(&source, &variables))
            .await?;

        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        let output = FsOps::normalize_path(&current_dir, output);

        app_log!(debug, "Compiling {} with template '{}'", kind, self.template);
        self.compile(workspace.path(), &main_file, &output).await?;

        println!("✓ {} generated: {}", capitalize(&kind.to_string()), output.display());
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandidateProfile, JobInfo};
    use tempfile::TempDir;

    fn application() -> CustomizedApplication {
        let mut profile = CandidateProfile::skeleton();
        profile.personal_info.name = "Ada #1".to_string();
        CustomizedApplication {
            profile,
            cover_letter: "Dear Hiring Manager,\n\nHello.".to_string(),
            job_info: JobInfo {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                ..JobInfo::default()
            },
        }
    }

    fn write_template(root: &Path) {
        let dir = root.join("default");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("resume.typ"), "= {{name}}").unwrap();
        std::fs::write(dir.join("cover_letter.typ"), "{{company}}").unwrap();
    }

    #[test]
    fn test_variables_are_escaped_and_dated() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let vars = template_variables(&application(), date);
        assert_eq!(vars["name"], "Ada \\#1");
        assert_eq!(vars["company"], "Acme");
        assert_eq!(vars["job_title"], "Backend Engineer");
        assert_eq!(vars["date"], "March 09, 2024");
        assert_eq!(vars["email"], "your.email\\@example.com");
    }

    #[test]
    fn test_new_requires_template_set() {
        let temp = TempDir::new().unwrap();
        assert!(TypstRenderer::new(temp.path().to_path_buf(), "default", "typst").is_err());

        write_template(temp.path());
        assert!(TypstRenderer::new(temp.path().to_path_buf(), "default", "typst").is_ok());
    }

    #[tokio::test]
    async fn test_missing_compiler_is_reported() {
        let temp = TempDir::new().unwrap();
        write_template(temp.path());
        let renderer = TypstRenderer::new(
            temp.path().to_path_buf(),
            "default",
            "/nonexistent/bin/typst",
        )
        .unwrap();

        let err = renderer
            .render(
                DocumentKind::Resume,
                &application(),
                &temp.path().join("resume.pdf"),
            )
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Is Typst installed?"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cover letter"), "Cover letter");
        assert_eq!(capitalize(""), "");
    }
}
