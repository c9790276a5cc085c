// src/core/template_engine.rs
//! Discovery of Typst template sets and placeholder substitution

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::FsOps;

pub const DEFAULT_RESUME_FILE: &str = "resume.typ";
pub const DEFAULT_COVER_LETTER_FILE: &str = "cover_letter.typ";

#[derive(Debug, Clone)]
pub struct TemplateInfo {
    pub id: String,
    pub path: PathBuf,
    pub manifest: TemplateManifest,
}

/// Optional `manifest.toml` inside a template set.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateManifest {
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    /// Overrides `resume.typ`.
    pub resume_file: Option<String>,
    /// Overrides `cover_letter.typ`.
    pub cover_letter_file: Option<String>,
}

impl TemplateManifest {
    fn unnamed(id: &str) -> Self {
        Self {
            name: id.to_string(),
            description: None,
            author: None,
            version: None,
            resume_file: None,
            cover_letter_file: None,
        }
    }
}

impl TemplateInfo {
    pub fn resume_file(&self) -> &str {
        self.manifest
            .resume_file
            .as_deref()
            .unwrap_or(DEFAULT_RESUME_FILE)
    }

    pub fn cover_letter_file(&self) -> &str {
        self.manifest
            .cover_letter_file
            .as_deref()
            .unwrap_or(DEFAULT_COVER_LETTER_FILE)
    }
}

pub struct TemplateEngine {
    templates_dir: PathBuf,
    templates: Vec<TemplateInfo>,
}

impl TemplateEngine {
    /// Create the engine and discover every template set under `templates_dir`.
    pub fn new(templates_dir: PathBuf) -> Result<Self> {
        let mut engine = Self {
            templates_dir,
            templates: Vec::new(),
        };
        engine.discover_templates()?;
        Ok(engine)
    }

    fn discover_templates(&mut self) -> Result<()> {
        self.templates.clear();

        if !self.templates_dir.exists() {
            app_log!(
                warn,
                "Templates directory does not exist: {}",
                self.templates_dir.display()
            );
            return Ok(());
        }

        let entries = std::fs::read_dir(&self.templates_dir).with_context(|| {
            format!(
                "Failed to read templates directory: {}",
                self.templates_dir.display()
            )
        })?;

        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(template_id) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            match Self::load_template_info(template_id, &path) {
                Ok(template) => {
                    app_log!(trace, "Loaded template: {} from {}", template.id, template.path.display());
                    self.templates.push(template);
                }
                Err(e) => app_log!(warn, "Failed to load template {}: {}", template_id, e),
            }
        }

        self.templates.sort_by(|a, b| a.id.cmp(&b.id));
        app_log!(debug, "Discovered {} templates", self.templates.len());
        Ok(())
    }

    fn load_template_info(template_id: &str, template_path: &Path) -> Result<TemplateInfo> {
        let manifest_path = template_path.join("manifest.toml");

        let manifest = if manifest_path.exists() {
            let content = std::fs::read_to_string(&manifest_path)
                .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))?
        } else {
            TemplateManifest::unnamed(template_id)
        };

        Ok(TemplateInfo {
            id: template_id.to_string(),
            path: template_path.to_path_buf(),
            manifest,
        })
    }

    pub fn list_templates(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.id.clone()).collect()
    }

    pub fn get_template(&self, template_id: &str) -> Option<&TemplateInfo> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    /// Look up a template set and check that both documents are present.
    pub fn require_template(&self, template_id: &str) -> Result<&TemplateInfo> {
        let template = self.get_template(template_id).ok_or_else(|| {
            anyhow::anyhow!(
                "Template '{}' not found. Available templates: {:?}. Templates directory: {}",
                template_id,
                self.list_templates(),
                self.templates_dir.display()
            )
        })?;

        for file in [template.resume_file(), template.cover_letter_file()] {
            let path = template.path.join(file);
            if !path.is_file() {
                anyhow::bail!(
                    "Template '{}' is missing {}",
                    template_id,
                    path.display()
                );
            }
        }

        Ok(template)
    }

    /// Replace `{{key}}` and `${key}` placeholders.
    pub fn process_variables(content: &str, variables: &HashMap<String, String>) -> String {
        let mut result = content.to_string();
        for (key, value) in variables {
            let placeholder_mustache = format!("{{{{{}}}}}", key);
            let placeholder_shell = format!("${{{}}}", key);
            result = result.replace(&placeholder_mustache, value);
            result = result.replace(&placeholder_shell, value);
        }
        result
    }

    /// Copy the whole template set, assets included, into `workspace_dir`.
    pub async fn prepare_template_workspace(
        &self,
        template_id: &str,
        workspace_dir: &Path,
    ) -> Result<&TemplateInfo> {
        let template = self.require_template(template_id)?;

        FsOps::copy_dir_recursive(&template.path, workspace_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to copy template '{}' into {}",
                    template_id,
                    workspace_dir.display()
                )
            })?;

        app_log!(
            trace,
            "Prepared template workspace: {} -> {}",
            template_id,
            workspace_dir.display()
        );
        Ok(template)
    }
}
