// src/config.rs
use std::path::{Path, PathBuf};

use crate::generation::GenerationConfig;
use crate::profile_store::DEFAULT_BASE_PROFILE;

pub const DEFAULT_APPLICATIONS_DIR: &str = "applications";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_TEMPLATE: &str = "default";
pub const DEFAULT_TYPST_BIN: &str = "typst";

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_profile: PathBuf,
    pub applications_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub template: String,
    pub typst_bin: String,
    pub use_ai: bool,
    /// Resolved text-generation credentials, if any exist in the environment.
    pub generation: Option<GenerationConfig>,
    pub root_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            base_profile: PathBuf::from(DEFAULT_BASE_PROFILE),
            applications_dir: PathBuf::from(DEFAULT_APPLICATIONS_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            template: DEFAULT_TEMPLATE.to_string(),
            typst_bin: DEFAULT_TYPST_BIN.to_string(),
            use_ai: false,
            generation: None,
            root_dir: current_dir,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_profile(mut self, path: PathBuf) -> Self {
        self.base_profile = path;
        self
    }

    pub fn with_applications_dir(mut self, dir: PathBuf) -> Self {
        self.applications_dir = dir;
        self
    }

    pub fn with_templates_dir(mut self, dir: PathBuf) -> Self {
        self.templates_dir = dir;
        self
    }

    pub fn with_template(mut self, template: String) -> Self {
        self.template = template;
        self
    }

    pub fn with_typst_bin(mut self, typst_bin: String) -> Self {
        self.typst_bin = typst_bin;
        self
    }

    pub fn with_use_ai(mut self, use_ai: bool) -> Self {
        self.use_ai = use_ai;
        self
    }

    pub fn with_generation(mut self, generation: Option<GenerationConfig>) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_root_dir(mut self, dir: PathBuf) -> Self {
        self.root_dir = dir;
        self
    }

    fn absolute_path(&self, relative_path: &Path) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.to_path_buf()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn base_profile_absolute(&self) -> PathBuf {
        self.absolute_path(&self.base_profile)
    }

    pub fn applications_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.applications_dir)
    }

    pub fn templates_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.templates_dir)
    }

    /// Whether this run will actually call a text generator.
    pub fn ai_enabled(&self) -> bool {
        self.use_ai && self.generation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.base_profile, PathBuf::from("inputs/base_data.json"));
        assert_eq!(config.applications_dir, PathBuf::from("applications"));
        assert_eq!(config.template, "default");
        assert!(!config.use_ai);
        assert!(!config.ai_enabled());
    }

    #[test]
    fn test_relative_paths_resolve_against_root() {
        let config = AppConfig::new()
            .with_root_dir(PathBuf::from("/work"))
            .with_applications_dir(PathBuf::from("out"))
            .with_templates_dir(PathBuf::from("/opt/templates"));

        assert_eq!(config.applications_dir_absolute(), PathBuf::from("/work/out"));
        assert_eq!(config.templates_dir_absolute(), PathBuf::from("/opt/templates"));
        assert_eq!(
            config.base_profile_absolute(),
            PathBuf::from("/work/inputs/base_data.json")
        );
    }

    #[test]
    fn test_ai_requires_flag_and_credentials() {
        let generation = GenerationConfig::from_lookup(|key| {
            (key == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        });

        let config = AppConfig::new().with_generation(generation);
        assert!(!config.ai_enabled());
        assert!(config.with_use_ai(true).ai_enabled());
    }
}
