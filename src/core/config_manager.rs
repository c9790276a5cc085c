// src/core/config_manager.rs
//! Layered configuration: optional YAML file, then environment, then CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use crate::app_log;
use crate::config::AppConfig;
use crate::generation::GenerationConfig;

pub const DEFAULT_CONFIG_FILE: &str = "cv_tailor.yaml";

const CONFIG_FILE_VAR: &str = "CV_TAILOR_CONFIG";
const APPLICATIONS_DIR_VAR: &str = "CV_APPLICATIONS_DIR";
const TEMPLATES_DIR_VAR: &str = "CV_TEMPLATES_DIR";
const TEMPLATE_VAR: &str = "CV_TEMPLATE";
const TYPST_BIN_VAR: &str = "TYPST_BIN";
const TIMEOUT_VAR: &str = "CV_LLM_TIMEOUT_SECS";

/// Contents of `cv_tailor.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub applications_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub template: Option<String>,
    pub typst_bin: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

pub struct ConfigManager;

impl ConfigManager {
    /// Resolve configuration from the working directory and process environment.
    pub fn load() -> Result<AppConfig> {
        let lookup = |key: &str| std::env::var(key).ok();

        let config_path = lookup(CONFIG_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let file = Self::load_file(&config_path)?;

        Ok(Self::from_sources(file, lookup))
    }

    /// Read the YAML file if present. A malformed file is an error.
    pub fn load_file(path: &Path) -> Result<Option<FileConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let file: FileConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        app_log!(info, "Loaded configuration from {}", path.display());
        Ok(Some(file))
    }

    /// Overlay environment variables on the file settings.
    pub fn from_sources<F>(file: Option<FileConfig>, lookup: F) -> AppConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = AppConfig::new();

        if let Some(dir) = var(APPLICATIONS_DIR_VAR)
            .map(PathBuf::from)
            .or(file.applications_dir)
        {
            config = config.with_applications_dir(dir);
        }
        if let Some(dir) = var(TEMPLATES_DIR_VAR).map(PathBuf::from).or(file.templates_dir) {
            config = config.with_templates_dir(dir);
        }
        if let Some(template) = var(TEMPLATE_VAR).or(file.template) {
            config = config.with_template(template);
        }
        if let Some(typst_bin) = var(TYPST_BIN_VAR).or(file.typst_bin) {
            config = config.with_typst_bin(typst_bin);
        }

        let mut generation = GenerationConfig::from_lookup(&lookup);
        let env_timeout = var(TIMEOUT_VAR);
        let env_timeout_valid = env_timeout
            .as_deref()
            .is_some_and(|value| value.trim().parse::<u64>().is_ok());
        if !env_timeout_valid {
            if let Some(value) = &env_timeout {
                app_log!(warn, "Ignoring invalid {}={:?}", TIMEOUT_VAR, value);
            }
            if let Some(timeout) = file.request_timeout_secs {
                generation = generation.map(|g| g.with_timeout(timeout));
            }
        }

        config.with_generation(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigManager::from_sources(None, env(&[]));
        assert_eq!(config.applications_dir, PathBuf::from("applications"));
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.template, "default");
        assert_eq!(config.typst_bin, "typst");
        assert!(config.generation.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            applications_dir: Some(PathBuf::from("from-file")),
            template: Some("modern".to_string()),
            ..FileConfig::default()
        };

        let config = ConfigManager::from_sources(
            Some(file),
            env(&[("CV_APPLICATIONS_DIR", "from-env")]),
        );
        assert_eq!(config.applications_dir, PathBuf::from("from-env"));
        assert_eq!(config.template, "modern");
    }

    #[test]
    fn test_file_timeout_applies_unless_env_sets_one() {
        let file = FileConfig {
            request_timeout_secs: Some(15),
            ..FileConfig::default()
        };

        let config = ConfigManager::from_sources(
            Some(file.clone()),
            env(&[("OPENAI_API_KEY", "sk-test")]),
        );
        assert_eq!(config.generation.unwrap().timeout_secs, 15);

        let config = ConfigManager::from_sources(
            Some(file),
            env(&[("OPENAI_API_KEY", "sk-test"), ("CV_LLM_TIMEOUT_SECS", "90")]),
        );
        assert_eq!(config.generation.unwrap().timeout_secs, 90);
    }

    #[test]
    fn test_unparsable_env_timeout_keeps_file_timeout() {
        let file = FileConfig {
            request_timeout_secs: Some(15),
            ..FileConfig::default()
        };

        let config = ConfigManager::from_sources(
            Some(file),
            env(&[("OPENAI_API_KEY", "sk-test"), ("CV_LLM_TIMEOUT_SECS", "abc")]),
        );
        assert_eq!(config.generation.unwrap().timeout_secs, 15);
    }

    #[test]
    fn test_load_file_from_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cv_tailor.yaml");
        std::fs::write(&path, "templates_dir: my-templates\ntypst_bin: /usr/local/bin/typst\n").unwrap();

        let file = ConfigManager::load_file(&path).unwrap().unwrap();
        assert_eq!(file.templates_dir, Some(PathBuf::from("my-templates")));
        assert_eq!(file.typst_bin.as_deref(), Some("/usr/local/bin/typst"));

        assert!(ConfigManager::load_file(&temp.path().join("missing.yaml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_unknown_yaml_key_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cv_tailor.yaml");
        std::fs::write(&path, "output: somewhere\n").unwrap();
        assert!(ConfigManager::load_file(&path).is_err());
    }
}
