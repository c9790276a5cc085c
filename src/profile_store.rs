// src/profile_store.rs
//! Candidate base profile on disk

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::FsOps;
use crate::types::CandidateProfile;

pub const DEFAULT_BASE_PROFILE: &str = "inputs/base_data.json";

#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub profile: CandidateProfile,
    /// The file did not exist and was written from the skeleton.
    pub created: bool,
}

pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, writing the placeholder skeleton first if the file
    /// is missing.
    pub async fn load(&self) -> Result<LoadedProfile> {
        if !self.path.exists() {
            app_log!(
                warn,
                "Base profile not found, creating a template at {}",
                self.path.display()
            );
            let profile = CandidateProfile::skeleton();
            self.save(&profile).await?;
            return Ok(LoadedProfile {
                profile,
                created: true,
            });
        }

        let content = FsOps::read_file_safe(&self.path).await?;
        let profile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid base profile JSON: {}", self.path.display()))?;

        app_log!(debug, "Loaded base profile from {}", self.path.display());
        Ok(LoadedProfile {
            profile,
            created: false,
        })
    }

    /// Persist `profile`. Customization never calls this.
    pub async fn save(&self, profile: &CandidateProfile) -> Result<()> {
        FsOps::write_json_pretty(&self.path, profile)
            .await
            .with_context(|| format!("Failed to save base profile: {}", self.path.display()))
    }
}
