// src/packager.rs
//! Per-application output folder and provenance snapshots

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

use crate::core::FsOps;
use crate::render::DocumentKind;
use crate::types::{CandidateProfile, CompanyProfile, CustomizedApplication, JobPosting};
use crate::utils::{date_stamp, sanitize_company_name};

pub const CUSTOMIZED_DATA_FILE: &str = "customized_data.json";
pub const BASE_SNAPSHOT_FILE: &str = "base_data_snapshot.json";
pub const PARSED_JOB_FILE: &str = "parsed_job_description.json";
pub const PARSED_COMPANY_FILE: &str = "parsed_company_info.json";

/// The six files of a finished application, in the order they are reported.
pub const PACKAGE_FILES: [&str; 6] = [
    "resume.pdf",
    "cover_letter.pdf",
    CUSTOMIZED_DATA_FILE,
    BASE_SNAPSHOT_FILE,
    PARSED_JOB_FILE,
    PARSED_COMPANY_FILE,
];

/// `<root>/<SanitizedCompany>_<YYYYMMDD>/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFolder {
    path: PathBuf,
}

impl ApplicationFolder {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document_path(&self, kind: DocumentKind) -> PathBuf {
        self.path.join(kind.output_file_name())
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

pub struct ApplicationPackager {
    root: PathBuf,
    date: Option<NaiveDate>,
}

impl ApplicationPackager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            date: None,
        }
    }

    /// Pin the folder date instead of reading the local clock.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn folder_name(&self, company_name: &str) -> String {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        format!("{}_{}", sanitize_company_name(company_name), date_stamp(date))
    }

    /// Create the folder if needed. A same-day rerun for the same company
    /// reuses it and its files are overwritten.
    pub async fn create_folder(&self, company_name: &str) -> Result<ApplicationFolder> {
        let path = self.root.join(self.folder_name(company_name));
        FsOps::ensure_dir_exists(&path).await?;
        Ok(ApplicationFolder { path })
    }

    /// Write the four JSON files next to the rendered documents.
    ///
    /// The base snapshot is a byte copy of the profile file when it exists,
    /// otherwise the loaded profile serialized.
    pub async fn write_snapshots(
        &self,
        folder: &ApplicationFolder,
        application: &CustomizedApplication,
        base_profile_path: &Path,
        base_profile: &CandidateProfile,
        job: &JobPosting,
        company: &CompanyProfile,
    ) -> Result<()> {
        FsOps::write_json_pretty(&folder.file(CUSTOMIZED_DATA_FILE), application).await?;

        let snapshot = folder.file(BASE_SNAPSHOT_FILE);
        if base_profile_path.is_file() {
            FsOps::copy_file(base_profile_path, &snapshot).await?;
        } else {
            FsOps::write_json_pretty(&snapshot, base_profile).await?;
        }

        FsOps::write_json_pretty(&folder.file(PARSED_JOB_FILE), job).await?;
        FsOps::write_json_pretty(&folder.file(PARSED_COMPANY_FILE), company).await?;
        Ok(())
    }
}
