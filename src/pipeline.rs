// src/pipeline.rs
//! One application, end to end: profile, inputs, customization, documents,
//! snapshots

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_log;
use crate::customizer::ContentCustomizer;
use crate::extractor::TextExtractor;
use crate::normalizer::{InputError, InputMode, InputNormalizer};
use crate::packager::{ApplicationFolder, ApplicationPackager};
use crate::profile_store::ProfileStore;
use crate::render::{DocumentKind, DocumentRenderer};
use crate::strategy::ContentStrategy;
use crate::types::{CompanyProfile, CustomizedApplication, JobPosting};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRequest {
    pub job_path: PathBuf,
    pub company_path: Option<PathBuf>,
}

impl ApplicationRequest {
    pub fn new(job_path: PathBuf, company_path: Option<PathBuf>) -> Self {
        Self {
            job_path,
            company_path,
        }
    }

    /// Every named input file must exist before anything is written.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.job_path.is_file() {
            return Err(InputError::MissingFile {
                kind: "Job",
                path: self.job_path.clone(),
            });
        }
        if let Some(company_path) = &self.company_path {
            if !company_path.is_file() {
                return Err(InputError::MissingFile {
                    kind: "Company",
                    path: company_path.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationOutcome {
    pub folder: ApplicationFolder,
    pub application: CustomizedApplication,
    pub job: JobPosting,
    pub company: CompanyProfile,
    pub mode: InputMode,
    /// The base profile was missing and a skeleton was written.
    pub profile_created: bool,
}

pub struct ApplicationPipeline {
    profile_store: ProfileStore,
    normalizer: InputNormalizer,
    customizer: ContentCustomizer,
    renderer: Arc<dyn DocumentRenderer>,
    packager: ApplicationPackager,
}

impl ApplicationPipeline {
    pub fn new(
        profile_store: ProfileStore,
        strategy: Arc<dyn ContentStrategy>,
        renderer: Arc<dyn DocumentRenderer>,
        packager: ApplicationPackager,
    ) -> Self {
        Self {
            profile_store,
            normalizer: InputNormalizer::new(TextExtractor::new(strategy.clone())),
            customizer: ContentCustomizer::new(strategy),
            renderer,
            packager,
        }
    }

    /// Runs every step in order. Input problems fail before the application
    /// folder exists; rendering failures propagate.
    pub async fn run(&self, request: &ApplicationRequest) -> Result<ApplicationOutcome> {
        request.validate()?;

        let loaded = self.profile_store.load().await?;
        if loaded.created {
            println!(
                "📝 Created a template base profile at {}. Edit it with your own details.",
                self.profile_store.path().display()
            );
        }

        let input = self
            .normalizer
            .normalize(&request.job_path, request.company_path.as_deref())
            .await?;
        app_log!(
            info,
            "Tailoring for '{}' at '{}' ({})",
            input.job.title,
            input.company.name,
            input.mode
        );

        let application = self
            .customizer
            .customize(&loaded.profile, &input.job, &input.company)
            .await;

        let folder = self.packager.create_folder(&input.company.name).await?;

        for kind in DocumentKind::ALL {
            self.renderer
                .render(kind, &application, &folder.document_path(kind))
                .await?;
        }

        self.packager
            .write_snapshots(
                &folder,
                &application,
                self.profile_store.path(),
                &loaded.profile,
                &input.job,
                &input.company,
            )
            .await?;

        Ok(ApplicationOutcome {
            folder,
            application,
            job: input.job,
            company: input.company,
            mode: input.mode,
            profile_created: loaded.created,
        })
    }
}
