// src/cli.rs
use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::pipeline::ApplicationRequest;
use crate::profile_store::DEFAULT_BASE_PROFILE;

#[derive(Debug, Parser)]
#[command(name = "cv-tailor")]
#[command(about = "Generate a customized resume and cover letter for one job application")]
pub struct Cli {
    /// Job input: merged job + company file, or the job file when --company is given
    #[arg(short, long)]
    pub job: PathBuf,

    /// Separate company information file (legacy two-file mode)
    #[arg(short, long)]
    pub company: Option<PathBuf>,

    /// Candidate base profile
    #[arg(short, long, default_value = DEFAULT_BASE_PROFILE)]
    pub base: PathBuf,

    /// Rewrite summary, bullets and cover letter with the text-generation API
    #[arg(long)]
    pub use_ai: bool,

    /// Root directory for application folders [default: applications]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory holding template sets [default: templates]
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// Template set to render with [default: default]
    #[arg(long)]
    pub template: Option<String>,

    /// Also write JSON logs to this file
    #[arg(long, env = "CV_TAILOR_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags win over file and environment settings.
    pub fn apply(&self, config: AppConfig) -> AppConfig {
        let mut config = config
            .with_base_profile(self.base.clone())
            .with_use_ai(self.use_ai);

        if let Some(dir) = &self.output_dir {
            config = config.with_applications_dir(dir.clone());
        }
        if let Some(dir) = &self.templates_dir {
            config = config.with_templates_dir(dir.clone());
        }
        if let Some(template) = &self.template {
            config = config.with_template(template.clone());
        }
        config
    }

    pub fn request(&self) -> ApplicationRequest {
        ApplicationRequest::new(self.job.clone(), self.company.clone())
    }
}
