pub mod cli;
pub mod config;
pub mod core;
pub mod customizer;
pub mod extractor;
pub mod generation;
pub mod logging;
pub mod normalizer;
pub mod packager;
pub mod pipeline;
pub mod profile_store;
pub mod render;
pub mod strategy;
pub mod types;
pub mod utils;

use anyhow::Result;
use std::sync::Arc;

pub use config::AppConfig;
pub use pipeline::{ApplicationOutcome, ApplicationPipeline, ApplicationRequest};

use packager::ApplicationPackager;
use profile_store::ProfileStore;
use render::{DocumentRenderer, TypstRenderer};
use strategy::select_strategy;

/// Wire the production collaborators from `config` and process one application.
pub async fn process_application(
    config: &AppConfig,
    request: &ApplicationRequest,
) -> Result<ApplicationOutcome> {
    request.validate()?;

    let strategy = select_strategy(config.use_ai, config.generation.clone())?;
    let renderer: Arc<dyn DocumentRenderer> = Arc::new(TypstRenderer::new(
        config.templates_dir_absolute(),
        &config.template,
        &config.typst_bin,
    )?);

    let pipeline = ApplicationPipeline::new(
        ProfileStore::new(config.base_profile_absolute()),
        strategy,
        renderer,
        ApplicationPackager::new(config.applications_dir_absolute()),
    );

    pipeline.run(request).await
}
