use anyhow::Result;
use clap::Parser;
use cv_tailor::app_log;
use cv_tailor::cli::Cli;
use cv_tailor::core::ConfigManager;
use cv_tailor::logging::init_tracing;
use cv_tailor::packager::PACKAGE_FILES;
use cv_tailor::process_application;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(cli.log_file.as_deref())?;

    let config = cli.apply(ConfigManager::load()?);
    let request = cli.request();

    println!("🚀 Generating application documents");
    println!("  Job input: {}", request.job_path.display());
    if let Some(company) = &request.company_path {
        println!("  Company input: {}", company.display());
    }
    println!(
        "  AI optimization: {}",
        if config.ai_enabled() { "enabled" } else { "disabled" }
    );
    app_log!(
        debug,
        "Templates: {} (set '{}'), output root: {}",
        config.templates_dir.display(),
        config.template,
        config.applications_dir.display()
    );

    let outcome = process_application(&config, &request).await?;

    println!("\n✓ Application package created in: {}", outcome.folder.path().display());
    for file in PACKAGE_FILES {
        println!("  - {}", file);
    }
    println!("  Input mode: {}", outcome.mode);
    println!("  Position: {} at {}", outcome.job.title, outcome.company.name);

    Ok(())
}
