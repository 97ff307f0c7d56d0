use crate::{
    cli::args::{FixArgs, IndexArgs, IntegrateArgs, ValidateArgs},
    core::{
        default_report_path, write_index, CapheConfig, CatalogueBuilder, ConfigLoader,
        ConfigValidator, DiscoveryFeed, FsSink, IntegrationRun, MaintenancePass, RunSummary,
        ValidationRun, ValidationStatus,
    },
    Result,
};
use anyhow::Context;
use std::env;
use std::path::{Path, PathBuf};

/// Absolute workspace directory: the `--workspace` flag or the current directory.
pub fn resolve_workspace(flag: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    Ok(match flag {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd,
    })
}

fn load_config(workspace: &Path) -> Result<CapheConfig> {
    let config = ConfigLoader::load_from_workspace(workspace)?;
    ConfigValidator::validate(&config)?;
    Ok(config)
}

fn source_dir(workspace: &Path, config: &CapheConfig, flag: Option<PathBuf>) -> PathBuf {
    let path = flag.unwrap_or_else(|| config.paths.source_dir.clone());
    CapheConfig::resolve(workspace, &path)
}

pub fn validate(workspace: &Path, args: ValidateArgs) -> Result<i32> {
    let config = load_config(workspace)?;
    let source = source_dir(workspace, &config, args.path);
    tracing::info!("Validating workflows in {}", source.display());

    let feed = DiscoveryFeed::new(&source, config.discovery_options());
    let run = ValidationRun::new(&feed);
    let report = if args.no_report {
        run.execute()?
    } else {
        let report_path = match args.report {
            Some(path) => CapheConfig::resolve(workspace, &path),
            None => default_report_path(&source, &config.validation.report_file),
        };
        let report = run.execute_and_persist(&FsSink, &report_path)?;
        println!("Report: {}", report_path.display());
        report
    };

    let summary = &report.summary;
    println!("Total workflows:     {}", summary.total_workflows);
    println!("Valid:               {}", summary.valid);
    println!("Missing metadata:    {}", summary.missing_metadata);
    println!("Invalid metadata:    {}", summary.invalid_metadata);
    println!("Invalid workflow:    {}", summary.invalid_workflow);
    println!("Completion rate:     {}", summary.completion_rate);
    println!("Total errors:        {}", summary.total_errors);
    println!("Total warnings:      {}", summary.total_warnings);

    for outcome in report
        .with_status(ValidationStatus::InvalidMetadata)
        .chain(report.with_status(ValidationStatus::InvalidWorkflow))
    {
        println!("\n{} [{}] {}", outcome.workflow, outcome.location, outcome.status);
        for error in outcome.errors() {
            println!("  - {}", error);
        }
    }

    Ok(report.exit_code())
}

pub fn integrate(workspace: &Path, args: IntegrateArgs) -> Result<i32> {
    let config = load_config(workspace)?;
    let source = source_dir(workspace, &config, args.source);
    let target = CapheConfig::resolve(
        workspace,
        &args.target.unwrap_or_else(|| config.paths.target_dir.clone()),
    );
    let seed = args.seed.unwrap_or(config.integration.index_seed);
    tracing::info!(
        "Integrating {} into {} (seed {})",
        source.display(),
        target.display(),
        seed
    );

    let feed = DiscoveryFeed::new(&source, config.discovery_options());
    let sink = FsSink;
    let mut run = IntegrationRun::new(&feed, &sink, &target, seed);
    let report = run.execute_and_persist(&config.integration.report_file)?;

    let summary = &report.summary;
    println!("Total workflows:     {}", summary.total_workflows);
    println!("Integrated:          {}", summary.successful_integrations);
    println!("Failed:              {}", summary.failed_integrations);
    println!("Success rate:        {}", summary.success_rate);
    println!("Namespaces:          {}", report.namespaces_used().join(", "));
    println!(
        "Report: {}",
        target.join(&config.integration.report_file).display()
    );
    for failure in report.results.results.iter().filter(|o| !o.success) {
        println!(
            "  - {}: {}",
            failure.source_workflow.display(),
            failure.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(report.exit_code())
}

pub fn fix(workspace: &Path, args: FixArgs) -> Result<i32> {
    let config = load_config(workspace)?;
    let source = source_dir(workspace, &config, args.path);
    tracing::info!("Fixing metadata in {}", source.display());

    let feed = DiscoveryFeed::new(&source, config.discovery_options());
    let summary = MaintenancePass::new(&feed, &FsSink).execute()?;

    println!("Fixed existing metadata: {}", summary.fixed);
    println!("Created new metadata:    {}", summary.created);
    if summary.failed > 0 {
        println!("Errors:                  {}", summary.failed);
    }
    println!(
        "Total processed:         {}/{}",
        summary.processed(),
        summary.processed() + summary.failed
    );

    Ok(if summary.failed > 0 { 1 } else { 0 })
}

pub fn index(workspace: &Path, args: IndexArgs) -> Result<i32> {
    let config = load_config(workspace)?;
    let source = source_dir(workspace, &config, args.path);
    let output = CapheConfig::resolve(
        workspace,
        &args
            .output
            .unwrap_or_else(|| config.index.output_file.clone()),
    );
    tracing::info!("Indexing {} into {}", source.display(), output.display());

    let feed = DiscoveryFeed::new(&source, config.discovery_options());
    let index = CatalogueBuilder::new(&feed, config.index.popular_tag_limit).build()?;
    let written = write_index(&index, &output, config.index.minified)?;

    println!("Total workflows: {}", index.total_workflows);
    println!("Categories:      {}", index.categories.len());
    println!("Integrations:    {}", index.integrations.len());
    for category in &index.categories {
        println!("  - {}: {}", category.name, category.count);
    }
    for path in written {
        println!("Index saved to: {}", path.display());
    }

    Ok(0)
}
