use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Workflow tree to validate (default: paths.source_dir from caphe.toml)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Where to write the JSON report (default: next to the workflow tree)
    #[arg(long, value_name = "FILE", help_heading = "Report")]
    pub report: Option<PathBuf>,

    /// Skip writing the JSON report
    #[arg(long, conflicts_with = "report", help_heading = "Report")]
    pub no_report: bool,
}

#[derive(Args, Debug)]
pub struct IntegrateArgs {
    /// Workflow tree to migrate (default: paths.source_dir)
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Catalogue root receiving workflows/{namespace}/ (default: paths.target_dir)
    #[arg(long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Filename indices start just above this value (default: 5000)
    #[arg(long, value_name = "N")]
    pub seed: Option<u32>,
}

#[derive(Args, Debug)]
pub struct FixArgs {
    /// Workflow tree to repair (default: paths.source_dir)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Workflow tree to index (default: paths.source_dir)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Index file to write (default: index.output_file)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
