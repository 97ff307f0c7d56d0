pub mod args;
pub mod commands;

pub use args::{FixArgs, IndexArgs, IntegrateArgs, ValidateArgs};
use crate::core::ConfigLoader;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
WORKFLOW COMMANDS:\n{subcommands}\n\
{after-help}";

#[derive(Parser, Debug)]
#[command(name = "caphe")]
#[command(version = crate::VERSION)]
#[command(about = "Validate workflow metadata and migrate workflows into the caphe-workflows catalogue")]
#[command(help_template = HELP_TEMPLATE)]
#[command(after_long_help = environment_help())]
pub struct Args {
    /// Workspace holding caphe.toml and .caphe/ (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Check every workflow and its metadata",
        long_about = "Validate checks workflow structure and the metadata contract for every workflow in the tree, then writes a JSON report. Exits non-zero when any error is found; missing metadata is only a warning.",
        after_help = "Example:\n    caphe validate workflows --report validation_report.json"
    )]
    Validate(ValidateArgs),
    #[command(
        about = "Transform workflows into the target catalogue",
        long_about = "Integrate rewrites every workflow that has metadata into the target schema and files it under workflows/{namespace}/ in the target root.",
        after_help = "Example:\n    caphe integrate --target frameworks/caphe-workflows --seed 5000"
    )]
    Integrate(IntegrateArgs),
    #[command(
        about = "Repair metadata and scaffold missing files",
        long_about = "Fix normalizes category and difficulty casing, fills defaulted fields, and creates metadata for workflows that have none.",
        after_help = "Example:\n    caphe fix workflows"
    )]
    Fix(FixArgs),
    #[command(
        about = "Build the searchable workflow index",
        long_about = "Index aggregates every metadata file into a catalogue with category, tag, integration and difficulty statistics.",
        after_help = "Example:\n    caphe index workflows --output workflow-index.json"
    )]
    Index(IndexArgs),
}

fn environment_help() -> String {
    format!(
        "Typical flow: fix metadata, validate until clean, integrate, then regenerate the index.\n\nENVIRONMENT:\n    {}",
        ConfigLoader::env_var_documentation().join("\n    ")
    )
}

/// Dispatch a parsed command; returns the process exit code.
pub fn run(args: Args) -> crate::Result<i32> {
    let workspace = commands::resolve_workspace(args.workspace.as_deref())?;
    match args.command {
        Command::Validate(validate_args) => commands::validate(&workspace, validate_args),
        Command::Integrate(integrate_args) => commands::integrate(&workspace, integrate_args),
        Command::Fix(fix_args) => commands::fix(&workspace, fix_args),
        Command::Index(index_args) => commands::index(&workspace, index_args),
    }
}
