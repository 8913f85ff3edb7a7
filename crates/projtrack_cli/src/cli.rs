//! Command-line surface.
//!
//! # Responsibility
//! - Parse global flags and subcommands.
//! - Turn `title::description::people` arguments into form input.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "projtrack", version, about = "Headless project tracker widget")]
pub struct Cli {
    /// JSON config file; missing fields take their defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Health check
    Ping,
    /// Print the core version
    Version,
    /// Submit projects through the form and print the mounted widget
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Project as `title::description::people`; repeatable
    #[arg(long = "project", value_name = "TITLE::DESCRIPTION::PEOPLE")]
    pub projects: Vec<ProjectArg>,

    /// Also print the store snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Raw form input for one project. `people` is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectArg {
    pub title: String,
    pub description: String,
    pub people: String,
}

impl FromStr for ProjectArg {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(3, "::");
        match (parts.next(), parts.next(), parts.next()) {
            (Some(title), Some(description), Some(people)) => Ok(Self {
                title: title.to_string(),
                description: description.to_string(),
                people: people.to_string(),
            }),
            _ => Err(format!(
                "expected `title::description::people`, got `{raw}`"
            )),
        }
    }
}
