use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "jclec", version)]
#[command(about = "Verify suspected vulnerable Java classes against their Maven artifacts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Local Maven repository (defaults to ~/.m2/repository)
    #[arg(long, value_name = "PATH", global = true)]
    pub m2: Option<PathBuf>,

    /// Remote repository URL, tried in the order given (repeatable)
    #[arg(long = "repo", value_name = "URL", global = true)]
    pub repos: Vec<String>,

    /// Search endpoint (defaults to Maven Central)
    #[arg(long, value_name = "URL", global = true)]
    pub search_url: Option<String>,

    /// Never contact remote repositories or the search service
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check every component of the dataset (default)
    Check {
        /// Dataset file; the bundled dataset is used when omitted
        #[arg(long, value_name = "FILE")]
        dataset: Option<PathBuf>,
    },
    /// Verify a single class in a single artifact
    Verify {
        coordinates: String,
        class_name: String,
    },
    /// Search Maven Central for artifacts containing a class
    Search {
        class_name: String,

        #[arg(long, value_name = "N", default_value_t = crate::search::DEFAULT_ROWS)]
        rows: u32,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Check { dataset: None })
    }
}
