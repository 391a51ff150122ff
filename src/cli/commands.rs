//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagpage")]
#[command(about = "Synthesize tag pages from a markdown note vault", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new vault
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Build or refresh the page for one tag
    Generate {
        /// Tag of interest, exact (#work) or wildcard (#project/*)
        tag: String,

        /// Output file (default: <tag-page-dir>/<tag>.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scan mode for this run (lines, bullets, both)
        #[arg(long)]
        mode: Option<String>,

        /// Sort order for this run (source, oldest, newest)
        #[arg(long)]
        sort: Option<String>,
    },

    /// Regenerate every existing tag page in place
    Refresh,

    /// List every tag in the vault
    Tags,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
