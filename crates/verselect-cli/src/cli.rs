//! CLI argument definitions for verselect.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "verselect",
    version,
    about = "Compare, sort and select version strings",
    long_about = "verselect orders version strings from any versioning convention and \
                  evaluates dynamic selectors such as `1.2.+`, `[1.0,2.0)` and \
                  `latest.release` against candidate lists."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration file (defaults to ./verselect.toml, then ~/.verselect/config.toml)
    #[arg(long, global = true, env = "VERSELECT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two versions
    Compare {
        /// Left-hand version
        a: String,
        /// Right-hand version
        b: String,
    },

    /// Sort versions, newest first
    Sort {
        /// Print oldest first instead
        #[arg(long)]
        ascending: bool,
        /// Versions to sort
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Pick the newest version accepted by a selector
    Select {
        /// Selector, e.g. `1.2.+`, `[1.0,2.0)` or `latest.release`
        selector: String,
        /// Read candidates and their statuses from a maven-metadata.xml file
        #[arg(long)]
        metadata: Option<PathBuf>,
        /// Version already chosen elsewhere, reused when the selector allows it
        #[arg(long)]
        prefer: Option<String>,
        /// Candidate versions
        versions: Vec<String>,
    },

    /// Parse a selector and describe it
    Check {
        /// Selector to parse
        selector: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
