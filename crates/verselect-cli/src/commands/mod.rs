//! Command dispatch and handler modules.

mod check;
mod compare;
mod select;
mod sort;

use std::path::Path;

use miette::Result;
use verselect_core::config::EngineConfig;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Compare { a, b } => compare::exec(&a, &b),
        Command::Sort {
            ascending,
            versions,
        } => sort::exec(&config, versions, ascending),
        Command::Select {
            selector,
            metadata,
            prefer,
            versions,
        } => select::exec(
            &config,
            &selector,
            metadata.as_deref(),
            prefer.as_deref(),
            versions,
        ),
        Command::Check { selector } => check::exec(&config, &selector),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => EngineConfig::discover(),
    }
}
