//! Handler for `verselect check`.

use miette::Result;
use verselect_core::config::EngineConfig;
use verselect_resolver::{VersionComparator, VersionSelectorScheme};
use verselect_util::errors::VerselectError;

pub fn exec(config: &EngineConfig, selector: &str) -> Result<()> {
    let scheme = VersionSelectorScheme::new(VersionComparator::new(), config.status_scheme()?);
    let parsed = scheme
        .parse_selector(selector)
        .map_err(VerselectError::from)?;

    println!("selector:          {parsed}");
    println!("kind:              {}", parsed.kind());
    println!("dynamic:           {}", parsed.is_dynamic());
    println!(
        "short-circuit:     {}",
        parsed.can_short_circuit_when_version_already_preferred()
    );
    println!("requires metadata: {}", parsed.requires_metadata());
    Ok(())
}
