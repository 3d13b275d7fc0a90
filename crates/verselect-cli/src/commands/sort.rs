//! Handler for `verselect sort`.

use miette::Result;
use verselect_core::config::EngineConfig;
use verselect_resolver::cache::ParsedVersionCache;
use verselect_resolver::VersionComparator;

pub fn exec(config: &EngineConfig, mut versions: Vec<String>, ascending: bool) -> Result<()> {
    let comparator = VersionComparator::new();
    let mut cache = ParsedVersionCache::from_config(&config.cache);
    if ascending {
        cache.sort_ascending(&comparator, &mut versions);
    } else {
        cache.sort_descending(&comparator, &mut versions);
    }
    tracing::debug!(
        "Sorted {} versions ({} cache hits, {} misses)",
        versions.len(),
        cache.hits(),
        cache.misses()
    );

    for version in &versions {
        println!("{version}");
    }
    Ok(())
}
