//! Handler for `verselect select`.

use std::path::Path;

use miette::Result;
use verselect_core::config::EngineConfig;
use verselect_core::versioned::Candidate;
use verselect_resolver::{CandidateOrder, CandidateRanker, VersionComparator, VersionSelectorScheme};
use verselect_util::errors::VerselectError;

pub fn exec(
    config: &EngineConfig,
    selector: &str,
    metadata: Option<&Path>,
    prefer: Option<&str>,
    versions: Vec<String>,
) -> Result<()> {
    let scheme = VersionSelectorScheme::new(VersionComparator::new(), config.status_scheme()?);
    let parsed = scheme
        .parse_selector(selector)
        .map_err(VerselectError::from)?;

    let mut candidates: Vec<Candidate> = match metadata {
        Some(path) => {
            tracing::debug!("Reading metadata from {}", path.display());
            let xml = std::fs::read_to_string(path).map_err(VerselectError::Io)?;
            verselect_maven::metadata::parse_metadata(&xml)?.candidates()
        }
        None => Vec::new(),
    };
    candidates.extend(versions.into_iter().map(Candidate::new));

    if candidates.is_empty() && prefer.is_none() {
        return Err(VerselectError::Generic {
            message: "No candidate versions given; pass versions or --metadata".to_string(),
        }
        .into());
    }

    let order = if config.ranker.assume_sorted {
        CandidateOrder::Descending
    } else {
        CandidateOrder::Unsorted
    };
    let ranker = CandidateRanker::new(scheme.comparator(), order);
    tracing::debug!(
        "Ranking {} candidates ({:?}) with statuses {}",
        candidates.len(),
        ranker.order(),
        scheme.statuses()
    );

    match ranker.select(&parsed, candidates, prefer) {
        Some(winner) => {
            println!("{}", winner.version);
            Ok(())
        }
        None => Err(VerselectError::Generic {
            message: format!("No matching version for selector '{parsed}'"),
        }
        .into()),
    }
}
