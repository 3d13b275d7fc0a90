//! Picks the best candidate for a selector.
//!
//! Candidates come from a repository collaborator, possibly one network round
//! trip at a time. When the collaborator promises newest-first order the
//! ranker stops pulling at the first accepted candidate; otherwise it drains
//! the sequence and sorts it with the comparator before scanning.

use futures_util::{Stream, StreamExt};
use verselect_core::versioned::Candidate;

use crate::selector::VersionSelector;
use crate::version::{ParsedVersion, VersionComparator};

/// Ordering guarantee given by whoever produces the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateOrder {
    /// Newest first; the first accepted candidate is the winner.
    Descending,
    /// No guarantee; candidates are sorted before scanning.
    #[default]
    Unsorted,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateRanker {
    comparator: VersionComparator,
    order: CandidateOrder,
}

impl CandidateRanker {
    pub fn new(comparator: VersionComparator, order: CandidateOrder) -> Self {
        Self { comparator, order }
    }

    pub fn order(&self) -> CandidateOrder {
        self.order
    }

    /// Select the newest accepted candidate.
    ///
    /// `preferred` is a version already chosen for this module elsewhere in
    /// the graph. If the selector allows it and accepts that version, it is
    /// returned without touching `candidates`.
    pub fn select<I>(
        &self,
        selector: &VersionSelector,
        candidates: I,
        preferred: Option<&str>,
    ) -> Option<Candidate>
    where
        I: IntoIterator<Item = Candidate>,
    {
        if let Some(hit) = short_circuit(selector, preferred) {
            return Some(hit);
        }
        let winner = match self.order {
            CandidateOrder::Descending => candidates
                .into_iter()
                .find(|candidate| accepts(selector, candidate)),
            CandidateOrder::Unsorted => self.scan_sorted(selector, candidates.into_iter().collect()),
        };
        log_outcome(selector, winner.as_ref());
        winner
    }

    /// Like [`select`](Self::select), for candidates that arrive
    /// incrementally. Nothing past the winner is polled when the order is
    /// [`CandidateOrder::Descending`].
    pub async fn select_stream<S>(
        &self,
        selector: &VersionSelector,
        candidates: S,
        preferred: Option<&str>,
    ) -> Option<Candidate>
    where
        S: Stream<Item = Candidate>,
    {
        if let Some(hit) = short_circuit(selector, preferred) {
            return Some(hit);
        }
        let mut candidates = std::pin::pin!(candidates);
        let winner = match self.order {
            CandidateOrder::Descending => {
                let mut found = None;
                while let Some(candidate) = candidates.next().await {
                    if accepts(selector, &candidate) {
                        found = Some(candidate);
                        break;
                    }
                }
                found
            }
            CandidateOrder::Unsorted => {
                let all: Vec<Candidate> = candidates.collect().await;
                self.scan_sorted(selector, all)
            }
        };
        log_outcome(selector, winner.as_ref());
        winner
    }

    fn scan_sorted(&self, selector: &VersionSelector, candidates: Vec<Candidate>) -> Option<Candidate> {
        tracing::trace!(
            "Sorting {} candidates for selector {selector}",
            candidates.len()
        );
        let mut keyed: Vec<(ParsedVersion, Candidate)> = candidates
            .into_iter()
            .map(|c| (ParsedVersion::parse(&c.version), c))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| self.comparator.compare(b, a));
        keyed
            .into_iter()
            .find(|(parsed, c)| selector.accepts_with_status(parsed, c.status.as_deref()))
            .map(|(_, c)| c)
    }
}

fn short_circuit(selector: &VersionSelector, preferred: Option<&str>) -> Option<Candidate> {
    let preferred = preferred?;
    if selector.can_short_circuit_when_version_already_preferred() && selector.accepts(preferred) {
        tracing::debug!("Selector {selector} satisfied by preferred version {preferred}");
        return Some(Candidate::new(preferred));
    }
    None
}

fn accepts(selector: &VersionSelector, candidate: &Candidate) -> bool {
    let accepted = selector.accepts_candidate(candidate);
    if !accepted {
        tracing::trace!("Selector {selector} rejected {candidate}");
    }
    accepted
}

fn log_outcome(selector: &VersionSelector, winner: Option<&Candidate>) {
    match winner {
        Some(c) => tracing::debug!("Selector {selector} matched {}", c.version),
        None => tracing::debug!("Selector {selector} matched no candidate"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::VersionSelectorScheme;

    fn selector(s: &str) -> VersionSelector {
        VersionSelectorScheme::default().parse_selector(s).unwrap()
    }

    fn candidates(versions: &[&str]) -> Vec<Candidate> {
        versions.iter().map(|v| Candidate::new(*v)).collect()
    }

    #[test]
    fn unsorted_range_uses_comparator_not_lexical_order() {
        let ranker = CandidateRanker::default();
        let winner = ranker
            .select(
                &selector("[1.0,2.0)"),
                candidates(&["1.0", "1.1", "1.2-beta", "2.0"]),
                None,
            )
            .unwrap();
        assert_eq!(winner.version, "1.2-beta");
    }

    #[test]
    fn default_ranker_sorts_defensively() {
        assert_eq!(CandidateRanker::default().order(), CandidateOrder::Unsorted);
        let ranker = CandidateRanker::new(VersionComparator::new(), CandidateOrder::Descending);
        assert_eq!(ranker.order(), CandidateOrder::Descending);
    }

    #[test]
    fn descending_stops_at_first_match() {
        let ranker = CandidateRanker::new(VersionComparator::new(), CandidateOrder::Descending);
        let mut pulled = 0;
        let source = ["3.0", "2.1", "2.0", "1.0"].into_iter().map(|v| {
            pulled += 1;
            Candidate::new(v)
        });
        let winner = ranker.select(&selector("2.+"), source, None).unwrap();
        assert_eq!(winner.version, "2.1");
        assert_eq!(pulled, 2);
    }

    #[test]
    fn no_match_is_none() {
        let ranker = CandidateRanker::default();
        assert!(ranker
            .select(&selector("[5.0,)"), candidates(&["1.0", "2.0"]), None)
            .is_none());
        assert!(ranker.select(&selector("1.+"), Vec::new(), None).is_none());
    }

    #[test]
    fn equal_versions_keep_input_order() {
        let ranker = CandidateRanker::default();
        let winner = ranker
            .select(&selector("1.+"), candidates(&["1.0.0", "0.9", "1.0", "1"]), None)
            .unwrap();
        assert_eq!(winner.version, "1.0.0");
    }

    #[test]
    fn preferred_short_circuits_without_pulling() {
        let ranker = CandidateRanker::default();
        let source = std::iter::from_fn(|| -> Option<Candidate> {
            panic!("candidates must not be listed")
        });
        let winner = ranker.select(&selector("1.2.+"), source, Some("1.2.7")).unwrap();
        assert_eq!(winner.version, "1.2.7");
    }

    #[test]
    fn preferred_ignored_when_not_accepted() {
        let ranker = CandidateRanker::default();
        let winner = ranker
            .select(&selector("1.2.+"), candidates(&["1.2.1", "1.3.0"]), Some("1.3.0"))
            .unwrap();
        assert_eq!(winner.version, "1.2.1");
    }

    #[test]
    fn range_never_short_circuits() {
        let ranker = CandidateRanker::default();
        let winner = ranker
            .select(&selector("[1.0,2.0)"), candidates(&["1.0", "1.5"]), Some("1.0"))
            .unwrap();
        assert_eq!(winner.version, "1.5");
    }

    #[test]
    fn latest_release_skips_integration_builds() {
        let ranker = CandidateRanker::default();
        let source = vec![
            Candidate::with_status("1.0", "release"),
            Candidate::with_status("1.1-SNAPSHOT", "integration"),
            Candidate::new("1.2"),
            Candidate::with_status("1.1-M1", "milestone"),
        ];
        let winner = ranker.select(&selector("latest.release"), source.clone(), None).unwrap();
        assert_eq!(winner.version, "1.0");

        let winner = ranker.select(&selector("latest.milestone"), source.clone(), None).unwrap();
        assert_eq!(winner.version, "1.1-M1");

        let winner = ranker.select(&selector("latest.integration"), source, None).unwrap();
        assert_eq!(winner.version, "1.1-SNAPSHOT");
    }

    #[test]
    fn latest_without_metadata_matches_nothing() {
        let ranker = CandidateRanker::default();
        assert!(ranker
            .select(&selector("latest.integration"), candidates(&["1.0", "2.0"]), None)
            .is_none());
    }
}
