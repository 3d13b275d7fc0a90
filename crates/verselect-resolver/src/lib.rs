//! Version ordering and selection engine: version parsing, a total order over
//! arbitrary version strings, dynamic selector syntax, and candidate ranking.

pub mod cache;
pub mod ranker;
pub mod selector;
pub mod version;

pub use ranker::{CandidateOrder, CandidateRanker};
pub use selector::{SelectorSyntaxError, VersionSelector, VersionSelectorScheme};
pub use version::{ParsedVersion, VersionComparator};
