//! Version selector syntax and acceptance.
//!
//! A dependency declaration names either a literal version or a dynamic
//! constraint. [`VersionSelectorScheme::parse_selector`] turns that string
//! into a [`VersionSelector`]:
//! - `latest.<status>`: newest candidate published with at least that status
//! - `1.2.+`, `1.+`, `+`: newest candidate whose parts start with the prefix
//! - `[1.0,2.0)`, `(,2.0]`, `[1.5]`, `]1.0,2.0[`: range with per-side inclusivity
//! - anything else: that exact string

use std::cmp::Ordering;
use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;
use verselect_core::status::StatusScheme;
use verselect_core::versioned::Candidate;
use verselect_util::errors::VerselectError;

use crate::version::{ParsedVersion, VersionComparator};

const LATEST_PREFIX: &str = "latest.";

const RANGE_HINT: &str =
    "expected `[lo,hi]`, `[lo,hi)`, `(lo,hi]` or `(lo,hi)`; either bound may be empty, e.g. `[1.0,)`";

/// A constraint string that could not be parsed.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("invalid version selector '{selector}': {reason}")]
#[diagnostic(code(verselect::selector_syntax))]
pub struct SelectorSyntaxError {
    #[source_code]
    pub selector: String,
    #[label("here")]
    pub span: SourceSpan,
    pub reason: String,
    #[help]
    pub hint: String,
}

impl SelectorSyntaxError {
    fn new(selector: &str, offset: usize, len: usize, reason: impl Into<String>, hint: &str) -> Self {
        Self {
            selector: selector.to_string(),
            span: (offset, len).into(),
            reason: reason.into(),
            hint: hint.to_string(),
        }
    }

    /// The part of the selector the error points at.
    pub fn offending(&self) -> &str {
        let start = self.span.offset().min(self.selector.len());
        let end = (start + self.span.len()).min(self.selector.len());
        &self.selector[start..end]
    }
}

impl From<SelectorSyntaxError> for VerselectError {
    fn from(err: SelectorSyntaxError) -> Self {
        VerselectError::Selector {
            selector: err.selector,
            span: err.span,
            reason: err.reason,
            hint: err.hint,
        }
    }
}

/// A parsed version constraint.
#[derive(Debug, Clone)]
pub enum VersionSelector {
    /// Byte-for-byte equality with one version string.
    Exact(String),
    /// Any version whose parts start with the prefix's parts.
    SubVersion(SubVersion),
    /// Any version between two optional bounds.
    Range(VersionRange),
    /// The newest version with at least the requested status.
    Latest(LatestStatus),
}

#[derive(Debug, Clone)]
pub struct SubVersion {
    prefix: ParsedVersion,
}

impl SubVersion {
    pub fn prefix(&self) -> &str {
        self.prefix.original()
    }
}

/// A version range with optional bounds. An absent bound is unbounded.
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
    comparator: VersionComparator,
}

#[derive(Debug, Clone)]
pub struct Bound {
    pub version: ParsedVersion,
    pub inclusive: bool,
}

impl VersionRange {
    /// Check if a version satisfies this range.
    pub fn contains(&self, version: &ParsedVersion) -> bool {
        if let Some(ref lower) = self.lower {
            let cmp = self.comparator.compare(version, &lower.version);
            if lower.inclusive {
                if cmp == Ordering::Less {
                    return false;
                }
            } else if cmp != Ordering::Greater {
                return false;
            }
        }
        if let Some(ref upper) = self.upper {
            let cmp = self.comparator.compare(version, &upper.version);
            if upper.inclusive {
                if cmp == Ordering::Greater {
                    return false;
                }
            } else if cmp != Ordering::Less {
                return false;
            }
        }
        true
    }

    fn is_single_version(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lo), Some(hi)) => {
                lo.inclusive && hi.inclusive && lo.version.original() == hi.version.original()
            }
            _ => false,
        }
    }
}

/// `latest.<status>` resolved against a status scheme.
#[derive(Debug, Clone)]
pub struct LatestStatus {
    status: String,
    rank: usize,
    scheme: StatusScheme,
}

impl LatestStatus {
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a candidate published with `status` is mature enough.
    /// Unknown or missing statuses never qualify.
    pub fn accepts_status(&self, status: Option<&str>) -> bool {
        status
            .and_then(|s| self.scheme.rank(s))
            .is_some_and(|rank| rank >= self.rank)
    }
}

impl VersionSelector {
    /// Whether `candidate` satisfies this selector from its version string
    /// alone. `Latest` needs status metadata and never accepts here; use
    /// [`accepts_candidate`](Self::accepts_candidate) instead.
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            VersionSelector::Exact(version) => version == candidate,
            VersionSelector::Latest(_) => false,
            _ => self.accepts_with_status(&ParsedVersion::parse(candidate), None),
        }
    }

    /// Whether a repository candidate, including its status, is accepted.
    pub fn accepts_candidate(&self, candidate: &Candidate) -> bool {
        match self {
            VersionSelector::Exact(version) => *version == candidate.version,
            _ => self.accepts_with_status(
                &ParsedVersion::parse(&candidate.version),
                candidate.status.as_deref(),
            ),
        }
    }

    pub fn accepts_with_status(&self, version: &ParsedVersion, status: Option<&str>) -> bool {
        match self {
            VersionSelector::Exact(target) => target == version.original(),
            VersionSelector::SubVersion(sub) => version.starts_with(&sub.prefix),
            VersionSelector::Range(range) => range.contains(version),
            VersionSelector::Latest(latest) => latest.accepts_status(status),
        }
    }

    /// Whether resolving this selector requires listing candidate versions.
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, VersionSelector::Exact(_))
    }

    /// Whether a version already chosen elsewhere in the graph can be reused
    /// without listing candidates, provided it is accepted.
    pub fn can_short_circuit_when_version_already_preferred(&self) -> bool {
        matches!(
            self,
            VersionSelector::Exact(_) | VersionSelector::SubVersion(_)
        )
    }

    /// Whether acceptance depends on per-candidate status metadata.
    pub fn requires_metadata(&self) -> bool {
        matches!(self, VersionSelector::Latest(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            VersionSelector::Exact(_) => "exact",
            VersionSelector::SubVersion(_) => "sub-version",
            VersionSelector::Range(_) => "range",
            VersionSelector::Latest(_) => "latest",
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSelector::Exact(version) => f.write_str(version),
            VersionSelector::SubVersion(sub) if sub.prefix().is_empty() => f.write_str("+"),
            VersionSelector::SubVersion(sub) => write!(f, "{}.+", sub.prefix()),
            VersionSelector::Range(range) if range.is_single_version() => {
                let lo = range.lower.as_ref().map(|b| b.version.original());
                write!(f, "[{}]", lo.unwrap_or_default())
            }
            VersionSelector::Range(range) => {
                let open = match &range.lower {
                    Some(b) if b.inclusive => '[',
                    _ => '(',
                };
                let close = match &range.upper {
                    Some(b) if b.inclusive => ']',
                    _ => ')',
                };
                let lo = range.lower.as_ref().map(|b| b.version.original());
                let hi = range.upper.as_ref().map(|b| b.version.original());
                write!(
                    f,
                    "{open}{},{}{close}",
                    lo.unwrap_or_default(),
                    hi.unwrap_or_default()
                )
            }
            VersionSelector::Latest(latest) => write!(f, "{LATEST_PREFIX}{}", latest.status),
        }
    }
}

/// Parses constraint strings into selectors.
///
/// Holds the comparator range selectors order with and the status scheme
/// `latest.<status>` selectors are checked against.
#[derive(Debug, Clone, Default)]
pub struct VersionSelectorScheme {
    comparator: VersionComparator,
    statuses: StatusScheme,
}

impl VersionSelectorScheme {
    pub fn new(comparator: VersionComparator, statuses: StatusScheme) -> Self {
        Self {
            comparator,
            statuses,
        }
    }

    pub fn comparator(&self) -> VersionComparator {
        self.comparator
    }

    pub fn statuses(&self) -> &StatusScheme {
        &self.statuses
    }

    pub fn parse_selector(&self, constraint: &str) -> Result<VersionSelector, SelectorSyntaxError> {
        let s = constraint.trim();
        let selector = if let Some(status) = s.strip_prefix(LATEST_PREFIX) {
            self.parse_latest(s, status)?
        } else if looks_like_range(s) {
            self.parse_range(s)?
        } else if let Some(prefix) = s.strip_suffix('+') {
            let prefix = prefix
                .strip_suffix(|c: char| matches!(c, '.' | '-' | '_'))
                .unwrap_or(prefix);
            VersionSelector::SubVersion(SubVersion {
                prefix: ParsedVersion::parse(prefix),
            })
        } else {
            VersionSelector::Exact(s.to_string())
        };
        tracing::trace!("Parsed selector '{s}' as {}", selector.kind());
        Ok(selector)
    }

    fn parse_latest(&self, s: &str, status: &str) -> Result<VersionSelector, SelectorSyntaxError> {
        let hint = format!(
            "expected `latest.<status>` with status one of: {}",
            self.statuses.statuses().join(", ")
        );
        let offset = LATEST_PREFIX.len();
        if status.is_empty() {
            return Err(SelectorSyntaxError::new(s, offset, 0, "missing status", &hint));
        }
        let rank = self.statuses.rank(status).ok_or_else(|| {
            SelectorSyntaxError::new(
                s,
                offset,
                status.len(),
                format!("unknown status '{status}'"),
                &hint,
            )
        })?;
        Ok(VersionSelector::Latest(LatestStatus {
            status: status.to_string(),
            rank,
            scheme: self.statuses.clone(),
        }))
    }

    fn parse_range(&self, s: &str) -> Result<VersionSelector, SelectorSyntaxError> {
        let lower_inclusive = match s.chars().next() {
            Some('[') => true,
            Some('(') | Some(']') => false,
            _ => {
                return Err(SelectorSyntaxError::new(
                    s,
                    0,
                    0,
                    "missing opening '[' or '('",
                    RANGE_HINT,
                ))
            }
        };
        let upper_inclusive = match s.chars().last() {
            Some(']') if s.len() > 1 => true,
            Some(')') | Some('[') if s.len() > 1 => false,
            _ => {
                return Err(SelectorSyntaxError::new(
                    s,
                    s.len(),
                    0,
                    "missing closing ']' or ')'",
                    RANGE_HINT,
                ))
            }
        };

        // Both delimiters are single ASCII bytes.
        let inner = &s[1..s.len() - 1];
        if let Some(pos) = inner.find('+') {
            return Err(SelectorSyntaxError::new(
                s,
                pos + 1,
                1,
                "'+' cannot be used inside a range",
                RANGE_HINT,
            ));
        }

        let mut commas = inner.match_indices(',').map(|(i, _)| i);
        let first_comma = commas.next();
        if let Some(second) = commas.next() {
            return Err(SelectorSyntaxError::new(
                s,
                second + 1,
                1,
                "union ranges are not supported",
                RANGE_HINT,
            ));
        }

        let Some(comma) = first_comma else {
            let version = self.parse_bound(s, inner, 1)?;
            return match version {
                Some(version) if lower_inclusive && upper_inclusive => {
                    Ok(VersionSelector::Range(VersionRange {
                        lower: Some(Bound {
                            version: version.clone(),
                            inclusive: true,
                        }),
                        upper: Some(Bound {
                            version,
                            inclusive: true,
                        }),
                        comparator: self.comparator,
                    }))
                }
                Some(_) => Err(SelectorSyntaxError::new(
                    s,
                    0,
                    s.len(),
                    "a single-version range must use inclusive brackets",
                    "write `[1.5]` to select exactly 1.5",
                )),
                None => Err(SelectorSyntaxError::new(
                    s,
                    0,
                    s.len(),
                    "empty range",
                    RANGE_HINT,
                )),
            };
        };

        let lower = self.parse_bound(s, &inner[..comma], 1)?;
        let upper = self.parse_bound(s, &inner[comma + 1..], comma + 2)?;

        if lower.is_none() && upper.is_none() {
            return Err(SelectorSyntaxError::new(
                s,
                0,
                s.len(),
                "a range needs at least one bound",
                RANGE_HINT,
            ));
        }

        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            let empty = match self.comparator.compare(lo, hi) {
                Ordering::Greater => true,
                Ordering::Equal => !(lower_inclusive && upper_inclusive),
                Ordering::Less => false,
            };
            if empty {
                return Err(SelectorSyntaxError::new(
                    s,
                    0,
                    s.len(),
                    format!("range from {lo} to {hi} contains no versions"),
                    "the lower bound must be below the upper bound",
                ));
            }
        }

        Ok(VersionSelector::Range(VersionRange {
            lower: lower.map(|version| Bound {
                version,
                inclusive: lower_inclusive,
            }),
            upper: upper.map(|version| Bound {
                version,
                inclusive: upper_inclusive,
            }),
            comparator: self.comparator,
        }))
    }

    /// Parse one bound; `offset` is where `raw` starts within `s`.
    fn parse_bound(
        &self,
        s: &str,
        raw: &str,
        offset: usize,
    ) -> Result<Option<ParsedVersion>, SelectorSyntaxError> {
        if let Some(pos) = raw.find(['[', ']', '(', ')']) {
            return Err(SelectorSyntaxError::new(
                s,
                offset + pos,
                1,
                "unexpected bracket inside a bound",
                RANGE_HINT,
            ));
        }
        let bound = raw.trim();
        if bound.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ParsedVersion::parse(bound)))
        }
    }
}

fn looks_like_range(s: &str) -> bool {
    s.starts_with(['[', '(', ']']) || s.ends_with([']', ')', '['])
}
