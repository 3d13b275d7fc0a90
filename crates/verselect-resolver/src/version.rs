//! Version parsing and total-order comparison.
//!
//! Any string is a valid version. Parsing splits it into parts:
//! - Runs of ASCII digits become numeric parts and compare by value
//! - Runs of anything else become textual parts
//! - `.`, `-`, `_` and `+` separate parts and are discarded, as is every
//!   change between digits and non-digits
//!
//! Textual parts that name a known qualifier are ordered by a fixed table:
//! `dev` < `alpha` < `beta` < `milestone` < `rc` < `snapshot` < (release) < `sp`.
//! Unknown text sorts after every pre-release qualifier and before a release.

use std::cmp::Ordering;
use std::fmt;

use verselect_core::versioned::Versioned;

/// Characters that delimit parts without being part of them.
const SEPARATORS: [char; 4] = ['.', '-', '_', '+'];

/// Known qualifier spellings, matched case-insensitively.
const QUALIFIERS: &[(&str, Qualifier)] = &[
    ("dev", Qualifier::Dev),
    ("alpha", Qualifier::Alpha),
    ("a", Qualifier::Alpha),
    ("beta", Qualifier::Beta),
    ("b", Qualifier::Beta),
    ("milestone", Qualifier::Milestone),
    ("m", Qualifier::Milestone),
    ("rc", Qualifier::Rc),
    ("cr", Qualifier::Rc),
    ("snapshot", Qualifier::Snapshot),
    ("final", Qualifier::Release),
    ("release", Qualifier::Release),
    ("ga", Qualifier::Release),
    ("sp", Qualifier::Sp),
];

/// Well-known qualifiers, declared in ascending order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Qualifier {
    Dev,
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    /// `final`, `release` and `ga`: the same as no qualifier at all.
    Release,
    Sp,
}

impl Qualifier {
    /// Look up a textual token in the qualifier table.
    pub fn from_token(token: &str) -> Option<Self> {
        QUALIFIERS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, qualifier)| *qualifier)
    }

    pub fn is_pre_release(self) -> bool {
        self < Qualifier::Release
    }
}

/// A non-negative integer of any length, kept as its decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeric(String);

impl Numeric {
    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One part of a parsed version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionPart {
    Number(Numeric),
    Qualifier(Qualifier),
    Text(String),
}

impl VersionPart {
    /// Part equality as used for prefix matching: numbers by value, text
    /// case-insensitively.
    fn matches(&self, other: &VersionPart) -> bool {
        match (self, other) {
            (VersionPart::Text(a), VersionPart::Text(b)) => compare_text(a, b).is_eq(),
            _ => self == other,
        }
    }
}

/// A parsed version string with comparable parts.
///
/// Equality and ordering follow [`VersionComparator`], so `1.0` and `1.0.0`
/// are equal even though their [`parts`](Self::parts) differ.
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    original: String,
    parts: Vec<VersionPart>,
    significant: Vec<VersionPart>,
}

impl ParsedVersion {
    pub fn parse(version: &str) -> Self {
        let parts = split_parts(version);
        let significant = significant_parts(&parts);
        Self {
            original: version.to_string(),
            parts,
            significant,
        }
    }

    /// The raw string this version was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Every part in input order.
    pub fn parts(&self) -> &[VersionPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn is_snapshot(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, VersionPart::Qualifier(Qualifier::Snapshot)))
    }

    /// Whether any part marks this as something other than a plain release:
    /// a pre-release qualifier or unrecognised text.
    pub fn is_qualified(&self) -> bool {
        self.significant.iter().any(|p| match p {
            VersionPart::Qualifier(q) => q.is_pre_release(),
            VersionPart::Text(_) => true,
            VersionPart::Number(_) => false,
        })
    }

    /// Whether this version's parts begin with all of `prefix`'s parts.
    ///
    /// This is a part-wise check: `1.10` does not start with `1.1`.
    pub fn starts_with(&self, prefix: &ParsedVersion) -> bool {
        prefix.parts.len() <= self.parts.len()
            && prefix
                .parts
                .iter()
                .zip(&self.parts)
                .all(|(p, s)| p.matches(s))
    }
}

impl From<&str> for ParsedVersion {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}

impl Versioned for ParsedVersion {
    fn version(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParsedVersion {}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        VersionComparator.compare(self, other)
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The total order over parsed versions.
///
/// Stateless; construct one wherever ordering is needed and pass it along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionComparator;

impl VersionComparator {
    pub const fn new() -> Self {
        Self
    }

    pub fn compare(&self, a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
        let max_len = a.significant.len().max(b.significant.len());
        for i in 0..max_len {
            let ord = compare_parts(a.significant.get(i), b.significant.get(i));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    pub fn compare_str(&self, a: &str, b: &str) -> Ordering {
        self.compare(&ParsedVersion::parse(a), &ParsedVersion::parse(b))
    }

    pub fn compare_versioned<A, B>(&self, a: &A, b: &B) -> Ordering
    where
        A: Versioned + ?Sized,
        B: Versioned + ?Sized,
    {
        self.compare_str(a.version(), b.version())
    }

    /// Sort newest first. Each version is parsed once; items that compare
    /// equal keep their input order.
    pub fn sort_descending<T: Versioned>(&self, items: Vec<T>) -> Vec<T> {
        let mut keyed: Vec<(ParsedVersion, T)> = items
            .into_iter()
            .map(|item| (ParsedVersion::parse(item.version()), item))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| self.compare(b, a));
        keyed.into_iter().map(|(_, item)| item).collect()
    }

    /// The newest item; the first one wins among equals.
    pub fn max<'a, T, I>(&self, items: I) -> Option<&'a T>
    where
        T: Versioned + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut best: Option<(ParsedVersion, &'a T)> = None;
        for item in items {
            let parsed = ParsedVersion::parse(item.version());
            let newer = match &best {
                Some((current, _)) => self.compare(&parsed, current) == Ordering::Greater,
                None => true,
            };
            if newer {
                best = Some((parsed, item));
            }
        }
        best.map(|(_, item)| item)
    }
}

/// Ordering tier of the part at one position, lowest first. A missing part
/// sits with the release family.
fn tier(part: Option<&VersionPart>) -> u8 {
    match part {
        Some(VersionPart::Qualifier(q)) if q.is_pre_release() => 0,
        Some(VersionPart::Text(_)) => 1,
        None | Some(VersionPart::Qualifier(Qualifier::Release)) => 2,
        Some(VersionPart::Qualifier(_)) => 3,
        Some(VersionPart::Number(_)) => 4,
    }
}

fn compare_parts(a: Option<&VersionPart>, b: Option<&VersionPart>) -> Ordering {
    tier(a).cmp(&tier(b)).then_with(|| match (a, b) {
        (Some(VersionPart::Number(a)), Some(VersionPart::Number(b))) => a.cmp(b),
        (Some(VersionPart::Qualifier(a)), Some(VersionPart::Qualifier(b))) => a.cmp(b),
        (Some(VersionPart::Text(a)), Some(VersionPart::Text(b))) => compare_text(a, b),
        _ => Ordering::Equal,
    })
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn split_parts(version: &str) -> Vec<VersionPart> {
    let mut parts = Vec::new();
    let mut token_start: Option<usize> = None;
    let mut token_is_digit = false;

    for (i, ch) in version.char_indices() {
        if SEPARATORS.contains(&ch) {
            if let Some(start) = token_start.take() {
                parts.push(classify(&version[start..i], token_is_digit));
            }
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        match token_start {
            Some(start) if is_digit != token_is_digit => {
                parts.push(classify(&version[start..i], token_is_digit));
                token_start = Some(i);
            }
            Some(_) => {}
            None => token_start = Some(i),
        }
        token_is_digit = is_digit;
    }
    if let Some(start) = token_start {
        parts.push(classify(&version[start..], token_is_digit));
    }

    parts
}

fn classify(token: &str, numeric: bool) -> VersionPart {
    if numeric {
        return VersionPart::Number(Numeric::from_digits(token));
    }
    match Qualifier::from_token(token) {
        Some(q) => VersionPart::Qualifier(q),
        None => VersionPart::Text(token.to_string()),
    }
}

/// The parts that take part in ordering.
///
/// Release-family tokens mean "no qualifier" and are dropped. A zero is
/// dropped when it is trailing or directly followed by text, so `1.0`,
/// `1.0.0` and `1.0-ga` compare equal and `1.0-beta` sorts before `1.0`.
fn significant_parts(parts: &[VersionPart]) -> Vec<VersionPart> {
    let mut kept: Vec<VersionPart> = Vec::with_capacity(parts.len());
    // Right to left, so `kept.last()` is the part that follows.
    for part in parts.iter().rev() {
        match part {
            VersionPart::Qualifier(Qualifier::Release) => {}
            VersionPart::Number(n)
                if n.is_zero() && !matches!(kept.last(), Some(VersionPart::Number(_))) => {}
            _ => kept.push(part.clone()),
        }
    }
    kept.reverse();
    kept
}
