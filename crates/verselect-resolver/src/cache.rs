//! Parsed-version memoization for a single resolution thread.
//!
//! Sorting or repeatedly comparing the same candidate lists reparses the same
//! strings many times. The cache keeps each parsed form keyed by its raw
//! string. It holds no locks; give each worker its own.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use verselect_core::config::CacheConfig;

use crate::version::{ParsedVersion, VersionComparator};

#[derive(Debug, Default)]
pub struct ParsedVersionCache {
    entries: HashMap<String, Arc<ParsedVersion>>,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl ParsedVersionCache {
    /// A cache holding at most `max_entries` versions; `0` disables storage.
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries)
    }

    pub fn get_or_parse(&mut self, raw: &str) -> Arc<ParsedVersion> {
        if let Some(parsed) = self.entries.get(raw) {
            self.hits += 1;
            return Arc::clone(parsed);
        }
        self.misses += 1;
        let parsed = Arc::new(ParsedVersion::parse(raw));
        if self.max_entries == 0 {
            return parsed;
        }
        if self.entries.len() >= self.max_entries {
            tracing::trace!("Parsed-version cache full at {} entries, clearing", self.entries.len());
            self.entries.clear();
        }
        self.entries.insert(raw.to_string(), Arc::clone(&parsed));
        parsed
    }

    pub fn compare(&mut self, comparator: &VersionComparator, a: &str, b: &str) -> Ordering {
        let a = self.get_or_parse(a);
        let b = self.get_or_parse(b);
        comparator.compare(&a, &b)
    }

    /// Stable sort, newest first.
    pub fn sort_descending(&mut self, comparator: &VersionComparator, versions: &mut [String]) {
        versions.sort_by(|a, b| self.compare(comparator, b, a));
    }

    /// Stable sort, oldest first.
    pub fn sort_ascending(&mut self, comparator: &VersionComparator, versions: &mut [String]) {
        versions.sort_by(|a, b| self.compare(comparator, a, b));
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.entries.contains_key(raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memoizes_by_raw_string() {
        let mut cache = ParsedVersionCache::new(8);
        let first = cache.get_or_parse("1.0");
        let second = cache.get_or_parse("1.0");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert!(cache.contains("1.0"));
        assert!(!cache.contains("1.0.0"));
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let mut cache = ParsedVersionCache::new(0);
        cache.get_or_parse("1.0");
        cache.get_or_parse("1.0");
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn clears_when_full() {
        let mut cache = ParsedVersionCache::new(2);
        cache.get_or_parse("1.0");
        cache.get_or_parse("2.0");
        cache.get_or_parse("3.0");
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("3.0"));
    }

    #[test]
    fn sorts_with_comparator() {
        let mut cache = ParsedVersionCache::new(16);
        let cmp = VersionComparator::new();
        let mut versions: Vec<String> = ["1.10", "1.9", "1.0-rc1", "1.0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        cache.sort_descending(&cmp, &mut versions);
        assert_eq!(versions, ["1.10", "1.9", "1.0", "1.0-rc1"]);

        cache.sort_ascending(&cmp, &mut versions);
        assert_eq!(versions, ["1.0-rc1", "1.0", "1.9", "1.10"]);
        assert!(cache.hits() > 0);
    }
}
