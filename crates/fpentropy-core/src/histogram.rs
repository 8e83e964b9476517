//! Resolution histogram: resolution string → number of observations.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Observation counts keyed by resolution string.
///
/// Keys are unique and iterate in sorted order so that every stage downstream
/// (utilization averaging, report output) is reproducible run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    bins: BTreeMap<String, u64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for `value`, replacing any previous count.
    pub fn insert(&mut self, value: impl Into<String>, count: u64) -> Option<u64> {
        self.bins.insert(value.into(), count)
    }

    /// Add `count` observations of `value`, summing on collision.
    ///
    /// Saturates at `u64::MAX`. A histogram whose [`checked_total`] fits in
    /// a `u64` never saturates when its bins are merged.
    ///
    /// [`checked_total`]: Histogram::checked_total
    pub fn add(&mut self, value: impl Into<String>, count: u64) {
        let bin = self.bins.entry(value.into()).or_insert(0);
        *bin = bin.saturating_add(count);
    }

    pub fn get(&self, value: &str) -> Option<u64> {
        self.bins.get(value).copied()
    }

    /// Number of distinct values (bins).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total number of observations across all bins, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    /// Total number of observations, or `None` if it overflows a `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.bins.values().try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, u64> {
        self.bins.iter()
    }

    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.bins.values().copied()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut hist = Histogram::new();
        for (value, count) in iter {
            hist.insert(value, count);
        }
        hist
    }
}

impl<'a> IntoIterator for &'a Histogram {
    type Item = (&'a String, &'a u64);
    type IntoIter = btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}

impl IntoIterator for Histogram {
    type Item = (String, u64);
    type IntoIter = btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sums_collisions() {
        let mut h = Histogram::new();
        h.add("1000x600x24", 3);
        h.add("1000x600x24", 4);
        h.add("800x400x24", 1);
        assert_eq!(h.get("1000x600x24"), Some(7));
        assert_eq!(h.len(), 2);
        assert_eq!(h.total(), 8);
    }

    #[test]
    fn insert_replaces() {
        let mut h = Histogram::new();
        h.insert("1024x768x24", 5);
        assert_eq!(h.insert("1024x768x24", 2), Some(5));
        assert_eq!(h.get("1024x768x24"), Some(2));
    }

    #[test]
    fn empty_histogram_has_zero_total() {
        let h = Histogram::new();
        assert!(h.is_empty());
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn huge_counts_do_not_wrap() {
        let mut h: Histogram = [("1920x1080x24", u64::MAX), ("800x600x24", 5)]
            .into_iter()
            .collect();
        assert_eq!(h.checked_total(), None);
        assert_eq!(h.total(), u64::MAX);

        h.add("1920x1080x24", 1);
        assert_eq!(h.get("1920x1080x24"), Some(u64::MAX));

        let small: Histogram = [("a", 2u64), ("b", 3)].into_iter().collect();
        assert_eq!(small.checked_total(), Some(5));
    }

    #[test]
    fn serializes_as_plain_map() {
        let h: Histogram = [("800x600x24", 2u64)].into_iter().collect();
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"800x600x24":2}"#);
    }
}
