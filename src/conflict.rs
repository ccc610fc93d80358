//! Pairwise offering conflicts.
//!
//! Two offerings conflict iff some slot of one overlaps some slot of the
//! other on a shared weekday. Results are memoized in a [`ConflictCache`]
//! that lives for one generation request and is passed in explicitly, so
//! unrelated requests never share offering identities.
//!
//! # Algorithm
//! Both offerings' slots are projected onto the linear week axis
//! (`start + 1440 * weekday_index`), tagged with their owner, and sorted by
//! start. A sweep keeps the furthest end seen so far per owner; a range
//! that starts before the other owner's furthest end overlaps it.
//! O(S log S) per distinct pair, O(1) for every repeat lookup.

use std::collections::HashMap;

use crate::models::Offering;

/// Per-request memo of the conflict relation.
///
/// Keyed by unordered offering-id pair; `(a, b)` and `(b, a)` share one
/// entry.
#[derive(Debug, Clone, Default)]
pub struct ConflictCache {
    entries: HashMap<String, HashMap<String, bool>>,
    len: usize,
    hits: u64,
    misses: u64,
}

impl ConflictCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether offerings `a` and `b` conflict, computing on first use.
    pub fn conflicts(&mut self, a: &Offering, b: &Offering) -> bool {
        if let Some(hit) = self.get(&a.id, &b.id) {
            self.hits += 1;
            return hit;
        }
        self.misses += 1;
        let result = offerings_conflict(a, b);
        self.insert(&a.id, &b.id, result);
        result
    }

    /// Cached result for a pair, if already computed.
    pub fn get(&self, a: &str, b: &str) -> Option<bool> {
        let (lo, hi) = ordered(a, b);
        self.entries.get(lo).and_then(|m| m.get(hi)).copied()
    }

    fn insert(&mut self, a: &str, b: &str, result: bool) {
        let (lo, hi) = ordered(a, b);
        let previous = self
            .entries
            .entry(lo.to_string())
            .or_default()
            .insert(hi.to_string(), result);
        if previous.is_none() {
            self.len += 1;
        }
    }

    /// Number of distinct pairs compared.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Number of cached pairs marked as conflicting.
    pub fn conflict_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(HashMap::values)
            .filter(|c| **c)
            .count()
    }
}

fn ordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Uncached conflict test between two offerings.
///
/// Offerings with any TBD slot conflict with nothing.
pub fn offerings_conflict(a: &Offering, b: &Offering) -> bool {
    if a.has_tbd() || b.has_tbd() {
        return false;
    }

    let mut ranges: Vec<(i64, i64, usize)> = a
        .slots
        .iter()
        .flat_map(|s| s.linear_ranges())
        .map(|(s, e)| (s, e, 0))
        .chain(
            b.slots
                .iter()
                .flat_map(|s| s.linear_ranges())
                .map(|(s, e)| (s, e, 1)),
        )
        .collect();
    ranges.sort_unstable();

    let mut furthest_end = [i64::MIN; 2];
    for (start, end, owner) in ranges {
        if furthest_end[1 - owner] > start {
            return true;
        }
        furthest_end[owner] = furthest_end[owner].max(end);
    }
    false
}

/// Whether no two offerings in the set conflict.
pub fn is_conflict_free(offerings: &[&Offering], cache: &mut ConflictCache) -> bool {
    for i in 0..offerings.len() {
        for j in (i + 1)..offerings.len() {
            if cache.conflicts(offerings[i], offerings[j]) {
                return false;
            }
        }
    }
    true
}
