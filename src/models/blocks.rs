//! Day-block model.
//!
//! Converts a schedule's offerings into, per weekday, the list of merged
//! contiguous occupied intervals ("blocks"). Intervals separated by at
//! most [`MERGE_GAP_MINUTES`](super::MERGE_GAP_MINUTES) merge into one block.
//!
//! Offerings with any TBD slot are left out entirely.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{bridges, Offering, Weekday};

/// A merged occupied interval on one weekday, `[start, end)` in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub start: i32,
    pub end: i32,
}

impl Block {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Block length (minutes).
    #[inline]
    pub fn length(&self) -> i32 {
        self.end - self.start
    }
}

/// Weekday → ordered, non-overlapping blocks.
///
/// Only weekdays with at least one timed slot have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayBlocks {
    days: BTreeMap<Weekday, Vec<Block>>,
}

impl DayBlocks {
    /// Builds the day-block map for a set of offerings.
    ///
    /// # Algorithm
    /// 1. Drop offerings containing a TBD slot.
    /// 2. Collect `(start, end)` per weekday across all remaining slots.
    /// 3. Sort each day by start and merge neighbours whose gap is within
    ///    the bridge limit, re-checking the same position after a merge so
    ///    chains collapse fully.
    pub fn build<'a, I>(offerings: I) -> Self
    where
        I: IntoIterator<Item = &'a Offering>,
    {
        let mut days: BTreeMap<Weekday, Vec<Block>> = BTreeMap::new();
        for offering in offerings.into_iter().filter(|o| !o.has_tbd()) {
            for slot in &offering.slots {
                for day in slot.days.iter() {
                    days.entry(day)
                        .or_default()
                        .push(Block::new(slot.start, slot.end));
                }
            }
        }

        for blocks in days.values_mut() {
            merge_blocks(blocks);
        }

        Self { days }
    }

    /// Blocks on a weekday (empty if none).
    pub fn blocks_on(&self, day: Weekday) -> &[Block] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates `(weekday, blocks)` in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Block])> {
        self.days.iter().map(|(d, b)| (*d, b.as_slice()))
    }

    /// Number of weekdays attended.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Start of the first block on each attended day, in week order.
    pub fn first_starts(&self) -> Vec<i32> {
        self.days
            .values()
            .filter_map(|b| b.first().map(|x| x.start))
            .collect()
    }

    /// End of the last block on each attended day, in week order.
    pub fn last_ends(&self) -> Vec<i32> {
        self.days
            .values()
            .filter_map(|b| b.last().map(|x| x.end))
            .collect()
    }
}

/// Sorts and merges one day's intervals in place.
fn merge_blocks(blocks: &mut Vec<Block>) {
    blocks.sort_by_key(|b| (b.start, b.end));
    let mut i = 0;
    while i + 1 < blocks.len() {
        if bridges(blocks[i].end, blocks[i + 1].start) {
            let next = blocks.remove(i + 1);
            blocks[i].end = blocks[i].end.max(next.end);
        } else {
            i += 1;
        }
    }
}
