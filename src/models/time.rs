//! Weekly time model.
//!
//! A [`TimeSlot`] is a recurring weekly interval: a set of weekdays plus a
//! start/end minute-of-day. Slots on different weekdays are compared by
//! projecting them onto a single linear week axis, where weekday `d`
//! occupies minutes `[1440 * d, 1440 * (d + 1))`.
//!
//! # Time Representation
//! All times are integer minutes since midnight. Intervals are half-open:
//! `[start, end)`. A slot whose start equals [`TBD_START`] has no known
//! time (to-be-determined sections).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minutes in one day (width of one weekday on the linear axis).
pub const MINUTES_PER_DAY: i32 = 1440;

/// Start-minute sentinel for slots with unknown timing.
pub const TBD_START: i32 = i32::MAX;

/// Largest gap (minutes) between two intervals that still counts as one
/// continuous block. Not worth leaving campus for.
pub const MERGE_GAP_MINUTES: i32 = 15;

/// Whether an interval ending at `end` and one starting at `next_start`
/// join into a single block.
#[inline]
pub fn bridges(end: i32, next_start: i32) -> bool {
    next_start - end <= MERGE_GAP_MINUTES
}

/// Day of the week.
///
/// Codes follow the registrar convention: `M T W R F S U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in week order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based position in the week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter code.
    pub fn code(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
            Weekday::Saturday => 'S',
            Weekday::Sunday => 'U',
        }
    }

    /// Parses a single-letter code.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            'S' => Some(Weekday::Saturday),
            'U' => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Offset of this weekday on the linear week axis (minutes).
    #[inline]
    pub fn axis_offset(self) -> i64 {
        MINUTES_PER_DAY as i64 * self.index() as i64
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a weekday string contains an unknown code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weekday code '{code}' in \"{input}\"")]
pub struct ParseDaysError {
    /// The offending character.
    pub code: char,
    /// The full input string.
    pub input: String,
}

/// A set of weekdays, stored as a 7-bit mask.
///
/// Serializes as a code string in week order, e.g. `"MWF"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Days(u8);

impl Days {
    /// The empty set.
    pub const fn empty() -> Self {
        Days(0)
    }

    /// Builds a set from weekdays.
    pub fn of(days: &[Weekday]) -> Self {
        days.iter().fold(Days::empty(), |acc, &d| acc.with(d))
    }

    /// Returns a copy with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        Days(self.0 | (1 << day.index()))
    }

    /// Whether `day` is in the set.
    #[inline]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    /// Days present in both sets.
    #[inline]
    pub fn intersection(self, other: Days) -> Days {
        Days(self.0 & other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the weekdays in week order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromStr for Days {
    type Err = ParseDaysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut days = Days::empty();
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let day = Weekday::from_code(c).ok_or_else(|| ParseDaysError {
                code: c,
                input: s.to_string(),
            })?;
            days = days.with(day);
        }
        Ok(days)
    }
}

impl TryFrom<String> for Days {
    type Error = ParseDaysError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Days> for String {
    fn from(days: Days) -> Self {
        days.to_string()
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            write!(f, "{}", day.code())?;
        }
        Ok(())
    }
}

/// A weekly recurring time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Weekdays on which the slot recurs.
    pub days: Days,
    /// Start minute-of-day (inclusive), or [`TBD_START`].
    pub start: i32,
    /// End minute-of-day (exclusive).
    pub end: i32,
    /// Room or building. Opaque to the engine.
    #[serde(default)]
    pub location: Option<String>,
}

impl TimeSlot {
    /// Creates a slot without a location.
    pub fn new(days: Days, start: i32, end: i32) -> Self {
        Self {
            days,
            start,
            end,
            location: None,
        }
    }

    /// Creates a slot with unknown timing.
    pub fn tbd() -> Self {
        Self::new(Days::empty(), TBD_START, TBD_START)
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Whether the slot has no known time.
    #[inline]
    pub fn is_tbd(&self) -> bool {
        self.start == TBD_START
    }

    /// Duration of one occurrence (minutes). Zero for TBD slots.
    pub fn duration(&self) -> i32 {
        if self.is_tbd() {
            0
        } else {
            self.end - self.start
        }
    }

    /// Whether two slots overlap on any shared weekday.
    ///
    /// TBD slots overlap nothing.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_tbd() || other.is_tbd() {
            return false;
        }
        !self.days.intersection(other.days).is_empty()
            && self.start < other.end
            && other.start < self.end
    }

    /// Projects the slot onto the linear week axis: one `[start, end)`
    /// range per weekday, offset by `1440 * weekday_index`.
    ///
    /// TBD slots project to nothing.
    pub fn linear_ranges(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let days = if self.is_tbd() { Days::empty() } else { self.days };
        days.iter().map(move |d| {
            let offset = d.axis_offset();
            (offset + self.start as i64, offset + self.end as i64)
        })
    }

    /// Time signature `(days, start, end)` used for alias detection.
    #[inline]
    pub fn signature(&self) -> (Days, i32, i32) {
        (self.days, self.start, self.end)
    }
}
