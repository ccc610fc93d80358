//! Timetable domain models.
//!
//! Provides the core data types for describing requested courses and the
//! schedules built from them.
//!
//! # Domain Mappings
//!
//! | u-timetable | Registrar term | Example |
//! |-------------|----------------|---------|
//! | CourseRecord | Course | CMPUT 174 |
//! | Component | Course component | CMPUT 174 LAB |
//! | Offering | Class section | LAB D26 (45438) |
//! | TimeSlot | Meeting pattern | R 17:00–19:50 |
//! | DayBlocks | Day at a glance | Mon 10:00–11:40 |

mod blocks;
mod component;
mod offering;
mod time;

pub use blocks::{Block, DayBlocks};
pub use component::{AliasEntry, AliasMap, Component};
pub use offering::{ComponentOfferings, CourseRecord, Offering};
pub use time::{
    bridges, Days, ParseDaysError, TimeSlot, Weekday, MERGE_GAP_MINUTES, MINUTES_PER_DAY,
    TBD_START,
};
