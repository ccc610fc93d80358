//! Schedule generation and ranking.
//!
//! [`ScheduleGenerator`] turns requested courses into a ranked list of
//! conflict-free weekly schedules.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Build | `builder` | components + alias map |
//! | Feasibility | [`crate::sat`] | SAT / UNSAT |
//! | Enumerate | `enumerate` | conflict-free picks |
//! | Rank | `ranking` | metrics, ranks, scores |
//!
//! # Modes
//!
//! Up to [`GeneratorConfig::exhaustive_threshold`] combinations the whole
//! cross product is checked. Beyond it, `sample_size` unique combinations
//! are drawn uniformly, so an empty result is only a hint
//! (`"sample-empty-retry"`), not a proof.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Knuth (2011), TAOCP Vol. 4A, §7.2.1.1 (mixed-radix generation)

mod builder;
mod config;
mod enumerate;
mod generator;
mod ranking;

pub use builder::build_components;
pub use config::{GeneratorConfig, MetricWeights, Preferences, DEFAULT_EXHAUST_THRESHOLD};
pub use enumerate::{
    cardinality, decode_index, enumerate_valid, resolve, sample_indices, Enumeration,
    EnumerationMode,
};
pub use generator::{
    EmptyReason, GenerationReport, GenerationStats, GenerationStatus, RankedSchedule,
    ScheduleGenerator, SelectedSection,
};
pub use ranking::{rank_schedules, MetricRanks, ScheduleMetrics, ScoredSchedule};
