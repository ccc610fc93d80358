//! Schedule generation pipeline.
//!
//! # Algorithm
//!
//! 1. Validate the requested courses.
//! 2. Build components and alias groups.
//! 3. Encode the selection problem as CNF and ask the oracle. UNSAT ends
//!    the request with `"all-conflicting"`.
//! 4. Enumerate candidates: exhaustively when the cross product is within
//!    the threshold, otherwise by unique uniform sampling.
//! 5. Build day blocks and metrics for every conflict-free candidate.
//! 6. Rank the pool and keep the best `result_limit`.
//!
//! The conflict cache is created per call and shared by steps 3 and 4.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::builder::build_components;
use super::config::GeneratorConfig;
use super::enumerate::{cardinality, enumerate_valid, resolve, EnumerationMode};
use super::ranking::{rank_schedules, MetricRanks, ScheduleMetrics, ScoredSchedule};
use crate::conflict::ConflictCache;
use crate::error::Result;
use crate::models::{AliasMap, Component, CourseRecord, DayBlocks};
use crate::sat::{encode_cnf, SatOracle, SatOutcome, SplrOracle};
use crate::validation::validate_courses;

/// Why a request produced no schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyReason {
    /// No conflict-free schedule exists.
    #[serde(rename = "all-conflicting")]
    AllConflicting,
    /// The sample held no conflict-free schedule; the full space was not
    /// checked, so retrying may help.
    #[serde(rename = "sample-empty-retry")]
    SampleEmptyRetry,
}

impl EmptyReason {
    /// Reason code for presentation layers.
    pub fn code(self) -> &'static str {
        match self {
            EmptyReason::AllConflicting => "all-conflicting",
            EmptyReason::SampleEmptyRetry => "sample-empty-retry",
        }
    }

    /// Whether running again (with another sample) could succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, EmptyReason::SampleEmptyRetry)
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Overall outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum GenerationStatus {
    /// At least one schedule was ranked.
    Ranked,
    /// No schedules, with the reason.
    Empty(EmptyReason),
}

/// One chosen offering, as shown to the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSection {
    pub course_id: String,
    pub kind: String,
    pub offering_id: String,
    pub section: String,
}

/// A ranked schedule in the result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSchedule {
    /// 1-based position in the result set.
    pub position: usize,
    /// Offering ids in component order.
    pub offering_ids: Vec<String>,
    /// Chosen sections in component order.
    pub sections: Vec<SelectedSection>,
    /// Merged day blocks.
    pub blocks: DayBlocks,
    pub metrics: ScheduleMetrics,
    pub ranks: MetricRanks,
    /// Weighted rank sum used for ordering.
    pub combined_rank: f64,
    /// Normalised 0–5 score.
    pub score: f64,
}

impl RankedSchedule {
    fn from_scored(position: usize, scored: ScoredSchedule, components: &[Component]) -> Self {
        let sections: Vec<SelectedSection> = components
            .iter()
            .zip(resolve(components, &scored.picks))
            .map(|(c, o)| SelectedSection {
                course_id: c.course_id.clone(),
                kind: c.kind.clone(),
                offering_id: o.id.clone(),
                section: o.section.clone(),
            })
            .collect();
        Self {
            position,
            offering_ids: sections.iter().map(|s| s.offering_id.clone()).collect(),
            sections,
            blocks: scored.blocks,
            metrics: scored.metrics,
            ranks: scored.ranks,
            combined_rank: scored.combined_rank,
            score: scored.score,
        }
    }
}

/// Counters describing one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Number of search components.
    pub component_count: usize,
    /// Offerings hidden as aliases.
    pub alias_count: usize,
    /// CNF variables.
    pub variable_count: usize,
    /// CNF clauses.
    pub clause_count: usize,
    /// Cross-product size (saturating).
    pub cardinality: u128,
    /// Enumeration mode, if enumeration ran.
    pub mode: Option<EnumerationMode>,
    /// Candidates checked for conflicts.
    pub examined: usize,
    /// Conflict-free candidates found.
    pub valid: usize,
    /// Distinct offering pairs compared.
    pub compared_pairs: usize,
    /// Compared pairs that conflict.
    pub conflicting_pairs: usize,
}

/// Result of one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub status: GenerationStatus,
    /// Best schedules first, at most `result_limit`.
    pub schedules: Vec<RankedSchedule>,
    /// Representative id → schedule-identical siblings.
    pub aliases: AliasMap,
    pub stats: GenerationStats,
}

impl GenerationReport {
    fn empty(reason: EmptyReason, aliases: AliasMap, stats: GenerationStats) -> Self {
        Self {
            status: GenerationStatus::Empty(reason),
            schedules: Vec::new(),
            aliases,
            stats,
        }
    }

    /// Empty-result reason, if any.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self.status {
            GenerationStatus::Empty(reason) => Some(reason),
            GenerationStatus::Ranked => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// Generates and ranks conflict-free schedules.
///
/// # Example
///
/// ```
/// use u_timetable::models::{ComponentOfferings, CourseRecord, Days, Offering, TimeSlot};
/// use u_timetable::scheduler::{GeneratorConfig, ScheduleGenerator};
///
/// let mwf: Days = "MWF".parse().unwrap();
/// let lec = |id: &str, section: &str, start: i32| {
///     Offering::new(id, "LEC", section).with_slot(TimeSlot::new(mwf, start, start + 50))
/// };
/// let courses = vec![CourseRecord::new("MATH 117").with_component(
///     ComponentOfferings::new("LEC")
///         .with_offering(lec("1", "A1", 600))
///         .with_offering(lec("2", "A2", 720)),
/// )];
///
/// let generator = ScheduleGenerator::new(GeneratorConfig::default());
/// let report = generator.generate(&courses).unwrap();
/// assert_eq!(report.schedules.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleGenerator<O = SplrOracle> {
    config: GeneratorConfig,
    oracle: O,
}

impl ScheduleGenerator<SplrOracle> {
    /// Creates a generator backed by the `splr` oracle.
    pub fn new(config: GeneratorConfig) -> Self {
        let oracle = SplrOracle::new(config.solver_budget());
        Self { config, oracle }
    }
}

impl<O: SatOracle> ScheduleGenerator<O> {
    /// Creates a generator with a custom oracle.
    pub fn with_oracle(config: GeneratorConfig, oracle: O) -> Self {
        Self { config, oracle }
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates ranked schedules for the requested courses.
    ///
    /// # Errors
    /// - [`GenerateError::InvalidInput`](crate::GenerateError::InvalidInput)
    ///   for malformed requests.
    /// - [`GenerateError::SolverUnavailable`](crate::GenerateError::SolverUnavailable)
    ///   when the oracle fails.
    pub fn generate(&self, courses: &[CourseRecord]) -> Result<GenerationReport> {
        validate_courses(courses)?;

        let (components, aliases) = build_components(courses);
        let mut stats = GenerationStats {
            component_count: components.len(),
            alias_count: aliases.alias_count(),
            ..Default::default()
        };
        debug!(
            "{} components, {} aliased offerings",
            stats.component_count, stats.alias_count
        );

        let mut cache = ConflictCache::new();
        let cnf = encode_cnf(&components, &mut cache);
        stats.variable_count = cnf.variable_count;
        stats.clause_count = cnf.clauses.len();
        debug!(
            "CNF: {} vars, {} coverage / {} exclusion / {} conflict clauses",
            cnf.variable_count, cnf.coverage_count, cnf.exclusion_count, cnf.conflict_count
        );

        match self.oracle.solve(&cnf.clauses)? {
            SatOutcome::Unsatisfiable => {
                warn!("{}: no conflict-free schedule exists", self.oracle.name());
                record_cache(&mut stats, &cache);
                return Ok(GenerationReport::empty(
                    EmptyReason::AllConflicting,
                    aliases,
                    stats,
                ));
            }
            SatOutcome::Satisfiable(model) => {
                debug!("witness schedule: {:?}", cnf.decode_model(&model));
            }
        }

        stats.cardinality = cardinality(&components);
        info!("Cross product cardinality: {}", stats.cardinality);

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let enumeration = enumerate_valid(
            &components,
            self.config.exhaustive_threshold,
            self.config.sample_size,
            &mut rng,
            &mut cache,
        );
        stats.mode = Some(enumeration.mode);
        stats.examined = enumeration.examined;
        stats.valid = enumeration.valid.len();
        record_cache(&mut stats, &cache);
        let (hits, misses) = cache.stats();
        debug!(
            "{:?}: {} examined, {} valid; conflict cache {} pairs ({} hits, {} misses)",
            enumeration.mode, stats.examined, stats.valid, stats.compared_pairs, hits, misses
        );

        if enumeration.valid.is_empty() {
            let reason = match enumeration.mode {
                EnumerationMode::Sampling => EmptyReason::SampleEmptyRetry,
                EnumerationMode::Exhaustive => EmptyReason::AllConflicting,
            };
            warn!("no conflict-free schedule found ({reason})");
            return Ok(GenerationReport::empty(reason, aliases, stats));
        }

        let prefs = &self.config.preferences;
        let pool: Vec<ScoredSchedule> = enumeration
            .valid
            .into_iter()
            .map(|picks| {
                let blocks = DayBlocks::build(resolve(&components, &picks));
                ScoredSchedule::new(picks, blocks, prefs)
            })
            .collect();

        let schedules: Vec<RankedSchedule> = rank_schedules(pool, prefs)
            .into_iter()
            .enumerate()
            .map(|(i, s)| RankedSchedule::from_scored(i + 1, s, &components))
            .collect();
        info!("ranked {} of {} valid schedules", schedules.len(), stats.valid);

        Ok(GenerationReport {
            status: GenerationStatus::Ranked,
            schedules,
            aliases,
            stats,
        })
    }
}

fn record_cache(stats: &mut GenerationStats, cache: &ConflictCache) {
    stats.compared_pairs = cache.len();
    stats.conflicting_pairs = cache.conflict_count();
}
