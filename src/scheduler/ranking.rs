//! Schedule quality metrics and rank-based ordering.
//!
//! Each conflict-free schedule is scored on four independent metrics
//! computed from its day blocks. All metrics are "lower is better".
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Gap error | Σ blocks: `(ideal − len)²` if `len ≤ ideal`, else `(len − ideal)³` |
//! | Start error | mean over days: `(ideal − first)³` if early, else `(first − ideal)²` |
//! | Time variance | `1.5 · Var(first starts) + Var(last ends)` |
//! | Time wasted | Σ days: commute + (span − occupied minutes) |
//!
//! # Ranking
//! Ranks are relative to the whole pool, so scoring is two-pass: compute
//! every schedule's metrics first, then rank. For each metric the worst
//! schedule gets rank 1 and the best rank N. The weighted rank sum orders
//! the pool, highest first.

use serde::{Deserialize, Serialize};

use super::config::{MetricWeights, Preferences};
use crate::models::DayBlocks;

/// Raw metric values of one schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Penalty for blocks away from the ideal length.
    pub gap_error: f64,
    /// Penalty for days starting away from the ideal start.
    pub start_error: f64,
    /// Day-to-day inconsistency of start and end times.
    pub time_variance: f64,
    /// Idle on-campus time plus commute (minutes).
    pub time_wasted: f64,
}

impl ScheduleMetrics {
    /// Computes all four metrics from a day-block map.
    pub fn calculate(blocks: &DayBlocks, prefs: &Preferences) -> Self {
        Self {
            gap_error: gap_error(blocks, prefs.ideal_block_minutes),
            start_error: start_error(blocks, prefs.ideal_start_minute),
            time_variance: time_variance(blocks),
            time_wasted: time_wasted(blocks, prefs.round_trip_commute_minutes),
        }
    }
}

fn gap_error(blocks: &DayBlocks, ideal: f64) -> f64 {
    blocks
        .iter()
        .flat_map(|(_, day)| day.iter())
        .map(|b| {
            let len = b.length() as f64;
            if len <= ideal {
                (ideal - len).powi(2)
            } else {
                // Marathon blocks hurt far more than short ones.
                (len - ideal).powi(3)
            }
        })
        .sum()
}

fn start_error(blocks: &DayBlocks, ideal_start: i32) -> f64 {
    let starts = blocks.first_starts();
    if starts.is_empty() {
        return 0.0;
    }
    let total: f64 = starts
        .iter()
        .map(|&first| {
            let delta = (first - ideal_start) as f64;
            if delta < 0.0 {
                (-delta).powi(3)
            } else {
                delta.powi(2)
            }
        })
        .sum();
    total / starts.len() as f64
}

fn time_variance(blocks: &DayBlocks) -> f64 {
    1.5 * variance(&blocks.first_starts()) + variance(&blocks.last_ends())
}

fn time_wasted(blocks: &DayBlocks, commute: f64) -> f64 {
    blocks
        .iter()
        .map(|(_, day)| match (day.first(), day.last()) {
            (Some(first), Some(last)) => {
                let occupied: i32 = day.iter().map(|b| b.length()).sum();
                commute + (last.end - first.start - occupied) as f64
            }
            _ => 0.0,
        })
        .sum()
}

/// Population variance. Zero for an empty sample.
fn variance(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n
}

/// Pool-relative rank per metric (1 = worst, N = best).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRanks {
    pub gap_error: usize,
    pub start_error: usize,
    pub time_variance: usize,
    pub time_wasted: usize,
}

impl MetricRanks {
    /// Weighted rank sum.
    pub fn combined(&self, weights: &MetricWeights) -> f64 {
        weights.gap_error * self.gap_error as f64
            + weights.start_error * self.start_error as f64
            + weights.time_variance * self.time_variance as f64
            + weights.time_wasted * self.time_wasted as f64
    }
}

/// A conflict-free schedule with its metrics and ranks.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSchedule {
    /// Offering position per component.
    pub picks: Vec<usize>,
    /// Merged day blocks.
    pub blocks: DayBlocks,
    /// Raw metric values.
    pub metrics: ScheduleMetrics,
    /// Per-metric ranks (0 until ranked).
    pub ranks: MetricRanks,
    /// Weighted rank sum (higher = better).
    pub combined_rank: f64,
    /// Combined rank normalised to 0–5, two decimals.
    pub score: f64,
}

impl ScoredSchedule {
    /// Computes metrics for a schedule. Ranks are filled in by
    /// [`rank_schedules`].
    pub fn new(picks: Vec<usize>, blocks: DayBlocks, prefs: &Preferences) -> Self {
        let metrics = ScheduleMetrics::calculate(&blocks, prefs);
        Self {
            picks,
            blocks,
            metrics,
            ranks: MetricRanks::default(),
            combined_rank: 0.0,
            score: 0.0,
        }
    }
}

/// Ranks the pool and returns the best `prefs.result_limit` schedules,
/// best first.
///
/// Ties keep pool order, so identical input yields identical output.
pub fn rank_schedules(mut pool: Vec<ScoredSchedule>, prefs: &Preferences) -> Vec<ScoredSchedule> {
    let n = pool.len();
    if n == 0 {
        return pool;
    }

    assign_ranks(&mut pool, |m| m.gap_error, |r, v| r.gap_error = v);
    assign_ranks(&mut pool, |m| m.start_error, |r, v| r.start_error = v);
    assign_ranks(&mut pool, |m| m.time_variance, |r, v| r.time_variance = v);
    assign_ranks(&mut pool, |m| m.time_wasted, |r, v| r.time_wasted = v);

    let weights = &prefs.weights;
    let scale = n as f64 * weights.total();
    for s in &mut pool {
        s.combined_rank = s.ranks.combined(weights);
        s.score = if scale > 0.0 {
            (s.combined_rank / scale * 5.0 * 100.0).round() / 100.0
        } else {
            0.0
        };
    }

    pool.sort_by(|a, b| b.combined_rank.total_cmp(&a.combined_rank));
    pool.truncate(prefs.result_limit);
    pool
}

/// Orders the pool worst-first on one metric and writes 1-based ranks.
fn assign_ranks<K, W>(pool: &mut [ScoredSchedule], key: K, mut write: W)
where
    K: Fn(&ScheduleMetrics) -> f64,
    W: FnMut(&mut MetricRanks, usize),
{
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.sort_by(|&a, &b| key(&pool[b].metrics).total_cmp(&key(&pool[a].metrics)));
    for (pos, idx) in order.into_iter().enumerate() {
        write(&mut pool[idx].ranks, pos + 1);
    }
}
