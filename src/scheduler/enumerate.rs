//! Candidate enumeration.
//!
//! The cross product of all components is the search space. Small spaces
//! are walked exhaustively; large ones are sampled without replacement by
//! drawing unique flat indices and decoding each one in mixed radix.
//!
//! # Mixed-Radix Decoding
//! With component sizes `[s0, s1, …, sk]`, flat index `n` maps to the tuple
//! whose last position varies fastest, so walking `0..cardinality` visits
//! the cross product in lexicographic order.

use std::collections::HashSet;

use log::debug;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::conflict::{is_conflict_free, ConflictCache};
use crate::models::{Component, Offering};

/// How the candidate pool was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumerationMode {
    /// Every combination was checked.
    Exhaustive,
    /// A bounded uniform sample of unique combinations was checked.
    Sampling,
}

/// Size of the cross product of all components.
///
/// Saturates at `u128::MAX`.
pub fn cardinality(components: &[Component]) -> u128 {
    components
        .iter()
        .fold(1u128, |acc, c| acc.saturating_mul(c.len() as u128))
}

/// Decodes a flat index into one position per component.
///
/// `flat` must be below the product of `sizes`, and no size may be zero.
pub fn decode_index(mut flat: u128, sizes: &[usize]) -> Vec<usize> {
    let mut picks = vec![0; sizes.len()];
    for (pick, &size) in picks.iter_mut().zip(sizes).rev() {
        let radix = size as u128;
        *pick = (flat % radix) as usize;
        flat /= radix;
    }
    picks
}

/// Draws `amount` unique indices from `[0, cardinality)`, ascending.
///
/// `amount` is clamped to `cardinality`.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, cardinality: u128, amount: usize) -> Vec<u128> {
    let amount = (amount as u128).min(cardinality) as usize;
    let mut drawn: Vec<u128> = match usize::try_from(cardinality) {
        Ok(length) => index::sample(rng, length, amount)
            .into_iter()
            .map(|i| i as u128)
            .collect(),
        Err(_) => {
            // Space dwarfs the sample; rejection almost never triggers.
            let mut seen = HashSet::with_capacity(amount);
            while seen.len() < amount {
                seen.insert(rng.random_range(0..cardinality));
            }
            seen.into_iter().collect()
        }
    };
    drawn.sort_unstable();
    drawn
}

/// Resolves picks into offerings, one per component.
pub fn resolve<'a>(components: &'a [Component], picks: &[usize]) -> Vec<&'a Offering> {
    components
        .iter()
        .zip(picks)
        .map(|(c, &i)| &c.offerings[i])
        .collect()
}

/// Outcome of one enumeration pass.
#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Mode used.
    pub mode: EnumerationMode,
    /// Conflict-free candidates, as picks per component, in index order.
    pub valid: Vec<Vec<usize>>,
    /// Number of candidates examined.
    pub examined: usize,
}

/// Enumerates conflict-free candidates.
///
/// Walks the full cross product when `cardinality <= threshold`, otherwise
/// checks `sample_size` unique sampled combinations.
pub fn enumerate_valid<R: Rng + ?Sized>(
    components: &[Component],
    threshold: u64,
    sample_size: usize,
    rng: &mut R,
    cache: &mut ConflictCache,
) -> Enumeration {
    let sizes: Vec<usize> = components.iter().map(Component::len).collect();
    let total = cardinality(components);

    let (mode, indices): (EnumerationMode, Box<dyn Iterator<Item = u128>>) =
        if total <= threshold as u128 {
            (EnumerationMode::Exhaustive, Box::new(0..total))
        } else {
            let drawn = sample_indices(rng, total, sample_size);
            debug!("sampled {} of {} combinations", drawn.len(), total);
            (EnumerationMode::Sampling, Box::new(drawn.into_iter()))
        };

    let mut valid = Vec::new();
    let mut examined = 0;
    for flat in indices {
        examined += 1;
        let picks = decode_index(flat, &sizes);
        if is_conflict_free(&resolve(components, &picks), cache) {
            valid.push(picks);
        }
    }

    Enumeration {
        mode,
        valid,
        examined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Days, TimeSlot};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn component(course: &str, slots: &[(&str, i32, i32)]) -> Component {
        let mut c = Component::new(course, "LEC");
        for (i, (days, start, end)) in slots.iter().enumerate() {
            c.offerings.push(
                Offering::new(format!("{course}-{i}"), "LEC", format!("A{i}"))
                    .with_slot(TimeSlot::new(days.parse::<Days>().unwrap(), *start, *end)),
            );
        }
        c
    }

    fn sized(course: &str, n: usize) -> Component {
        let mut c = Component::new(course, "LEC");
        for i in 0..n {
            c.offerings.push(Offering::new(format!("{course}-{i}"), "LEC", format!("A{i}")));
        }
        c
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(cardinality(&[sized("A", 3), sized("B", 4), sized("C", 5)]), 60);
        assert_eq!(cardinality(&[]), 1);
    }

    #[test]
    fn test_cardinality_saturates() {
        let many: Vec<_> = (0..40).map(|i| sized(&format!("C{i}"), 1000)).collect();
        assert_eq!(cardinality(&many), u128::MAX);
    }

    #[test]
    fn test_decode_index_mixed_radix() {
        let sizes = [2, 3, 4];
        assert_eq!(decode_index(0, &sizes), vec![0, 0, 0]);
        assert_eq!(decode_index(1, &sizes), vec![0, 0, 1]);
        assert_eq!(decode_index(4, &sizes), vec![0, 1, 0]);
        assert_eq!(decode_index(12, &sizes), vec![1, 0, 0]);
        assert_eq!(decode_index(23, &sizes), vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_index_is_bijective() {
        let sizes = [3, 1, 4, 2];
        let decoded: HashSet<Vec<usize>> = (0..24u128).map(|n| decode_index(n, &sizes)).collect();
        assert_eq!(decoded.len(), 24);
        for picks in &decoded {
            for (p, s) in picks.iter().zip(&sizes) {
                assert!(p < s);
            }
        }
    }

    #[test]
    fn test_sample_indices_unique_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = sample_indices(&mut rng, 1_000, 300);
        assert_eq!(drawn.len(), 300);
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), 300);
        assert!(drawn.iter().all(|&i| i < 1_000));
        assert!(drawn.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sample_indices_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = sample_indices(&mut rng, 10, 50);
        assert_eq!(drawn, (0..10).collect::<Vec<u128>>());
    }

    #[test]
    fn test_sample_indices_huge_space() {
        let mut rng = StdRng::seed_from_u64(11);
        let space = u64::MAX as u128 * 1_000;
        let drawn = sample_indices(&mut rng, space, 100);
        assert_eq!(drawn.len(), 100);
        assert!(drawn.iter().all(|&i| i < space));
    }

    #[test]
    fn test_sample_indices_seeded_is_deterministic() {
        let a = sample_indices(&mut StdRng::seed_from_u64(3), 50_000, 20);
        let b = sample_indices(&mut StdRng::seed_from_u64(3), 50_000, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_exhaustive_matches_brute_force() {
        let components = vec![
            component("A", &[("M", 600, 650), ("T", 600, 650), ("W", 600, 650)]),
            component("B", &[("M", 620, 700), ("T", 800, 850)]),
            component("C", &[("T", 600, 700), ("W", 630, 660), ("F", 600, 650)]),
        ];
        let mut cache = ConflictCache::new();
        let mut rng = StdRng::seed_from_u64(0);
        let result = enumerate_valid(&components, 1_000, 10, &mut rng, &mut cache);
        assert_eq!(result.mode, EnumerationMode::Exhaustive);
        assert_eq!(result.examined, 18);

        let mut brute = Vec::new();
        for a in 0..3 {
            for b in 0..2 {
                for c in 0..3 {
                    let offs = [
                        &components[0].offerings[a],
                        &components[1].offerings[b],
                        &components[2].offerings[c],
                    ];
                    let clash = offs.iter().enumerate().any(|(i, x)| {
                        offs[i + 1..].iter().any(|y| {
                            x.slots.iter().any(|s| y.slots.iter().any(|t| s.overlaps(t)))
                        })
                    });
                    if !clash {
                        brute.push(vec![a, b, c]);
                    }
                }
            }
        }
        assert_eq!(result.valid, brute);
    }

    #[test]
    fn test_sampling_mode_draws_unique_candidates() {
        let components: Vec<_> = (0..4).map(|i| sized(&format!("C{i}"), 10)).collect();
        let mut cache = ConflictCache::new();
        let mut rng = StdRng::seed_from_u64(42);
        let result = enumerate_valid(&components, 1_000, 500, &mut rng, &mut cache);

        assert_eq!(result.mode, EnumerationMode::Sampling);
        assert_eq!(result.examined, 500);
        // Offerings without slots never conflict.
        assert_eq!(result.valid.len(), 500);
        let unique: HashSet<_> = result.valid.iter().collect();
        assert_eq!(unique.len(), 500);
        assert!(result.valid.iter().all(|p| p.len() == 4 && p.iter().all(|&i| i < 10)));
    }
}
