//! CNF encoding of the component-selection problem.
//!
//! Every representative offering, flattened in component order, gets a
//! 1-based variable. Three clause families are emitted:
//!
//! | Family | Clauses | Meaning |
//! |--------|---------|---------|
//! | Coverage | one per component: `x1 ∨ … ∨ xn` | at least one per component |
//! | Exclusion | two per sibling pair: `¬xi ∨ ¬xj`, `¬xj ∨ ¬xi` | at most one per component |
//! | Conflict | two per conflicting cross-component pair | no clashing pair |
//!
//! Each "not both" constraint is written in both literal orders, one per
//! direction of the implication.

use crate::conflict::ConflictCache;
use crate::models::{Component, Offering};

use super::Clause;

/// A CNF instance plus the literal layout needed to read models back.
#[derive(Debug, Clone, Default)]
pub struct CnfEncoding {
    /// All clauses: coverage, then exclusion, then conflict.
    pub clauses: Vec<Clause>,
    /// Number of variables (flattened offerings).
    pub variable_count: usize,
    /// Coverage clause count.
    pub coverage_count: usize,
    /// Exclusion clause count.
    pub exclusion_count: usize,
    /// Conflict clause count.
    pub conflict_count: usize,
    /// First variable of each component.
    offsets: Vec<i32>,
    sizes: Vec<usize>,
}

impl CnfEncoding {
    /// Variable for offering `index` of component `component`.
    pub fn literal(&self, component: usize, index: usize) -> i32 {
        self.offsets[component] + index as i32
    }

    /// Reads a model back into one offering index per component.
    ///
    /// Returns `None` if some component has no true variable.
    pub fn decode_model(&self, model: &[i32]) -> Option<Vec<usize>> {
        let is_true = |var: i32| model.iter().any(|&lit| lit == var);
        self.sizes
            .iter()
            .enumerate()
            .map(|(c, &size)| (0..size).find(|&i| is_true(self.literal(c, i))))
            .collect()
    }
}

/// Encodes components and their pairwise conflicts as CNF.
///
/// Conflicts are looked up through `cache`, which is left populated for the
/// enumeration phase.
pub fn encode_cnf(components: &[Component], cache: &mut ConflictCache) -> CnfEncoding {
    let mut enc = CnfEncoding::default();
    let mut flat: Vec<(usize, i32, &Offering)> = Vec::new();
    let mut coverage: Vec<Clause> = Vec::with_capacity(components.len());
    let mut exclusion: Vec<Clause> = Vec::new();

    let mut next_var = 1i32;
    for (c, component) in components.iter().enumerate() {
        enc.offsets.push(next_var);
        enc.sizes.push(component.len());
        let literals: Vec<i32> = (0..component.len() as i32).map(|i| next_var + i).collect();

        for i in 0..literals.len() {
            for j in (i + 1)..literals.len() {
                exclusion.push(vec![-literals[i], -literals[j]]);
                exclusion.push(vec![-literals[j], -literals[i]]);
            }
        }
        for (offering, &lit) in component.offerings.iter().zip(&literals) {
            flat.push((c, lit, offering));
        }
        coverage.push(literals);
        next_var += component.len() as i32;
    }
    enc.variable_count = flat.len();
    enc.coverage_count = coverage.len();
    enc.exclusion_count = exclusion.len();
    enc.clauses = coverage;
    enc.clauses.append(&mut exclusion);

    for i in 0..flat.len() {
        for j in (i + 1)..flat.len() {
            let (ci, li, oi) = flat[i];
            let (cj, lj, oj) = flat[j];
            if ci != cj && cache.conflicts(oi, oj) {
                enc.clauses.push(vec![-li, -lj]);
                enc.clauses.push(vec![-lj, -li]);
                enc.conflict_count += 2;
            }
        }
    }

    enc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Days, TimeSlot};

    fn component(course: &str, offerings: &[(&str, &str, i32, i32)]) -> Component {
        let mut c = Component::new(course, "LEC");
        for (id, days, start, end) in offerings {
            c.offerings.push(
                Offering::new(*id, "LEC", *id)
                    .with_slot(TimeSlot::new(days.parse::<Days>().unwrap(), *start, *end)),
            );
        }
        c
    }

    #[test]
    fn test_clause_families() {
        let components = vec![
            component("A", &[("1", "M", 600, 650), ("2", "M", 700, 750), ("3", "T", 600, 650)]),
            component("B", &[("4", "M", 620, 680), ("5", "W", 600, 650)]),
        ];
        let mut cache = ConflictCache::new();
        let enc = encode_cnf(&components, &mut cache);

        assert_eq!(enc.variable_count, 5);
        assert_eq!(enc.coverage_count, 2);
        // C(3,2)*2 + C(2,2)*2
        assert_eq!(enc.exclusion_count, 8);
        // Only 1 (M 600-650) vs 4 (M 620-680)
        assert_eq!(enc.conflict_count, 2);
        assert_eq!(enc.clauses.len(), 12);

        assert_eq!(enc.clauses[0], vec![1, 2, 3]);
        assert_eq!(enc.clauses[1], vec![4, 5]);
        // Exclusion follows all coverage clauses, conflicts come last.
        assert_eq!(enc.clauses[2], vec![-1, -2]);
        assert_eq!(enc.clauses[3], vec![-2, -1]);
        assert_eq!(enc.clauses[8], vec![-4, -5]);
        assert_eq!(enc.clauses[10], vec![-1, -4]);
        assert_eq!(enc.clauses[11], vec![-4, -1]);
        assert!(enc.clauses.contains(&vec![-1, -4]));
        assert!(enc.clauses.contains(&vec![-4, -1]));
    }

    #[test]
    fn test_same_component_conflicts_not_encoded() {
        // Siblings overlap in time but are already mutually exclusive.
        let components = vec![component("A", &[("1", "M", 600, 650), ("2", "M", 620, 700)])];
        let mut cache = ConflictCache::new();
        let enc = encode_cnf(&components, &mut cache);
        assert_eq!(enc.conflict_count, 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_literal_layout_and_decode() {
        let components = vec![
            component("A", &[("1", "M", 600, 650), ("2", "T", 600, 650)]),
            component("B", &[("3", "W", 600, 650), ("4", "R", 600, 650), ("5", "F", 600, 650)]),
        ];
        let mut cache = ConflictCache::new();
        let enc = encode_cnf(&components, &mut cache);

        assert_eq!(enc.literal(0, 1), 2);
        assert_eq!(enc.literal(1, 0), 3);
        assert_eq!(enc.literal(1, 2), 5);

        let model = vec![-1, 2, -3, -4, 5];
        assert_eq!(enc.decode_model(&model), Some(vec![1, 2]));
        assert_eq!(enc.decode_model(&[-1, -2, 3, -4, -5]), None);
    }
}
