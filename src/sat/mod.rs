//! SAT-based feasibility check.
//!
//! Encodes "exactly one offering per component, no two chosen offerings
//! conflict" as CNF and hands it to a satisfiability oracle. An
//! unsatisfiable instance proves no conflict-free schedule exists, so the
//! generator can stop before any combinatorial work.
//!
//! # Oracle Contract
//!
//! Clauses use DIMACS conventions: variables are 1-based `i32`s, a negative
//! literal is a negated variable. [`SatOracle::solve`] returns a model (one
//! signed literal per variable) or [`SatOutcome::Unsatisfiable`]. Oracles
//! enforce their own time budget and report failure as [`OracleError`].
//!
//! # Reference
//! Biere et al. (2009), "Handbook of Satisfiability", Ch. 2 (CNF encodings)

mod encoder;
mod splr_oracle;

pub use encoder::{encode_cnf, CnfEncoding};
pub use splr_oracle::SplrOracle;

use std::time::Duration;
use thiserror::Error;

/// A disjunction of DIMACS literals.
pub type Clause = Vec<i32>;

/// Result of a satisfiability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatOutcome {
    /// A satisfying assignment (signed literal per variable).
    Satisfiable(Vec<i32>),
    /// No assignment exists.
    Unsatisfiable,
}

impl SatOutcome {
    #[inline]
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatOutcome::Satisfiable(_))
    }
}

/// Solver-layer failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The solver did not answer within its wall-clock budget.
    #[error("solver timed out after {0:?}")]
    Timeout(Duration),
    /// The solver crashed or reported an internal error.
    #[error("solver failed: {0}")]
    Failed(String),
}

/// A black-box satisfiability solver.
///
/// Implementations can wrap any backend; the encoder never depends on one.
pub trait SatOracle {
    /// Backend name, for logging.
    fn name(&self) -> &'static str;

    /// Decides satisfiability of the clause set.
    fn solve(&self, clauses: &[Clause]) -> Result<SatOutcome, OracleError>;
}
