//! `splr`-backed satisfiability oracle.
//!
//! Runs the pure-Rust CDCL solver on a worker thread. The budget is handed to
//! splr as its own `c_timeout`, so an overrunning solve stops itself and
//! reports `TimeOut`. The caller also waits at most the budget (plus a short
//! grace period) on the channel; a worker that overruns even that is
//! abandoned and its answer discarded.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::debug;
use splr::{Certificate, Config, SolveIF, Solver, SolverError};

use super::{Clause, OracleError, SatOracle, SatOutcome};

/// SAT oracle using the `splr` solver.
#[derive(Debug, Clone)]
pub struct SplrOracle {
    budget: Duration,
}

/// Extra wait on the channel after the solver's own timeout should fire.
const GRACE: Duration = Duration::from_millis(500);

impl SplrOracle {
    /// Creates an oracle with the given wall-clock budget.
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// Wall-clock budget per solve.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Solver configuration carrying the budget as splr's own timeout.
    pub fn solver_config(&self) -> Config {
        Config {
            c_timeout: self.budget.as_secs_f64(),
            ..Config::default()
        }
    }
}

impl Default for SplrOracle {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl SatOracle for SplrOracle {
    fn name(&self) -> &'static str {
        "splr"
    }

    fn solve(&self, clauses: &[Clause]) -> Result<SatOutcome, OracleError> {
        let owned: Vec<Clause> = clauses.to_vec();
        let config = self.solver_config();
        let budget = self.budget;
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("splr-oracle".into())
            .spawn(move || {
                let answer = match Solver::try_from((config, owned.as_slice())) {
                    Ok(mut solver) => solver.solve(),
                    // Trivial instances are decided while loading.
                    Err(early) => early,
                };
                let result = match answer {
                    Ok(Certificate::SAT(model)) => Ok(SatOutcome::Satisfiable(model)),
                    Ok(Certificate::UNSAT) => Ok(SatOutcome::Unsatisfiable),
                    Err(SolverError::TimeOut) => Err(OracleError::Timeout(budget)),
                    Err(e) => Err(OracleError::Failed(format!("{e:?}"))),
                };
                // Receiver may be gone after a timeout.
                let _ = tx.send(result);
            })
            .map_err(|e| OracleError::Failed(format!("could not start solver thread: {e}")))?;

        match rx.recv_timeout(budget.saturating_add(GRACE)) {
            Ok(result) => {
                match &result {
                    Ok(SatOutcome::Satisfiable(model)) => {
                        debug!("splr: SAT with {} variables", model.len())
                    }
                    Ok(SatOutcome::Unsatisfiable) => debug!("splr: UNSAT"),
                    Err(e) => debug!("splr: {e}"),
                }
                result
            }
            Err(mpsc::RecvTimeoutError::Timeout) => Err(OracleError::Timeout(budget)),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(OracleError::Failed("solver thread panicked".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfiable() {
        let oracle = SplrOracle::default();
        let clauses = vec![vec![1, 2], vec![-1, -2], vec![-2, -1], vec![1]];
        match oracle.solve(&clauses).unwrap() {
            SatOutcome::Satisfiable(model) => {
                assert!(model.contains(&1));
                assert!(model.contains(&-2));
            }
            SatOutcome::Unsatisfiable => panic!("expected SAT"),
        }
    }

    #[test]
    fn test_unsatisfiable() {
        let oracle = SplrOracle::default();
        let clauses = vec![vec![1], vec![2], vec![-1, -2], vec![-2, -1]];
        assert_eq!(oracle.solve(&clauses).unwrap(), SatOutcome::Unsatisfiable);
    }

    #[test]
    fn test_budget_accessor() {
        let oracle = SplrOracle::new(Duration::from_millis(250));
        assert_eq!(oracle.budget(), Duration::from_millis(250));
        assert_eq!(oracle.name(), "splr");
    }

    #[test]
    fn test_budget_reaches_solver_config() {
        let oracle = SplrOracle::new(Duration::from_millis(1500));
        assert!((oracle.solver_config().c_timeout - 1.5).abs() < 1e-9);

        let default = SplrOracle::default().solver_config();
        assert!((default.c_timeout - 10.0).abs() < 1e-9);
    }
}
