//! Lineup GA problem definition.
//!
//! Implements [`GaProblem`] for budget-constrained lineup selection.
//! Bridges the domain models (`Lineup`, `CandidatePools`) to the generic
//! GA runner.
//!
//! | Callback | Policy |
//! |----------|--------|
//! | `create_individual` | [`random_lineup`] |
//! | `evaluate` | total projected value (maximize) |
//! | `evaluate_secondary` | total cost (tie-break, lower wins) |
//! | `crossover` | uniform crossover + duplicate repair |
//! | `mutate` | per-slot replacement at `rate`% |
//! | `exclude` | wrong arity, or cost above the salary cap |

use std::sync::Arc;

use rand::Rng;
use tracing::warn;

use super::operators::{crossover_lineups, mutate_lineup, random_lineup};
use super::GaProblem;
use crate::error::Result;
use crate::models::{CandidatePools, Lineup, LINEUP_SIZE};

/// Default salary cap, in candidate cost units.
pub const DEFAULT_SALARY_CAP: i64 = 50_000;

/// GA problem for lineup selection under a salary cap.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use u_lineup::ga::{GaConfig, GaRunner, LineupGaProblem};
/// use u_lineup::models::{Candidate, CandidatePools, Position};
///
/// let mut candidates = vec![
///     Candidate::new("QB", Position::QB, 6000, 20.0),
///     Candidate::new("TE", Position::TE, 4500, 9.0),
///     Candidate::new("DST", Position::DST, 3200, 7.0),
/// ];
/// for i in 0..4 {
///     candidates.push(Candidate::new(format!("RB{i}"), Position::RB, 5000, 12.0));
///     candidates.push(Candidate::new(format!("WR{i}"), Position::WR, 5000, 11.0));
/// }
/// let problem = LineupGaProblem::new(Arc::new(CandidatePools::from_candidates(candidates)));
/// let config = GaConfig::default().with_num_generations(5).with_seed(1);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best.total_cost() <= 50_000);
/// ```
#[derive(Debug, Clone)]
pub struct LineupGaProblem {
    /// Sampling universe.
    pub pools: Arc<CandidatePools>,
    /// Maximum total cost of a feasible lineup (inclusive).
    pub salary_cap: i64,
}

impl LineupGaProblem {
    /// Creates a problem with the default salary cap.
    pub fn new(pools: Arc<CandidatePools>) -> Self {
        Self {
            pools,
            salary_cap: DEFAULT_SALARY_CAP,
        }
    }

    /// Sets the salary cap.
    pub fn with_salary_cap(mut self, salary_cap: i64) -> Self {
        self.salary_cap = salary_cap;
        self
    }

    /// Whether `lineup` passes the exclusion policy.
    pub fn is_feasible(&self, lineup: &Lineup) -> bool {
        !self.exclude(lineup)
    }
}

impl GaProblem for LineupGaProblem {
    type Individual = Lineup;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<Lineup> {
        random_lineup(&self.pools, rng)
    }

    fn evaluate(&self, lineup: &Lineup) -> f64 {
        lineup.total_projected_value()
    }

    fn evaluate_secondary(&self, lineup: &Lineup) -> f64 {
        lineup.total_cost() as f64
    }

    fn crossover<R: Rng>(&self, parent1: &Lineup, parent2: &Lineup, rng: &mut R) -> Result<Lineup> {
        crossover_lineups(parent1, parent2, &self.pools, rng)
    }

    fn mutate<R: Rng>(&self, lineup: &mut Lineup, rate: u32, rng: &mut R) -> Result<()> {
        mutate_lineup(lineup, rate, &self.pools, rng)?;
        Ok(())
    }

    fn exclude(&self, lineup: &Lineup) -> bool {
        if lineup.len() != LINEUP_SIZE {
            warn!(len = lineup.len(), "excluding lineup with invalid slot count");
            return true;
        }
        lineup.total_cost() > self.salary_cap
    }
}
