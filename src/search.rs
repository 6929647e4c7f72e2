//! Lineup search driver.
//!
//! [`LineupSearch`] wires validated candidate pools and a [`SearchConfig`]
//! into the GA runner and holds the outcome.
//!
//! # Lifecycle
//!
//! | State | `result()` |
//! |-------|-----------|
//! | constructed | `Err(NotReady)` |
//! | `run_search()` failed | `Err(NotReady)` |
//! | `run_search()` succeeded | best lineup |

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LineupError, Result};
use crate::ga::{GaConfig, GaResult, GaRunner, LineupGaProblem, DEFAULT_SALARY_CAP};
use crate::models::{CandidatePools, CandidateSource, Lineup};
use crate::validation::validate_pools;

/// Search configuration.
///
/// Recognized options (camelCase): `salaryCap`, plus every [`GaConfig`]
/// option (`numGenerations`, `populationSize`, `mutationRate`, ...) at the
/// same level.
///
/// ```
/// use u_lineup::search::SearchConfig;
///
/// let config: SearchConfig =
///     serde_json::from_str(r#"{"salaryCap": 60000, "numGenerations": 10}"#).unwrap();
/// assert_eq!(config.salary_cap, 60_000);
/// assert_eq!(config.ga.num_generations, 10);
/// assert_eq!(config.ga.population_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Maximum total lineup cost, inclusive (default: 50000).
    pub salary_cap: i64,
    /// Engine settings.
    #[serde(flatten)]
    pub ga: GaConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            salary_cap: DEFAULT_SALARY_CAP,
            ga: GaConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Sets the salary cap.
    pub fn with_salary_cap(mut self, salary_cap: i64) -> Self {
        self.salary_cap = salary_cap;
        self
    }

    /// Replaces the engine settings.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }
}

/// A configured lineup search over one set of candidate pools.
#[derive(Debug)]
pub struct LineupSearch {
    problem: LineupGaProblem,
    config: SearchConfig,
    outcome: Option<GaResult<Lineup>>,
}

impl LineupSearch {
    /// Creates a search after validating pools and configuration.
    ///
    /// # Errors
    /// - `InvalidPools` with every detected pool problem.
    /// - `InvalidConfig` if the engine settings are unusable.
    pub fn new(pools: CandidatePools, config: SearchConfig) -> Result<Self> {
        validate_pools(&pools).map_err(LineupError::InvalidPools)?;
        config.ga.validate()?;
        let problem =
            LineupGaProblem::new(Arc::new(pools)).with_salary_cap(config.salary_cap);
        Ok(Self {
            problem,
            config,
            outcome: None,
        })
    }

    /// Loads candidates from `source` and creates a search.
    pub fn from_source<S: CandidateSource + ?Sized>(
        source: &S,
        config: SearchConfig,
    ) -> Result<Self> {
        Self::new(CandidatePools::from_source(source)?, config)
    }

    /// Runs all configured generations and returns the best lineup.
    ///
    /// Replaces the outcome of any previous run. On error the search is
    /// left without a result.
    pub fn run_search(&mut self) -> Result<&Lineup> {
        self.outcome = None;
        info!(
            salary_cap = self.config.salary_cap,
            generations = self.config.ga.num_generations,
            population_size = self.config.ga.population_size,
            candidates = self.problem.pools.len(),
            "starting lineup search"
        );

        let outcome = GaRunner::run(&self.problem, &self.config.ga)?;
        info!(
            projected_value = outcome.best_fitness,
            cost = outcome.best.total_cost(),
            "lineup search finished"
        );
        Ok(&self.outcome.insert(outcome).best)
    }

    /// Best lineup of the last successful run.
    ///
    /// # Errors
    /// `NotReady` before a successful [`run_search`](Self::run_search).
    pub fn result(&self) -> Result<&Lineup> {
        self.outcome
            .as_ref()
            .map(|o| &o.best)
            .ok_or(LineupError::NotReady)
    }

    /// Full outcome of the last successful run, including history.
    pub fn outcome(&self) -> Option<&GaResult<Lineup>> {
        self.outcome.as_ref()
    }

    /// Search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Candidate pools being searched.
    pub fn pools(&self) -> &CandidatePools {
        &self.problem.pools
    }
}
