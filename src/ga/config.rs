//! Engine-level GA configuration.

use serde::{Deserialize, Serialize};

use super::Selection;
use crate::error::{LineupError, Result};

/// Configuration for [`GaRunner`](super::GaRunner).
///
/// Field names serialize in camelCase (`numGenerations`, `populationSize`,
/// `mutationRate`, ...). Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GaConfig {
    /// Number of generations to run (default: 100).
    pub num_generations: usize,
    /// Individuals per generation (default: 20).
    pub population_size: usize,
    /// Per-gene mutation probability in percent, 0..=100 (default: 10).
    pub mutation_rate: u32,
    /// Best feasible individuals copied unchanged into the next generation
    /// (default: 1). At most `population_size - 1` are kept, so every
    /// generation breeds at least one child.
    pub elite_count: usize,
    /// Parent selection policy (default: tournament of 3).
    pub selection: Selection,
    /// RNG seed. `None` = seeded from the OS.
    pub seed: Option<u64>,
    /// Evaluate and breed on the rayon thread pool (default: true).
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            num_generations: 100,
            population_size: 20,
            mutation_rate: 10,
            elite_count: 1,
            selection: Selection::Tournament { size: 3 },
            seed: None,
            parallel: true,
        }
    }
}

impl GaConfig {
    /// Sets the number of generations.
    pub fn with_num_generations(mut self, generations: usize) -> Self {
        self.num_generations = generations;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the mutation rate (percent).
    pub fn with_mutation_rate(mut self, rate: u32) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Sets the selection policy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(LineupError::InvalidConfig(
                "populationSize must be at least 1".into(),
            ));
        }
        if self.mutation_rate > 100 {
            return Err(LineupError::InvalidConfig(format!(
                "mutationRate must be a percentage in 0..=100, got {}",
                self.mutation_rate
            )));
        }
        if let Selection::Tournament { size: 0 } = self.selection {
            return Err(LineupError::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
