//! Generational GA driver.
//!
//! # Loop
//!
//! 1. **Initialize** `population_size` individuals.
//! 2. **Evaluate** primary fitness (maximized), secondary metric (minimized,
//!    tie-break only), and exclusion for every individual.
//! 3. **Filter** excluded individuals out of selection and elitism.
//! 4. **Reproduce**: elites survive unchanged; the rest of the next
//!    generation is bred from selected parents (crossover, then mutation).
//! 5. **Advance** and track the best feasible individual seen so far.
//!
//! Steps 2–5 repeat `num_generations` times; the final offspring are
//! evaluated once more so their best can be returned.
//!
//! # Parallelism
//!
//! Evaluation and breeding of one generation are independent per
//! individual and run on rayon when `parallel` is set. Every individual is
//! bred with its own `SmallRng` seeded from the driver RNG, so a seeded run
//! produces the same result either way. The best-so-far tracker is only
//! touched on the driver thread, after the generation barrier.

use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use super::GaConfig;
use crate::error::{LineupError, Result};

/// Problem plug-in for [`GaRunner`].
///
/// Operators receive an RNG so runs are reproducible; they report
/// unrecoverable conditions (e.g. an exhausted sampling pool) as errors,
/// which abort the run.
pub trait GaProblem: Sync {
    /// Individual (chromosome) type.
    type Individual: Clone + Send + Sync;

    /// Creates a random individual for the initial population.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Result<Self::Individual>;

    /// Primary fitness, higher is better.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Secondary metric, lower is better. Used to break fitness ties.
    fn evaluate_secondary(&self, _individual: &Self::Individual) -> f64 {
        0.0
    }

    /// Produces one child from two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Result<Self::Individual>;

    /// Mutates `individual` in place; `rate` is a per-gene percentage.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rate: u32, rng: &mut R)
        -> Result<()>;

    /// Whether `individual` is infeasible and must not be selected.
    fn exclude(&self, _individual: &Self::Individual) -> bool {
        false
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation index (0 = initial population).
    pub generation: usize,
    /// Individuals evaluated.
    pub evaluated: usize,
    /// Individuals that passed the exclusion policy.
    pub feasible: usize,
    /// Best feasible fitness, if any.
    pub best_fitness: Option<f64>,
    /// Mean feasible fitness, if any.
    pub mean_fitness: Option<f64>,
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best feasible individual seen.
    pub best: I,
    /// Its primary fitness.
    pub best_fitness: f64,
    /// Its secondary metric.
    pub best_secondary: f64,
    /// Generations run.
    pub generations: usize,
    /// Per-generation statistics, `num_generations + 1` entries.
    pub history: Vec<GenerationStats>,
}

#[derive(Debug, Clone)]
struct Scored<I> {
    individual: I,
    fitness: f64,
    secondary: f64,
    feasible: bool,
}

impl<I> Scored<I> {
    /// Higher fitness first, then lower secondary.
    fn rank(&self, other: &Self) -> Ordering {
        self.fitness
            .total_cmp(&other.fitness)
            .then_with(|| other.secondary.total_cmp(&self.secondary))
    }
}

/// Runs a [`GaProblem`] under a [`GaConfig`].
pub struct GaRunner;

impl GaRunner {
    /// Runs the full generational loop.
    ///
    /// # Errors
    /// - `InvalidConfig` if the configuration fails validation.
    /// - Any error raised by the problem's operators.
    /// - `NotReady` if no feasible individual was ever produced.
    #[instrument(
        level = "debug",
        skip(problem, config),
        fields(
            population_size = config.population_size,
            generations = config.num_generations
        )
    )]
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut population = Self::initialize(problem, config, &mut rng)?;
        let mut best: Option<Scored<P::Individual>> = None;
        let mut history = Vec::with_capacity(config.num_generations + 1);

        for generation in 0..config.num_generations {
            let feasible =
                Self::evaluate(problem, population, config.parallel, generation, &mut history);
            Self::track_best(&mut best, &feasible);

            population = if feasible.is_empty() {
                warn!(generation, "no feasible individuals, re-seeding population");
                Self::initialize(problem, config, &mut rng)?
            } else {
                Self::reproduce(problem, config, &feasible, &mut rng)?
            };
        }
        if config.num_generations > 0 {
            let feasible = Self::evaluate(
                problem,
                population,
                config.parallel,
                config.num_generations,
                &mut history,
            );
            Self::track_best(&mut best, &feasible);
        }

        let best = best.ok_or(LineupError::NotReady)?;
        info!(
            best_fitness = best.fitness,
            best_secondary = best.secondary,
            generations = config.num_generations,
            "GA run finished"
        );
        Ok(GaResult {
            best: best.individual,
            best_fitness: best.fitness,
            best_secondary: best.secondary,
            generations: config.num_generations,
            history,
        })
    }

    fn initialize<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        rng: &mut SmallRng,
    ) -> Result<Vec<P::Individual>> {
        let seeds: Vec<u64> = (0..config.population_size).map(|_| rng.random()).collect();
        let create = |&seed: &u64| {
            let mut rng = SmallRng::seed_from_u64(seed);
            problem.create_individual(&mut rng)
        };
        if config.parallel {
            seeds.par_iter().map(create).collect()
        } else {
            seeds.iter().map(create).collect()
        }
    }

    /// Scores a population, records its stats, and returns the feasible part.
    fn evaluate<P: GaProblem>(
        problem: &P,
        population: Vec<P::Individual>,
        parallel: bool,
        generation: usize,
        history: &mut Vec<GenerationStats>,
    ) -> Vec<Scored<P::Individual>> {
        let score = |individual: P::Individual| Scored {
            fitness: problem.evaluate(&individual),
            secondary: problem.evaluate_secondary(&individual),
            feasible: !problem.exclude(&individual),
            individual,
        };
        let evaluated = population.len();
        let scored: Vec<Scored<P::Individual>> = if parallel {
            population.into_par_iter().map(score).collect()
        } else {
            population.into_iter().map(score).collect()
        };
        let feasible: Vec<_> = scored.into_iter().filter(|s| s.feasible).collect();

        let best_fitness = feasible.iter().map(|s| s.fitness).max_by(f64::total_cmp);
        let mean_fitness = (!feasible.is_empty())
            .then(|| feasible.iter().map(|s| s.fitness).sum::<f64>() / feasible.len() as f64);
        debug!(
            generation,
            evaluated,
            feasible = feasible.len(),
            ?best_fitness,
            ?mean_fitness,
            "generation evaluated"
        );
        history.push(GenerationStats {
            generation,
            evaluated,
            feasible: feasible.len(),
            best_fitness,
            mean_fitness,
        });
        feasible
    }

    fn track_best<I: Clone>(best: &mut Option<Scored<I>>, feasible: &[Scored<I>]) {
        let Some(candidate) = feasible.iter().max_by(|a, b| a.rank(b)) else {
            return;
        };
        let improved = match best {
            Some(current) => candidate.rank(current) == Ordering::Greater,
            None => true,
        };
        if improved {
            *best = Some(candidate.clone());
        }
    }

    fn reproduce<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        feasible: &[Scored<P::Individual>],
        rng: &mut SmallRng,
    ) -> Result<Vec<P::Individual>> {
        let mut ranked: Vec<&Scored<P::Individual>> = feasible.iter().collect();
        ranked.sort_by(|a, b| b.rank(a));

        // At least one child per generation, so a population of one still evolves
        let elite_count = config
            .elite_count
            .min(ranked.len())
            .min(config.population_size - 1);
        let mut next: Vec<P::Individual> = ranked[..elite_count]
            .iter()
            .map(|s| s.individual.clone())
            .collect();

        let offspring_count = config.population_size - elite_count;
        let fitness: Vec<f64> = feasible.iter().map(|s| s.fitness).collect();
        let pairs = config.selection.select_pairs(&fitness, offspring_count, rng);
        let seeds: Vec<u64> = (0..pairs.len()).map(|_| rng.random()).collect();

        let breed = |(&(a, b), &seed): (&(usize, usize), &u64)| -> Result<P::Individual> {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut child =
                problem.crossover(&feasible[a].individual, &feasible[b].individual, &mut rng)?;
            problem.mutate(&mut child, config.mutation_rate, &mut rng)?;
            Ok(child)
        };
        let offspring: Vec<P::Individual> = if config.parallel {
            pairs.par_iter().zip(seeds.par_iter()).map(breed).collect::<Result<_>>()?
        } else {
            pairs.iter().zip(seeds.iter()).map(breed).collect::<Result<_>>()?
        };

        next.extend(offspring);
        Ok(next)
    }
}
