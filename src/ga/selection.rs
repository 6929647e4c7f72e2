//! Parent selection.
//!
//! # Methods
//!
//! | Method | Pressure | Notes |
//! |--------|----------|-------|
//! | Tournament (size 2-3) | Low-moderate | Default; insensitive to fitness scale |
//! | Tournament (size 5+) | High | Fast convergence, diversity loss |
//! | Roulette | Proportional | Requires nonnegative fitness |
//!
//! Tournaments sample with replacement, so they work on any nonempty
//! population, including a single survivor.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Parent selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Selection {
    /// Best of `size` uniformly drawn candidates.
    Tournament { size: usize },
    /// Probability proportional to fitness.
    Roulette,
}

impl Selection {
    /// Picks `num_pairs` parent index pairs from `fitness` (higher = better).
    ///
    /// Returns an empty vector when `fitness` is empty.
    #[instrument(level = "debug", skip(self, fitness, rng), fields(num_candidates = fitness.len()))]
    pub fn select_pairs<R: Rng>(
        &self,
        fitness: &[f64],
        num_pairs: usize,
        rng: &mut R,
    ) -> Vec<(usize, usize)> {
        if fitness.is_empty() {
            return Vec::new();
        }
        (0..num_pairs)
            .map(|_| (self.select_one(fitness, rng), self.select_one(fitness, rng)))
            .collect()
    }

    fn select_one<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        match *self {
            Selection::Tournament { size } => tournament(fitness, size, rng),
            Selection::Roulette => roulette(fitness, rng),
        }
    }
}

fn tournament<R: Rng>(fitness: &[f64], size: usize, rng: &mut R) -> usize {
    let mut winner = rng.random_range(0..fitness.len());
    for _ in 1..size.max(1) {
        let challenger = rng.random_range(0..fitness.len());
        if fitness[challenger] > fitness[winner] {
            winner = challenger;
        }
    }
    winner
}

/// Fitness-proportional spin. Negative fitness counts as zero; when the
/// total is zero every candidate is equally likely.
fn roulette<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let weight = |f: f64| if f.is_finite() { f.max(0.0) } else { 0.0 };
    let total: f64 = fitness.iter().map(|&f| weight(f)).sum();
    if total <= 0.0 {
        return rng.random_range(0..fitness.len());
    }

    let spin = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (index, &f) in fitness.iter().enumerate() {
        cumulative += weight(f);
        if cumulative > spin {
            return index;
        }
    }
    // Rounding can leave `spin` just past the last boundary
    fitness.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_empty_population() {
        let mut rng = SmallRng::seed_from_u64(42);
        let pairs = Selection::Tournament { size: 3 }.select_pairs(&[], 5, &mut rng);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_single_candidate() {
        let mut rng = SmallRng::seed_from_u64(42);
        for selection in [Selection::Tournament { size: 3 }, Selection::Roulette] {
            let pairs = selection.select_pairs(&[12.5], 4, &mut rng);
            assert_eq!(pairs, vec![(0, 0); 4]);
        }
    }

    #[test]
    fn test_tournament_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = [1.0, 2.0, 100.0, 3.0];
        let pairs = Selection::Tournament { size: 3 }.select_pairs(&fitness, 500, &mut rng);

        let best_picks = pairs
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .filter(|&i| i == 2)
            .count();
        // P(best in a 3-draw tournament over 4) = 1 - (3/4)^3 ≈ 0.58
        assert!(best_picks > 450, "best picked {best_picks} of 1000");
    }

    #[test]
    fn test_roulette_proportional() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = [1.0, 3.0];
        let pairs = Selection::Roulette.select_pairs(&fitness, 2000, &mut rng);

        let second = pairs
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .filter(|&i| i == 1)
            .count();
        let share = second as f64 / 4000.0;
        assert!((0.70..0.80).contains(&share), "share {share}");
    }

    #[test]
    fn test_roulette_zero_fitness_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = [0.0, 0.0, -5.0];
        let pairs = Selection::Roulette.select_pairs(&fitness, 300, &mut rng);

        let mut counts = [0usize; 3];
        for (a, b) in pairs {
            counts[a] += 1;
            counts[b] += 1;
        }
        assert!(counts.iter().all(|&c| c > 100));
    }

    #[test]
    fn test_selection_serde() {
        let t: Selection = serde_json::from_str(r#"{"method":"tournament","size":4}"#).unwrap();
        assert_eq!(t, Selection::Tournament { size: 4 });
        let r: Selection = serde_json::from_str(r#"{"method":"roulette"}"#).unwrap();
        assert_eq!(r, Selection::Roulette);
    }
}
