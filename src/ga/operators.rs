//! Lineup genetic operators.
//!
//! | Operator | Function |
//! |----------|----------|
//! | Initialization | [`random_lineup`] |
//! | Crossover + repair | [`crossover_lineups`] |
//!
//! Crossover is [`Lineup::crossover_with`] followed by [`repair_duplicates`].
//! | Mutation | [`mutate_lineup`] |
//!
//! All replacement draws go through [`sample_not_in`]: a uniform draw from
//! the slot's pool, rejected while the candidate already occurs in the
//! lineup. Rejection is capped at [`MAX_SAMPLE_ATTEMPTS`]; past the cap an
//! exact draw over the remaining candidates decides, so exhaustion is
//! reported only when no candidate outside the lineup exists.

use std::sync::Arc;

use rand::Rng;
use rand::prelude::IndexedRandom;
use tracing::{instrument, trace};

use crate::error::{LineupError, Result};
use crate::models::{
    Candidate, CandidatePools, Lineup, DST_SLOT, FLEX_SLOT, QB_SLOT, RB_SLOTS, SLOT_SCHEMA,
    TE_SLOT, WR_SLOTS,
};

/// Rejection-sampling budget per replacement draw.
pub const MAX_SAMPLE_ATTEMPTS: usize = 1000;

fn exhausted(slot: usize, attempts: usize) -> LineupError {
    LineupError::PoolExhausted {
        slot,
        kind: SLOT_SCHEMA[slot],
        attempts,
    }
}

/// Draws a candidate for `slot` that does not occur anywhere in `lineup`.
///
/// Returns `None` when every candidate of the slot's pool is already in
/// the lineup (or the pool is empty).
pub fn sample_not_in<R: Rng>(
    lineup: &Lineup,
    pools: &CandidatePools,
    slot: usize,
    rng: &mut R,
) -> Option<Arc<Candidate>> {
    let pool = pools.for_slot(slot);
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = pool.choose(rng)?;
        if !lineup.contains(candidate) {
            return Some(Arc::clone(candidate));
        }
    }
    let remaining: Vec<&Arc<Candidate>> = pool.iter().filter(|c| !lineup.contains(c)).collect();
    remaining.choose(rng).map(|&c| Arc::clone(c))
}

/// Draws `N` distinct candidates for the given slots of one position.
fn draw_distinct<const N: usize, R: Rng>(
    pools: &CandidatePools,
    slots: &[usize; N],
    rng: &mut R,
) -> Result<[Arc<Candidate>; N]> {
    let picked: Vec<Arc<Candidate>> = pools
        .for_slot(slots[0])
        .choose_multiple(rng, N)
        .cloned()
        .collect();
    let got = picked.len();
    picked
        .try_into()
        .map_err(|_| exhausted(slots[got.min(N - 1)], 1))
}

fn draw_one<R: Rng>(pools: &CandidatePools, slot: usize, rng: &mut R) -> Result<Arc<Candidate>> {
    pools
        .for_slot(slot)
        .choose(rng)
        .cloned()
        .ok_or_else(|| exhausted(slot, 1))
}

/// Builds a random lineup: one QB, two distinct RBs, three distinct WRs,
/// one TE, one DST, and a FLEX drawn from the RB/WR candidates not already
/// placed. The result holds no duplicates.
///
/// # Errors
/// `PoolExhausted` if a pool cannot fill its slots with distinct candidates.
pub fn random_lineup<R: Rng>(pools: &CandidatePools, rng: &mut R) -> Result<Lineup> {
    let qb = draw_one(pools, QB_SLOT, rng)?;
    let rbs = draw_distinct(pools, &RB_SLOTS, rng)?;
    let wrs = draw_distinct(pools, &WR_SLOTS, rng)?;
    let te = draw_one(pools, TE_SLOT, rng)?;
    let dst = draw_one(pools, DST_SLOT, rng)?;

    let placed = |c: &Arc<Candidate>| rbs.iter().chain(wrs.iter()).any(|p| Arc::ptr_eq(p, c));
    let open: Vec<&Arc<Candidate>> = pools
        .for_slot(FLEX_SLOT)
        .iter()
        .filter(|c| !placed(*c))
        .collect();
    let flex = open
        .choose(rng)
        .map(|&c| Arc::clone(c))
        .ok_or_else(|| exhausted(FLEX_SLOT, 1))?;

    Ok(Lineup::new(qb, rbs, wrs, te, flex, dst))
}

/// Replaces every slot reported by [`Lineup::duplicate_slot_indices`] with
/// a candidate not yet in the lineup, in report order.
///
/// A slot reported twice is replaced once; on the second visit its
/// occupant is already unique and is kept.
///
/// # Errors
/// `PoolExhausted` if a reported slot has no replacement available.
pub fn repair_duplicates<R: Rng>(
    lineup: &mut Lineup,
    pools: &CandidatePools,
    rng: &mut R,
) -> Result<()> {
    for slot in lineup.duplicate_slot_indices() {
        if lineup.count_occurrences(lineup.slot(slot)?) == 1 {
            continue;
        }
        let replacement = sample_not_in(lineup, pools, slot, rng)
            .ok_or_else(|| exhausted(slot, MAX_SAMPLE_ATTEMPTS))?;
        lineup.set_slot(slot, replacement)?;
    }
    Ok(())
}

/// Uniform crossover followed by duplicate repair.
#[instrument(level = "trace", skip_all)]
pub fn crossover_lineups<R: Rng>(
    parent1: &Lineup,
    parent2: &Lineup,
    pools: &CandidatePools,
    rng: &mut R,
) -> Result<Lineup> {
    let mut child = parent1.crossover_with(parent2, rng);
    repair_duplicates(&mut child, pools, rng)?;
    Ok(child)
}

/// Mutates `lineup` in place: each slot is independently replaced, with
/// probability `rate`%, by a candidate not already in the lineup.
///
/// A slot whose pool has no such candidate keeps its occupant.
/// Returns the number of slots replaced.
#[instrument(level = "trace", skip(lineup, pools, rng))]
pub fn mutate_lineup<R: Rng>(
    lineup: &mut Lineup,
    rate: u32,
    pools: &CandidatePools,
    rng: &mut R,
) -> Result<usize> {
    let mut replaced = 0;
    for slot in 0..lineup.len() {
        if rng.random_range(0..100) >= rate {
            continue;
        }
        match sample_not_in(lineup, pools, slot, rng) {
            Some(candidate) => {
                lineup.set_slot(slot, candidate)?;
                replaced += 1;
            }
            None => trace!(slot, "no alternative candidate, slot unchanged"),
        }
    }
    Ok(replaced)
}
