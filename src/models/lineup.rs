//! Lineup (roster) model.
//!
//! A lineup is a fixed, position-typed sequence of nine slots:
//!
//! | Slot | Kind |
//! |------|------|
//! | 0 | QB |
//! | 1–2 | RB |
//! | 3–5 | WR |
//! | 6 | TE |
//! | 7 | FLEX (RB or WR) |
//! | 8 | DST |
//!
//! Slots hold `Arc<Candidate>` handles owned by the pools; two slots refer
//! to "the same candidate" when their handles point to the same allocation.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rand::Rng;

use super::{Candidate, Position};
use crate::error::{LineupError, Result};

/// Number of slots in every lineup.
pub const LINEUP_SIZE: usize = 9;
/// QB slot index.
pub const QB_SLOT: usize = 0;
/// RB slot indices.
pub const RB_SLOTS: [usize; 2] = [1, 2];
/// WR slot indices.
pub const WR_SLOTS: [usize; 3] = [3, 4, 5];
/// TE slot index.
pub const TE_SLOT: usize = 6;
/// FLEX slot index.
pub const FLEX_SLOT: usize = 7;
/// DST slot index.
pub const DST_SLOT: usize = 8;

/// What a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Exactly one position class.
    Fixed(Position),
    /// Any FLEX-eligible class (RB or WR).
    Flex,
}

impl SlotKind {
    /// Whether a candidate of `position` may occupy this slot.
    pub fn accepts(self, position: Position) -> bool {
        match self {
            SlotKind::Fixed(p) => p == position,
            SlotKind::Flex => position.is_flex_eligible(),
        }
    }

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            SlotKind::Fixed(p) => p.as_str(),
            SlotKind::Flex => "FLEX",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Slot schema, indexed by slot.
pub const SLOT_SCHEMA: [SlotKind; LINEUP_SIZE] = [
    SlotKind::Fixed(Position::QB),
    SlotKind::Fixed(Position::RB),
    SlotKind::Fixed(Position::RB),
    SlotKind::Fixed(Position::WR),
    SlotKind::Fixed(Position::WR),
    SlotKind::Fixed(Position::WR),
    SlotKind::Fixed(Position::TE),
    SlotKind::Flex,
    SlotKind::Fixed(Position::DST),
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Totals {
    projected_value: f64,
    cost: i64,
}

impl Totals {
    fn compute(slots: &[Arc<Candidate>]) -> Self {
        slots.iter().fold(
            Totals {
                projected_value: 0.0,
                cost: 0,
            },
            |acc, c| Totals {
                projected_value: acc.projected_value + c.projected_value,
                cost: acc.cost + c.cost,
            },
        )
    }
}

/// One complete roster assignment.
///
/// Totals are computed on first read and cached; every slot write goes
/// through [`Lineup::set_slot`], which drops the cache.
#[derive(Debug, Clone)]
pub struct Lineup {
    slots: [Arc<Candidate>; LINEUP_SIZE],
    totals: OnceLock<Totals>,
}

impl Lineup {
    /// Creates a lineup from its position groups.
    pub fn new(
        qb: Arc<Candidate>,
        rbs: [Arc<Candidate>; 2],
        wrs: [Arc<Candidate>; 3],
        te: Arc<Candidate>,
        flex: Arc<Candidate>,
        dst: Arc<Candidate>,
    ) -> Self {
        let [rb1, rb2] = rbs;
        let [wr1, wr2, wr3] = wrs;
        Self::from_slots([qb, rb1, rb2, wr1, wr2, wr3, te, flex, dst])
    }

    /// Creates a lineup from slots in schema order.
    pub fn from_slots(slots: [Arc<Candidate>; LINEUP_SIZE]) -> Self {
        Self {
            slots,
            totals: OnceLock::new(),
        }
    }

    /// Number of slots. Always [`LINEUP_SIZE`].
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a lineup never has empty slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Candidate in slot `index`.
    pub fn slot(&self, index: usize) -> Result<&Arc<Candidate>> {
        self.slots.get(index).ok_or(LineupError::SlotOutOfRange {
            index,
            size: LINEUP_SIZE,
        })
    }

    /// Replaces the candidate in slot `index`.
    pub fn set_slot(&mut self, index: usize, candidate: Arc<Candidate>) -> Result<()> {
        let slot = self.slots.get_mut(index).ok_or(LineupError::SlotOutOfRange {
            index,
            size: LINEUP_SIZE,
        })?;
        *slot = candidate;
        self.totals = OnceLock::new();
        Ok(())
    }

    /// All slots in schema order.
    pub fn slots(&self) -> &[Arc<Candidate>] {
        &self.slots
    }

    /// `(slot index, candidate)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Arc<Candidate>)> {
        self.slots.iter().enumerate()
    }

    /// Number of slots referencing `candidate`.
    pub fn count_occurrences(&self, candidate: &Arc<Candidate>) -> usize {
        self.slots
            .iter()
            .filter(|c| Arc::ptr_eq(*c, candidate))
            .count()
    }

    /// Whether any slot references `candidate`.
    pub fn contains(&self, candidate: &Arc<Candidate>) -> bool {
        self.count_occurrences(candidate) > 0
    }

    /// Whether every slot holds a distinct candidate.
    pub fn is_unique(&self) -> bool {
        self.slots.iter().all(|c| self.count_occurrences(c) == 1)
    }

    /// Slot indices that must be repaired because of duplicated candidates.
    ///
    /// # Algorithm
    /// For the RB group, then the WR group, in slot order:
    /// 1. If the entry equals the FLEX occupant, report the entry's slot
    ///    (FLEX keeps its candidate).
    /// 2. Independently of (1), report the first later slot in the same
    ///    group holding the same candidate (the earlier slot keeps it).
    ///
    /// The same index may be reported more than once.
    pub fn duplicate_slot_indices(&self) -> Vec<usize> {
        let flex = &self.slots[FLEX_SLOT];
        let mut dups = Vec::new();

        for group in [&RB_SLOTS[..], &WR_SLOTS[..]] {
            for (i, &slot) in group.iter().enumerate() {
                let candidate = &self.slots[slot];
                if Arc::ptr_eq(candidate, flex) {
                    dups.push(slot);
                }
                if let Some(&later) = group[i + 1..]
                    .iter()
                    .find(|&&other| Arc::ptr_eq(candidate, &self.slots[other]))
                {
                    dups.push(later);
                }
            }
        }
        dups
    }

    /// Sum of projected values across all slots.
    pub fn total_projected_value(&self) -> f64 {
        self.totals().projected_value
    }

    /// Sum of costs across all slots.
    pub fn total_cost(&self) -> i64 {
        self.totals().cost
    }

    fn totals(&self) -> Totals {
        *self.totals.get_or_init(|| Totals::compute(&self.slots))
    }

    /// Uniform crossover: each slot comes from `self` or `other` with
    /// probability 0.5. Neither parent is modified; the child may hold
    /// duplicates and must be repaired by the caller.
    pub fn crossover_with<R: Rng>(&self, other: &Lineup, rng: &mut R) -> Lineup {
        let slots = std::array::from_fn(|i| {
            if rng.random_bool(0.5) {
                Arc::clone(&self.slots[i])
            } else {
                Arc::clone(&other.slots[i])
            }
        });
        Lineup::from_slots(slots)
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, candidate) in self.iter() {
            writeln!(
                f,
                "{:<4} {} ${} {:.2}",
                SLOT_SCHEMA[i].label(),
                candidate,
                candidate.cost,
                candidate.projected_value
            )?;
        }
        write!(
            f,
            "Total ${} {:.2}",
            self.total_cost(),
            self.total_projected_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn cand(name: &str, position: Position, cost: i64, value: f64) -> Arc<Candidate> {
        Arc::new(Candidate::new(name, position, cost, value))
    }

    struct Roster {
        qb: Arc<Candidate>,
        rb: Vec<Arc<Candidate>>,
        wr: Vec<Arc<Candidate>>,
        te: Arc<Candidate>,
        dst: Arc<Candidate>,
    }

    fn roster(prefix: &str) -> Roster {
        Roster {
            qb: cand(&format!("{prefix}QB"), Position::QB, 6000, 20.0),
            rb: (0..3)
                .map(|i| cand(&format!("{prefix}RB{i}"), Position::RB, 5000 + i, 10.0 + i as f64))
                .collect(),
            wr: (0..4)
                .map(|i| cand(&format!("{prefix}WR{i}"), Position::WR, 4600 + i, 8.0 + i as f64))
                .collect(),
            te: cand(&format!("{prefix}TE"), Position::TE, 4100, 7.0),
            dst: cand(&format!("{prefix}DST"), Position::DST, 3100, 6.0),
        }
    }

    fn lineup(r: &Roster) -> Lineup {
        Lineup::new(
            r.qb.clone(),
            [r.rb[0].clone(), r.rb[1].clone()],
            [r.wr[0].clone(), r.wr[1].clone(), r.wr[2].clone()],
            r.te.clone(),
            r.rb[2].clone(),
            r.dst.clone(),
        )
    }

    #[test]
    fn test_lineup_length() {
        let r = roster("");
        let l = lineup(&r);
        assert_eq!(l.len(), LINEUP_SIZE);
        assert!(!l.is_empty());
        assert!(l.is_unique());
    }

    #[test]
    fn test_slot_schema_accepts() {
        for (i, c) in lineup(&roster("")).iter() {
            assert!(SLOT_SCHEMA[i].accepts(c.position));
        }
        assert!(SlotKind::Flex.accepts(Position::WR));
        assert!(!SlotKind::Flex.accepts(Position::TE));
    }

    #[test]
    fn test_slot_out_of_range() {
        let r = roster("");
        let mut l = lineup(&r);
        assert!(matches!(
            l.slot(9),
            Err(LineupError::SlotOutOfRange { index: 9, .. })
        ));
        assert!(matches!(
            l.set_slot(12, r.qb.clone()),
            Err(LineupError::SlotOutOfRange { index: 12, .. })
        ));
    }

    #[test]
    fn test_totals_match_fresh_sum() {
        let r = roster("");
        let mut l = lineup(&r);
        let sum_cost: i64 = l.slots().iter().map(|c| c.cost).sum();
        let sum_value: f64 = l.slots().iter().map(|c| c.projected_value).sum();
        assert_eq!(l.total_cost(), sum_cost);
        assert!((l.total_projected_value() - sum_value).abs() < 1e-9);

        // Cached, then invalidated by a slot write
        l.set_slot(FLEX_SLOT, r.wr[3].clone()).unwrap();
        let sum_cost: i64 = l.slots().iter().map(|c| c.cost).sum();
        let sum_value: f64 = l.slots().iter().map(|c| c.projected_value).sum();
        assert_eq!(l.total_cost(), sum_cost);
        assert!((l.total_projected_value() - sum_value).abs() < 1e-9);
    }

    #[test]
    fn test_zero_value_totals() {
        let zero = cand("Z", Position::QB, 0, 0.0);
        let l = Lineup::from_slots(std::array::from_fn(|_| zero.clone()));
        assert_eq!(l.total_cost(), 0);
        assert_eq!(l.total_projected_value(), 0.0);
    }

    #[test]
    fn test_count_occurrences_by_identity() {
        let r = roster("");
        let mut l = lineup(&r);
        assert_eq!(l.count_occurrences(&r.rb[0]), 1);

        l.set_slot(FLEX_SLOT, r.rb[0].clone()).unwrap();
        assert_eq!(l.count_occurrences(&r.rb[0]), 2);

        // Equal data, different allocation
        let twin = Arc::new((*r.rb[0]).clone());
        assert_eq!(l.count_occurrences(&twin), 0);
    }

    #[test]
    fn test_duplicates_rb_pair_reports_later_slot() {
        let r = roster("");
        let mut l = lineup(&r);
        l.set_slot(2, r.rb[0].clone()).unwrap(); // RB = {A, A}, FLEX = B
        assert_eq!(l.duplicate_slot_indices(), vec![2]);
    }

    #[test]
    fn test_duplicates_flex_collision_reports_group_slot() {
        let r = roster("");
        let mut l = lineup(&r);
        l.set_slot(FLEX_SLOT, r.rb[0].clone()).unwrap(); // RB = {A, B}, FLEX = A
        assert_eq!(l.duplicate_slot_indices(), vec![1]);
    }

    #[test]
    fn test_duplicates_flex_checked_before_group() {
        let r = roster("");
        let mut l = lineup(&r);
        // WR = {A, A, B}, FLEX = A
        l.set_slot(4, r.wr[0].clone()).unwrap();
        l.set_slot(FLEX_SLOT, r.wr[0].clone()).unwrap();
        assert_eq!(l.duplicate_slot_indices(), vec![3, 4, 4]);
    }

    #[test]
    fn test_duplicates_wr_triple() {
        let r = roster("");
        let mut l = lineup(&r);
        // WR = {A, B, A}
        l.set_slot(5, r.wr[0].clone()).unwrap();
        assert_eq!(l.duplicate_slot_indices(), vec![5]);
    }

    #[test]
    fn test_no_duplicates() {
        assert!(lineup(&roster("")).duplicate_slot_indices().is_empty());
    }

    #[test]
    fn test_crossover_leaves_parents_untouched() {
        let a = lineup(&roster("a"));
        let b = lineup(&roster("b"));
        let a_before: Vec<_> = a.slots().to_vec();
        let mut rng = SmallRng::seed_from_u64(42);

        let child = a.crossover_with(&b, &mut rng);
        assert_eq!(child.len(), LINEUP_SIZE);
        for (i, c) in child.iter() {
            assert!(Arc::ptr_eq(c, a.slot(i).unwrap()) || Arc::ptr_eq(c, b.slot(i).unwrap()));
        }
        for (before, after) in a_before.iter().zip(a.slots()) {
            assert!(Arc::ptr_eq(before, after));
        }
    }

    #[test]
    fn test_crossover_is_unbiased_per_gene() {
        let a = lineup(&roster("a"));
        let b = lineup(&roster("b"));
        let mut rng = SmallRng::seed_from_u64(42);
        let trials = 4000;
        let mut from_a = [0usize; LINEUP_SIZE];

        for _ in 0..trials {
            let child = a.crossover_with(&b, &mut rng);
            for (i, c) in child.iter() {
                if Arc::ptr_eq(c, a.slot(i).unwrap()) {
                    from_a[i] += 1;
                }
            }
        }
        for count in from_a {
            let p = count as f64 / trials as f64;
            assert!((0.45..0.55).contains(&p), "gene bias {p}");
        }
    }

    #[test]
    fn test_display() {
        let text = lineup(&roster("")).to_string();
        assert!(text.starts_with("QB   QB (QB)"));
        assert!(text.contains("FLEX RB2 (RB)"));
        assert!(text.lines().last().unwrap().starts_with("Total $"));
    }

    #[test]
    fn test_display_shows_team() {
        let r = roster("");
        let mut l = lineup(&r);
        let kc = Arc::new(Candidate::new("Kelce", Position::TE, 7000, 15.0).with_team("KC"));
        l.set_slot(TE_SLOT, kc).unwrap();

        let text = l.to_string();
        assert!(text.contains("TE   Kelce (TE, KC) $7000 15.00"));
    }
}
