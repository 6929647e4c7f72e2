//! Position-keyed candidate pools.
//!
//! Pools are the sampling universe for initialization, mutation, and
//! duplicate repair. They are built once per run and shared read-only.

use std::error::Error;
use std::sync::Arc;

use tracing::trace;

use super::{Candidate, Position, SlotKind, SLOT_SCHEMA};
use crate::error::Result;

/// Supplies candidates for a search run.
///
/// Implementations are expected to have applied any price-floor or
/// availability filtering already; pools only drop ineligible candidates.
pub trait CandidateSource {
    /// Loads all candidates.
    fn load(&self) -> std::result::Result<Vec<Candidate>, Box<dyn Error + Send + Sync>>;
}

impl CandidateSource for Vec<Candidate> {
    fn load(&self) -> std::result::Result<Vec<Candidate>, Box<dyn Error + Send + Sync>> {
        Ok(self.clone())
    }
}

impl CandidateSource for [Candidate] {
    fn load(&self) -> std::result::Result<Vec<Candidate>, Box<dyn Error + Send + Sync>> {
        Ok(self.to_vec())
    }
}

/// Candidates grouped by position class.
#[derive(Debug, Clone, Default)]
pub struct CandidatePools {
    qb: Vec<Arc<Candidate>>,
    rb: Vec<Arc<Candidate>>,
    wr: Vec<Arc<Candidate>>,
    te: Vec<Arc<Candidate>>,
    dst: Vec<Arc<Candidate>>,
    /// RB pool followed by WR pool (shared handles).
    flex: Vec<Arc<Candidate>>,
}

impl CandidatePools {
    /// Groups candidates by position, dropping ineligible ones.
    pub fn from_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        let mut pools = Self::default();
        for candidate in candidates {
            if !candidate.eligible {
                trace!(name = %candidate.name, "dropping ineligible candidate");
                continue;
            }
            let candidate = Arc::new(candidate);
            match candidate.position {
                Position::QB => pools.qb.push(candidate),
                Position::RB => pools.rb.push(candidate),
                Position::WR => pools.wr.push(candidate),
                Position::TE => pools.te.push(candidate),
                Position::DST => pools.dst.push(candidate),
            }
        }
        pools.flex = pools.rb.iter().chain(pools.wr.iter()).cloned().collect();
        pools
    }

    /// Loads candidates from a source and groups them.
    pub fn from_source<S: CandidateSource + ?Sized>(source: &S) -> Result<Self> {
        let candidates = source.load()?;
        Ok(Self::from_candidates(candidates))
    }

    /// Candidates of one position class.
    pub fn position(&self, position: Position) -> &[Arc<Candidate>] {
        match position {
            Position::QB => &self.qb,
            Position::RB => &self.rb,
            Position::WR => &self.wr,
            Position::TE => &self.te,
            Position::DST => &self.dst,
        }
    }

    /// Candidates eligible for a slot kind.
    pub fn for_kind(&self, kind: SlotKind) -> &[Arc<Candidate>] {
        match kind {
            SlotKind::Fixed(position) => self.position(position),
            SlotKind::Flex => &self.flex,
        }
    }

    /// Candidates eligible for slot `index`. Empty for indices outside the schema.
    pub fn for_slot(&self, index: usize) -> &[Arc<Candidate>] {
        SLOT_SCHEMA
            .get(index)
            .map(|&kind| self.for_kind(kind))
            .unwrap_or(&[])
    }

    /// All pooled candidates (each once).
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Candidate>> {
        Position::ALL
            .into_iter()
            .flat_map(move |p| self.position(p).iter())
    }

    /// Total number of pooled candidates.
    pub fn len(&self) -> usize {
        Position::ALL.iter().map(|&p| self.position(p).len()).sum()
    }

    /// Whether no candidates were pooled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FLEX_SLOT;

    fn sample() -> Vec<Candidate> {
        vec![
            Candidate::new("QB1", Position::QB, 6000, 20.0),
            Candidate::new("RB1", Position::RB, 5000, 12.0),
            Candidate::new("RB2", Position::RB, 4800, 11.0).with_eligible(false),
            Candidate::new("WR1", Position::WR, 4700, 10.0),
            Candidate::new("TE1", Position::TE, 4200, 8.0),
            Candidate::new("DST1", Position::DST, 3200, 7.0),
        ]
    }

    #[test]
    fn test_grouping_drops_ineligible() {
        let pools = CandidatePools::from_candidates(sample());
        assert_eq!(pools.len(), 5);
        assert_eq!(pools.position(Position::RB).len(), 1);
        assert_eq!(pools.position(Position::QB)[0].name, "QB1");
    }

    #[test]
    fn test_flex_pool_shares_handles() {
        let pools = CandidatePools::from_candidates(sample());
        let flex = pools.for_slot(FLEX_SLOT);
        assert_eq!(flex.len(), 2);
        assert!(Arc::ptr_eq(&flex[0], &pools.position(Position::RB)[0]));
        assert!(Arc::ptr_eq(&flex[1], &pools.position(Position::WR)[0]));
    }

    #[test]
    fn test_for_slot_follows_schema() {
        let pools = CandidatePools::from_candidates(sample());
        assert_eq!(pools.for_slot(0)[0].position, Position::QB);
        assert_eq!(pools.for_slot(6)[0].position, Position::TE);
        assert_eq!(pools.for_slot(8)[0].position, Position::DST);
        assert!(pools.for_slot(9).is_empty());
    }

    #[test]
    fn test_from_source() {
        let source = sample();
        let pools = CandidatePools::from_source(&source).unwrap();
        assert_eq!(pools.iter().count(), 5);
        assert!(!pools.is_empty());
    }

    struct FailingSource;

    impl CandidateSource for FailingSource {
        fn load(&self) -> std::result::Result<Vec<Candidate>, Box<dyn Error + Send + Sync>> {
            Err("missing column 'Salary'".into())
        }
    }

    #[test]
    fn test_from_source_error() {
        let err = CandidatePools::from_source(&FailingSource).unwrap_err();
        assert!(err.to_string().contains("Salary"));
    }
}
