//! Lineup domain models.
//!
//! Provides the core data types for roster selection: the candidates that
//! can be drafted, the fixed-shape lineup they are drafted into, and the
//! position-keyed pools that lineups sample from.
//!
//! # Ownership
//!
//! | Type | Owns | Shared via |
//! |------|------|-----------|
//! | `CandidatePools` | every `Candidate` of a run | `Arc<Candidate>` |
//! | `Lineup` | its own slot array | cloned `Arc` handles |

mod candidate;
mod lineup;
mod pools;

pub use candidate::{Candidate, Position};
pub use lineup::{
    Lineup, SlotKind, DST_SLOT, FLEX_SLOT, LINEUP_SIZE, QB_SLOT, RB_SLOTS, SLOT_SCHEMA, TE_SLOT,
    WR_SLOTS,
};
pub use pools::{CandidatePools, CandidateSource};
