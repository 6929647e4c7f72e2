//! Input validation for lineup search.
//!
//! Checks candidate pools before a search starts. Detects:
//! - Duplicate candidate names
//! - Empty pools
//! - Pools too small to fill the lineup with distinct candidates
//! - Negative costs and negative or non-finite projections
//!
//! Minimum pool sizes are derived from [`SLOT_SCHEMA`]: one candidate per
//! fixed slot of the position, and one more RB or WR for FLEX.

use std::collections::HashSet;

use crate::models::{CandidatePools, Position, SlotKind, SLOT_SCHEMA};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two candidates share the same name.
    DuplicateId,
    /// A position has no candidates.
    EmptyPool,
    /// A position has fewer candidates than distinct slots to fill.
    InsufficientCandidates,
    /// A candidate has a negative cost.
    InvalidCost,
    /// A candidate has a negative or non-finite projection.
    InvalidProjection,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Fixed slots per position in the schema.
fn fixed_slots(position: Position) -> usize {
    SLOT_SCHEMA
        .iter()
        .filter(|&&kind| kind == SlotKind::Fixed(position))
        .count()
}

/// Validates candidate pools for a lineup search.
///
/// Checks:
/// 1. No duplicate candidate names
/// 2. Every position pool is nonempty
/// 3. Every position pool can fill its fixed slots with distinct candidates
/// 4. RB + WR pools can additionally fill FLEX
/// 5. Costs are nonnegative; projections are finite and nonnegative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_pools(pools: &CandidatePools) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for candidate in pools.iter() {
        if !names.insert(candidate.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate candidate name: {}", candidate.name),
            ));
        }
        if candidate.cost < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCost,
                format!("Candidate '{}' has negative cost {}", candidate.name, candidate.cost),
            ));
        }
        if !candidate.projected_value.is_finite() || candidate.projected_value < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProjection,
                format!(
                    "Candidate '{}' has invalid projection {}",
                    candidate.name, candidate.projected_value
                ),
            ));
        }
    }

    for position in Position::ALL {
        let available = pools.position(position).len();
        let required = fixed_slots(position);
        if available == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPool,
                format!("No {position} candidates"),
            ));
        } else if available < required {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientCandidates,
                format!("{position} pool has {available} candidate(s), {required} required"),
            ));
        }
    }

    let flex_available = pools.for_kind(SlotKind::Flex).len();
    let flex_required = fixed_slots(Position::RB) + fixed_slots(Position::WR) + 1;
    if flex_available < flex_required {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientCandidates,
            format!(
                "RB + WR pools have {flex_available} candidate(s), \
                 {flex_required} required to fill FLEX"
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
