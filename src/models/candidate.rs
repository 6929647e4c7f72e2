//! Candidate (draftable player) model.
//!
//! A candidate is an immutable record loaded once per search run. Pools own
//! candidates behind `Arc`; lineups hold clones of those `Arc`s, so identity
//! is pointer identity and no candidate data is ever copied into a lineup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position class of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Quarterback.
    QB,
    /// Running back (FLEX eligible).
    RB,
    /// Wide receiver (FLEX eligible).
    WR,
    /// Tight end.
    TE,
    /// Defense / special teams.
    DST,
}

impl Position {
    /// All position classes in schema order.
    pub const ALL: [Position; 5] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::DST,
    ];

    /// Whether candidates of this class may occupy the FLEX slot.
    pub fn is_flex_eligible(self) -> bool {
        matches!(self, Position::RB | Position::WR)
    }

    /// Short label.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A draftable entity.
///
/// # Units
/// `cost` is in whole currency units (the same unit as the salary cap).
/// `projected_value` is the expected score, nonnegative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name, unique within a run.
    pub name: String,
    /// Cost in currency units.
    pub cost: i64,
    /// Projected score.
    pub projected_value: f64,
    /// Position class.
    pub position: Position,
    /// Team abbreviation (informational).
    #[serde(default)]
    pub team: String,
    /// Whether the candidate may be drafted (false = unavailable).
    #[serde(default = "default_eligible")]
    pub eligible: bool,
}

fn default_eligible() -> bool {
    true
}

impl Candidate {
    /// Creates an eligible candidate.
    pub fn new(
        name: impl Into<String>,
        position: Position,
        cost: i64,
        projected_value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            projected_value,
            position,
            team: String::new(),
            eligible: true,
        }
    }

    /// Sets the team abbreviation.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    /// Sets the eligibility flag.
    pub fn with_eligible(mut self, eligible: bool) -> Self {
        self.eligible = eligible;
        self
    }
}

/// `Name (POS)`, or `Name (POS, TEAM)` when the team is known.
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.team.is_empty() {
            write!(f, "{} ({})", self.name, self.position)
        } else {
            write!(f, "{} ({}, {})", self.name, self.position, self.team)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let c = Candidate::new("Patrick Mahomes", Position::QB, 8100, 24.3)
            .with_team("KC")
            .with_eligible(false);

        assert_eq!(c.name, "Patrick Mahomes");
        assert_eq!(c.position, Position::QB);
        assert_eq!(c.cost, 8100);
        assert_eq!(c.team, "KC");
        assert!(!c.eligible);
    }

    #[test]
    fn test_candidate_display() {
        let c = Candidate::new("Travis Kelce", Position::TE, 7000, 15.0);
        assert_eq!(c.to_string(), "Travis Kelce (TE)");
        assert_eq!(c.with_team("KC").to_string(), "Travis Kelce (TE, KC)");
    }

    #[test]
    fn test_flex_eligibility() {
        assert!(Position::RB.is_flex_eligible());
        assert!(Position::WR.is_flex_eligible());
        assert!(!Position::QB.is_flex_eligible());
        assert!(!Position::TE.is_flex_eligible());
        assert!(!Position::DST.is_flex_eligible());
    }

    #[test]
    fn test_candidate_deserialize_defaults() {
        let json = r#"{"name":"Bills","cost":3200,"projected_value":8.5,"position":"DST"}"#;
        let c: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(c.position, Position::DST);
        assert!(c.eligible);
        assert!(c.team.is_empty());
    }
}
