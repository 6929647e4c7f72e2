//! Lineup selection framework for the U-Engine ecosystem.
//!
//! Searches fixed-shape rosters ("lineups") drawn from position-keyed
//! candidate pools, maximizing total projected value under a salary cap.
//! Exhaustive search is infeasible, so a genetic algorithm returns the best
//! lineup found after a fixed number of generations. There is no
//! optimality guarantee.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Candidate`, `Position`, `Lineup`,
//!   `SlotKind`, `CandidatePools`, `CandidateSource`
//! - **`ga`**: Generic GA runner (`GaProblem`, `GaRunner`, `GaConfig`) and
//!   the lineup plug-in (`LineupGaProblem`, operators)
//! - **`search`**: `SearchConfig` and the `LineupSearch` driver
//! - **`validation`**: Pool integrity checks (duplicate names, pool sizes)
//! - **`error`**: `LineupError`
//!
//! # Example
//!
//! ```
//! use u_lineup::models::{Candidate, Position};
//! use u_lineup::search::{LineupSearch, SearchConfig};
//! use u_lineup::ga::GaConfig;
//!
//! let mut candidates = vec![
//!     Candidate::new("QB", Position::QB, 6000, 20.0),
//!     Candidate::new("TE", Position::TE, 4500, 9.0),
//!     Candidate::new("DST", Position::DST, 3200, 7.0),
//! ];
//! for i in 0..4 {
//!     candidates.push(Candidate::new(format!("RB{i}"), Position::RB, 5000, 12.0 + i as f64));
//!     candidates.push(Candidate::new(format!("WR{i}"), Position::WR, 5000, 11.0 + i as f64));
//! }
//!
//! let config = SearchConfig::default()
//!     .with_ga(GaConfig::default().with_num_generations(10).with_seed(42));
//! let mut search = LineupSearch::from_source(&candidates, config).unwrap();
//! search.run_search().unwrap();
//!
//! let best = search.result().unwrap();
//! assert_eq!(best.len(), 9);
//! assert!(best.total_cost() <= 50_000);
//! ```
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization, and Machine Learning"

pub mod error;
pub mod ga;
pub mod models;
pub mod search;
pub mod validation;

pub use error::{LineupError, Result};
