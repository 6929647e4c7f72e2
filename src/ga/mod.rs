//! GA-based lineup optimization.
//!
//! A small generational GA ([`GaRunner`]) driven by a problem plug-in
//! ([`GaProblem`]), plus the lineup-specific plug-in ([`LineupGaProblem`])
//! and its operators.
//!
//! # Encoding
//!
//! One gene per lineup slot (QB; RB₁; RB₂; WR₁; WR₂; WR₃; TE; FLEX; DST).
//! Genes are candidate handles drawn from the slot's pool.
//!
//! # Submodules
//!
//! - [`operators`]: initialization, crossover with duplicate repair, mutation
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization, and Machine Learning"
//! Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

mod config;
pub mod operators;
mod problem;
mod runner;
mod selection;

pub use config::GaConfig;
pub use problem::{LineupGaProblem, DEFAULT_SALARY_CAP};
pub use runner::{GaProblem, GaResult, GaRunner, GenerationStats};
pub use selection::Selection;
