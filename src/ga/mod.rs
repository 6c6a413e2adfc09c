//! Genetic Algorithm for course timetabling.
//!
//! A chromosome assigns every catalog course a room and a timeslot; the GA
//! minimizes conflicts (capacity overflow, room double-booking, professor
//! overlap) through elitist generational replacement with tournament
//! selection.
//!
//! # Key Types
//!
//! - [`Chromosome`] / [`Gene`]: position-indexed timetable encoding
//! - [`Population`]: one generation, with [`Population::evolve`]
//! - [`GaConfig`]: algorithm parameters, validated up front
//! - [`GaRunner`]: executes a full run and returns a [`RunRecord`]
//!
//! # Submodules
//!
//! - [`operators`]: generic one-point and uniform crossover
//! - [`fitness`]: conflict counting and the `1 / (1 + conflicts)` score
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod chromosome;
mod config;
pub mod fitness;
pub mod operators;
mod population;
mod record;
mod runner;
mod selection;

pub use chromosome::{Chromosome, Gene};
pub use config::GaConfig;
pub use fitness::{calculate_fitness, conflict_breakdown, count_conflicts, ConflictBreakdown};
pub use operators::CrossoverType;
pub use population::Population;
pub use record::{BestSolution, GaParameters, GenerationStats, RunRecord};
pub use runner::GaRunner;
pub use selection::tournament_pair;
