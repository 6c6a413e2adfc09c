//! University course timetabling by genetic search.
//!
//! Assigns every course a room and a timeslot so as to minimize
//! scheduling conflicts:
//!
//! - **Catalog**: immutable courses, rooms, and timeslots, loadable from
//!   comma-separated files.
//! - **Genetic Algorithm (GA)**: position-indexed chromosomes, one-point and
//!   uniform crossover, per-gene mutation, tournament selection, elitism.
//! - **Run records**: per-generation fitness traces and the best timetable,
//!   serializable to JSON.
//! - **Experiments**: parameter sweeps written to a directory tree, and
//!   per-configuration fitness summaries read back from it.
//!
//! # Architecture
//!
//! Every run owns a single seeded generator (see [`random`]), so a seed and
//! a configuration fully determine the result. Fitness is a pure function
//! of a chromosome and the catalog and may be evaluated in parallel with
//! the `parallel` feature.

pub mod catalog;
pub mod error;
pub mod experiment;
pub mod ga;
pub mod random;

pub use error::{Result, TimetableError};
