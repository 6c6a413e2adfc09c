//! Parameter sweeps and their summaries.
//!
//! A sweep runs the GA once per (crossover type, crossover rate, mutation
//! rate, seed) combination and stores each [`RunRecord`](crate::ga::RunRecord)
//! under a fixed directory layout:
//!
//! ```text
//! <root>/problemset_(<set>)/crossovertype(<type>)/crossoverrate(<cr>)_mutationrate(<mr>)/seed(<seed>).json
//! ```
//!
//! [`summarize_dir`] reads that tree back and ranks the configurations by
//! mean best fitness.

mod summary;
mod sweep;

pub use summary::{load_records, summarize, summarize_dir, ConfigSummary, FitnessStats, Summary};
pub use sweep::{config_dir, run_sweep, SweepGrid};
