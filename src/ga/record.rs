//! Run result records.
//!
//! A [`RunRecord`] is produced once per run and serializes to the JSON
//! document consumed by reporting tools:
//!
//! ```json
//! {
//!   "ga_parameters": { "crossover_rate": 0.9, ..., "seed": 42 },
//!   "generations": [{ "generation": 0, "best_fitness": 0.2, "avg_fitness": 0.05 }, ...],
//!   "best_solution": { "fitness": 0.5, "chromosome": [[0, 2, 7], ...] }
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::operators::CrossoverType;
use crate::error::Result;

/// Parameters a run was executed with, including the seed actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaParameters {
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub max_generations: usize,
    pub crossover_type: CrossoverType,
    pub elitism_rate: f64,
    pub seed: u64,
}

impl GaParameters {
    pub(crate) fn from_config(config: &GaConfig, seed: u64) -> Self {
        Self {
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            max_generations: config.max_generations,
            crossover_type: config.crossover_type,
            elitism_rate: config.elitism_rate,
            seed,
        }
    }
}

/// Fitness summary of one generation, measured before it is evolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub avg_fitness: f64,
}

impl GenerationStats {
    /// Summarizes `fitness`.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn from_fitness(generation: usize, fitness: &[f64]) -> Self {
        assert!(!fitness.is_empty(), "population must not be empty");
        let best_fitness = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;
        Self {
            generation,
            best_fitness,
            avg_fitness,
        }
    }
}

/// The best timetable in the final population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSolution {
    pub fitness: f64,
    pub chromosome: Chromosome,
}

/// Complete outcome of one GA run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub ga_parameters: GaParameters,
    /// One entry per generation; length equals `max_generations`.
    pub generations: Vec<GenerationStats>,
    pub best_solution: BestSolution,
}

impl RunRecord {
    /// The seed the run was executed with.
    pub fn seed(&self) -> u64 {
        self.ga_parameters.seed
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
