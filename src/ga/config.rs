//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::CrossoverType;
use crate::error::{Result, TimetableError};

/// Configuration for the timetabling GA.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::{CrossoverType, GaConfig};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 150);
/// assert_eq!(config.crossover_type, CrossoverType::OnePoint);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{CrossoverType, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_crossover_type(CrossoverType::Uniform)
///     .with_elitism_rate(0.1)
///     .with_mutation_rate(0.25)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
///
/// Setters store values as given; out-of-range values are reported by
/// [`validate`](Self::validate) instead of being clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of generations to run. Always executed in full.
    pub max_generations: usize,

    /// Probability of recombining a selected parent pair (0.0–1.0).
    ///
    /// When crossover is not applied, copies of both parents are used.
    pub crossover_rate: f64,

    /// Per-gene probability of mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Recombination strategy.
    pub crossover_type: CrossoverType,

    /// Fraction of the population carried over unchanged (0.0 inclusive to
    /// 1.0 exclusive). At least one elite is always kept.
    pub elitism_rate: f64,

    /// Competitors sampled per tournament; the best two become parents.
    pub tournament_size: usize,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled. Results are
    /// identical either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` derives a seed from the current time; the seed actually used
    /// is reported in the run record.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 150,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            crossover_type: CrossoverType::OnePoint,
            elitism_rate: 0.05,
            tournament_size: 4,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover_type(mut self, kind: CrossoverType) -> Self {
        self.crossover_type = kind;
        self
    }

    /// Sets the elitism rate.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elites kept per generation: `max(1, floor(size * rate))`.
    pub fn elite_count(&self) -> usize {
        elite_count(self.population_size, self.elitism_rate)
    }

    /// Validates the configuration.
    ///
    /// Returns [`TimetableError::InvalidConfiguration`] describing the first
    /// invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TimetableError::config("population_size must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(TimetableError::config("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(TimetableError::config(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TimetableError::config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..1.0).contains(&self.elitism_rate) {
            return Err(TimetableError::config(format!(
                "elitism_rate must be in [0, 1), got {}",
                self.elitism_rate
            )));
        }
        if self.tournament_size < 2 {
            return Err(TimetableError::config("tournament_size must be at least 2"));
        }
        // Tournaments only run when elites leave room for offspring.
        if self.elite_count() < self.population_size && self.tournament_size > self.population_size
        {
            return Err(TimetableError::config(format!(
                "tournament_size {} exceeds population_size {}",
                self.tournament_size, self.population_size
            )));
        }
        Ok(())
    }
}

pub(crate) fn elite_count(population_size: usize, elitism_rate: f64) -> usize {
    ((population_size as f64 * elitism_rate) as usize).max(1)
}
