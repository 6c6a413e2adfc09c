//! Grid sweeps over crossover and mutation settings.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::catalog::Catalog;
use crate::error::{Result, TimetableError};
use crate::ga::{CrossoverType, GaConfig, GaRunner};

/// The cartesian grid a sweep walks, plus the settings shared by every run.
///
/// # Usage
///
/// ```
/// use u_timetable::experiment::SweepGrid;
///
/// let grid = SweepGrid::new("t1").with_seeds(vec![1, 2]);
/// assert_eq!(grid.configs().len(), 8);
/// assert_eq!(grid.run_count(), 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGrid {
    /// Label for the catalog, used in the output directory name.
    pub problem_set: String,
    pub crossover_types: Vec<CrossoverType>,
    pub crossover_rates: Vec<f64>,
    pub mutation_rates: Vec<f64>,
    /// One run per seed for every configuration.
    pub seeds: Vec<u64>,
    /// Population size, generation count, elitism, and parallelism for
    /// every run. Its rates, crossover type, and seed are overridden.
    pub base: GaConfig,
}

impl SweepGrid {
    /// The standard grid: both crossover types, crossover rates 0.9 and
    /// 1.0, mutation rates 0.0 and 0.1, elitism 0.1, seeds 1 through 5.
    pub fn new(problem_set: impl Into<String>) -> Self {
        Self {
            problem_set: problem_set.into(),
            crossover_types: vec![CrossoverType::Uniform, CrossoverType::OnePoint],
            crossover_rates: vec![0.9, 1.0],
            mutation_rates: vec![0.0, 0.1],
            seeds: (1..=5).collect(),
            base: GaConfig::default().with_elitism_rate(0.1),
        }
    }

    pub fn with_crossover_types(mut self, types: Vec<CrossoverType>) -> Self {
        self.crossover_types = types;
        self
    }

    pub fn with_crossover_rates(mut self, rates: Vec<f64>) -> Self {
        self.crossover_rates = rates;
        self
    }

    pub fn with_mutation_rates(mut self, rates: Vec<f64>) -> Self {
        self.mutation_rates = rates;
        self
    }

    pub fn with_seeds(mut self, seeds: Vec<u64>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_base(mut self, base: GaConfig) -> Self {
        self.base = base;
        self
    }

    /// One configuration per grid cell, crossover type outermost. Seeds
    /// are left unset.
    pub fn configs(&self) -> Vec<GaConfig> {
        let mut configs = Vec::new();
        for &kind in &self.crossover_types {
            for &crossover_rate in &self.crossover_rates {
                for &mutation_rate in &self.mutation_rates {
                    let mut config = self
                        .base
                        .clone()
                        .with_crossover_type(kind)
                        .with_crossover_rate(crossover_rate)
                        .with_mutation_rate(mutation_rate);
                    config.seed = None;
                    configs.push(config);
                }
            }
        }
        configs
    }

    pub fn run_count(&self) -> usize {
        self.crossover_types.len()
            * self.crossover_rates.len()
            * self.mutation_rates.len()
            * self.seeds.len()
    }

    /// Rejects an empty axis, a repeated seed, or any grid cell whose
    /// configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.problem_set.is_empty() {
            return Err(TimetableError::config("problem set label must not be empty"));
        }
        if self.run_count() == 0 {
            return Err(TimetableError::config("sweep grid has an empty axis"));
        }
        let mut seeds = self.seeds.clone();
        seeds.sort_unstable();
        seeds.dedup();
        if seeds.len() != self.seeds.len() {
            return Err(TimetableError::config("sweep seeds must be distinct"));
        }
        for config in self.configs() {
            config.validate()?;
        }
        Ok(())
    }
}

/// Directory that holds every seed of one configuration.
pub fn config_dir(root: impl AsRef<Path>, problem_set: &str, config: &GaConfig) -> PathBuf {
    root.as_ref()
        .join(format!("problemset_({problem_set})"))
        .join(format!("crossovertype({})", config.crossover_type))
        .join(format!(
            "crossoverrate({:?})_mutationrate({:?})",
            config.crossover_rate, config.mutation_rate
        ))
}

/// Runs every configuration of `grid` once per seed against `catalog`,
/// writing each record as pretty JSON below `root`.
///
/// The grid is validated before any run starts. Returns the written
/// paths in run order.
pub fn run_sweep(catalog: &Catalog, grid: &SweepGrid, root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    grid.validate()?;
    let root = root.as_ref();

    info!(
        "starting sweep of {} runs for problem set {} into {}",
        grid.run_count(),
        grid.problem_set,
        root.display()
    );

    let mut written = Vec::with_capacity(grid.run_count());
    for config in grid.configs() {
        let dir = config_dir(root, &grid.problem_set, &config);
        fs::create_dir_all(&dir)?;

        for &seed in &grid.seeds {
            let record = GaRunner::new(config.clone().with_seed(seed))?.execute(catalog)?;
            let path = dir.join(format!("seed({seed}).json"));
            fs::write(&path, record.to_json_pretty()?)?;
            info!(
                "{} cr={} mr={} seed={seed}: best fitness {:.6}",
                config.crossover_type,
                config.crossover_rate,
                config.mutation_rate,
                record.best_solution.fitness
            );
            written.push(path);
        }
    }

    Ok(written)
}
