//! Per-configuration statistics over stored sweep results.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::error::{Result, TimetableError};
use crate::ga::{CrossoverType, RunRecord};

/// Descriptive statistics of a fitness sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitnessStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub median: f64,
}

impl FitnessStats {
    /// Returns `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            mean,
            max: sorted[sorted.len() - 1],
            min: sorted[0],
            std_dev: variance.sqrt(),
            median,
        })
    }
}

/// Statistics for one (crossover type, crossover rate, mutation rate) cell.
///
/// The sample pools every generation's best fitness from every run, plus
/// each run's final best fitness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSummary {
    pub crossover_type: CrossoverType,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub runs: usize,
    pub stats: FitnessStats,
}

impl ConfigSummary {
    fn label(&self) -> String {
        format!(
            "({}, {:?}, {:?})",
            self.crossover_type, self.crossover_rate, self.mutation_rate
        )
    }
}

/// Configurations ranked by mean best fitness, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    configs: Vec<ConfigSummary>,
}

impl Summary {
    pub fn configs(&self) -> &[ConfigSummary] {
        &self.configs
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// The `n` highest-ranked configurations.
    pub fn most_successful(&self, n: usize) -> &[ConfigSummary] {
        &self.configs[..n.min(self.configs.len())]
    }

    /// The `n` lowest-ranked configurations, still in ranking order.
    pub fn least_successful(&self, n: usize) -> &[ConfigSummary] {
        &self.configs[self.configs.len().saturating_sub(n)..]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary of Findings:")?;
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "Most Successful Configurations:")?;
        for (i, c) in self.most_successful(3).iter().enumerate() {
            writeln!(f, "{}. {}: Mean Best Fitness = {:.4}", i + 1, c.label(), c.stats.mean)?;
        }
        writeln!(f)?;
        writeln!(f, "Least Successful Configurations:")?;
        for (i, c) in self.least_successful(3).iter().enumerate() {
            writeln!(f, "{}. {}: Mean Best Fitness = {:.4}", i + 1, c.label(), c.stats.mean)?;
        }
        writeln!(f)?;
        writeln!(f, "Overall Metrics:")?;
        for c in &self.configs {
            writeln!(f, "{} over {} runs:", c.label(), c.runs)?;
            writeln!(f, "  mean_best_fitness: {:.4}", c.stats.mean)?;
            writeln!(f, "  max_fitness: {:.4}", c.stats.max)?;
            writeln!(f, "  min_fitness: {:.4}", c.stats.min)?;
            writeln!(f, "  std_dev_fitness: {:.4}", c.stats.std_dev)?;
            writeln!(f, "  median_fitness: {:.4}", c.stats.median)?;
        }
        Ok(())
    }
}

/// Groups `records` by configuration and ranks the groups.
///
/// Groups keep first-seen order before the stable ranking, so ties stay
/// in input order.
pub fn summarize(records: &[RunRecord]) -> Summary {
    let mut groups: Vec<((CrossoverType, f64, f64), usize, Vec<f64>)> = Vec::new();

    for record in records {
        let params = &record.ga_parameters;
        let key = (params.crossover_type, params.crossover_rate, params.mutation_rate);
        let idx = match groups.iter().position(|(k, _, _)| *k == key) {
            Some(idx) => idx,
            None => {
                groups.push((key, 0, Vec::new()));
                groups.len() - 1
            }
        };
        let (_, runs, values) = &mut groups[idx];
        *runs += 1;
        values.extend(record.generations.iter().map(|g| g.best_fitness));
        values.push(record.best_solution.fitness);
    }

    let mut configs: Vec<ConfigSummary> = groups
        .into_iter()
        .filter_map(|((crossover_type, crossover_rate, mutation_rate), runs, values)| {
            FitnessStats::from_values(&values).map(|stats| ConfigSummary {
                crossover_type,
                crossover_rate,
                mutation_rate,
                runs,
                stats,
            })
        })
        .collect();
    configs.sort_by(|a, b| b.stats.mean.total_cmp(&a.stats.mean));

    Summary { configs }
}

/// Reads every `*.json` run record below `<root>/problemset_(<set>)`, in
/// path order.
pub fn load_records(root: impl AsRef<Path>, problem_set: &str) -> Result<Vec<RunRecord>> {
    let base = root.as_ref().join(format!("problemset_({problem_set})"));
    let mut records = Vec::new();

    for type_dir in sorted_entries(&base)?.into_iter().filter(|p| p.is_dir()) {
        for config_dir in sorted_entries(&type_dir)?.into_iter().filter(|p| p.is_dir()) {
            for file in sorted_entries(&config_dir)? {
                if file.extension().is_some_and(|ext| ext == "json") {
                    records.push(read_record(&file)?);
                }
            }
        }
    }

    debug!("loaded {} run records from {}", records.len(), base.display());
    Ok(records)
}

/// [`load_records`] followed by [`summarize`].
pub fn summarize_dir(root: impl AsRef<Path>, problem_set: &str) -> Result<Summary> {
    Ok(summarize(&load_records(root, problem_set)?))
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

fn read_record(path: &Path) -> Result<RunRecord> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|err| TimetableError::Parse {
        file: path.to_path_buf(),
        line: err.line(),
        message: err.to_string(),
    })
}
