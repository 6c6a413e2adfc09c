//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates a complete run:
//! seed → random population → (evaluate → record → evolve) × N → best.

use log::{debug, info};

use super::config::GaConfig;
use super::population::{best_index, Population};
use super::record::{BestSolution, GaParameters, GenerationStats, RunRecord};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::random::{create_rng, time_seed};

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_timetable::catalog::{Catalog, Course, Room, TimeSlot};
/// use u_timetable::ga::{GaConfig, GaRunner};
///
/// let catalog = Catalog::new(
///     vec![Course::new("Math 101", "Dr. Smith", 40, 2), Course::new("Physics", "Dr. Smith", 30, 1)],
///     vec![Room::new("Hall A", 100), Room::new("Lab", 35)],
///     vec![TimeSlot::new("Monday", 9), TimeSlot::new("Tuesday", 9)],
/// )
/// .unwrap();
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
/// let record = GaRunner::run(&catalog, &config).unwrap();
/// assert_eq!(record.generations.len(), 10);
/// assert!(record.best_solution.fitness > 0.0);
///
/// // A runner built once can be executed against several catalogs.
/// let runner = GaRunner::new(config).unwrap();
/// assert_eq!(runner.execute(&catalog).unwrap(), record);
/// ```
#[derive(Debug, Clone)]
pub struct GaRunner {
    config: GaConfig,
}

impl GaRunner {
    /// Validates `config` and holds it for later runs.
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Validates `config` and runs it once against `catalog`.
    pub fn run(catalog: &Catalog, config: &GaConfig) -> Result<RunRecord> {
        Self::new(config.clone())?.execute(catalog)
    }

    /// Runs the GA for exactly `max_generations` generations.
    ///
    /// The statistics for generation `g` describe the population *before*
    /// its evolve step; the population produced by the last step is only
    /// reflected in [`RunRecord::best_solution`].
    pub fn execute(&self, catalog: &Catalog) -> Result<RunRecord> {
        let config = &self.config;
        let seed = config.seed.unwrap_or_else(time_seed);
        let mut rng = create_rng(seed);

        info!(
            "starting GA run: seed={seed}, population={}, generations={}, crossover={} @ {}, mutation={}, elitism={}",
            config.population_size,
            config.max_generations,
            config.crossover_type,
            config.crossover_rate,
            config.mutation_rate,
            config.elitism_rate
        );

        let mut population = Population::random(config.population_size, catalog, &mut rng)?;
        let mut generations = Vec::with_capacity(config.max_generations);

        for gen in 0..config.max_generations {
            let fitness = population.evaluate(catalog, config.parallel);
            let stats = GenerationStats::from_fitness(gen, &fitness);
            debug!(
                "Generation {gen}: best = {:.6}, avg = {:.6}",
                stats.best_fitness, stats.avg_fitness
            );
            generations.push(stats);

            population.breed(catalog, &fitness, config, &mut rng)?;
        }

        let fitness = population.evaluate(catalog, config.parallel);
        let best = best_index(&fitness);
        let best_solution = BestSolution {
            fitness: fitness[best],
            chromosome: population.into_individuals().swap_remove(best),
        };

        info!("GA run finished: seed={seed}, best fitness={:.6}", best_solution.fitness);

        Ok(RunRecord {
            ga_parameters: GaParameters::from_config(config, seed),
            generations,
            best_solution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Course, Room, TimeSlot};
    use crate::error::TimetableError;
    use crate::ga::{calculate_fitness, CrossoverType};

    fn catalog() -> Catalog {
        let courses = vec![
            Course::new("Math 101", "Dr. Smith", 71, 2),
            Course::new("Physics 401", "TBD", 42, 3),
            Course::new("Chemistry 201", "Dr. Lee", 55, 1),
            Course::new("Biology 110", "Dr. Lee", 90, 2),
            Course::new("History 210", "Dr. Smith", 28, 1),
            Course::new("Art 105", "Dr. Rossi", 18, 2),
            Course::new("CS 120", "Dr. Rossi", 60, 1),
            Course::new("CS 330", "Dr. Smith", 35, 2),
        ];
        let rooms = vec![
            Room::new("Large Lecture 1", 100),
            Room::new("Lecture 2", 60),
            Room::new("Lab A", 30),
        ];
        let timeslots = ["Monday", "Tuesday", "Wednesday"]
            .iter()
            .flat_map(|d| [9, 11, 14].into_iter().map(move |h| TimeSlot::new(*d, h)))
            .collect();
        Catalog::new(courses, rooms, timeslots).unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(40)
            .with_max_generations(40)
            .with_crossover_rate(0.9)
            .with_mutation_rate(0.1)
            .with_elitism_rate(0.1)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_trace_has_one_entry_per_generation() {
        let record = GaRunner::run(&catalog(), &config()).unwrap();
        assert_eq!(record.generations.len(), 40);
        for (i, g) in record.generations.iter().enumerate() {
            assert_eq!(g.generation, i);
            assert!(g.best_fitness > 0.0 && g.best_fitness <= 1.0);
            assert!(g.avg_fitness <= g.best_fitness);
        }
    }

    #[test]
    fn test_best_fitness_is_monotone_with_elitism() {
        let record = GaRunner::run(&catalog(), &config()).unwrap();
        for w in record.generations.windows(2) {
            assert!(w[1].best_fitness >= w[0].best_fitness, "{w:?}");
        }
        let last = record.generations.last().unwrap();
        assert!(record.best_solution.fitness >= last.best_fitness);
    }

    #[test]
    fn test_best_solution_matches_recomputed_fitness() {
        let cat = catalog();
        let record = GaRunner::run(&cat, &config()).unwrap();
        let best = &record.best_solution;
        assert!(best.chromosome.validate(&cat).is_ok());
        assert_eq!(calculate_fitness(&best.chromosome, &cat), best.fitness);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let cat = catalog();
        for kind in [CrossoverType::OnePoint, CrossoverType::Uniform] {
            let config = config().with_crossover_type(kind);
            let a = GaRunner::run(&cat, &config).unwrap();
            let b = GaRunner::run(&cat, &config).unwrap();
            assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let cat = catalog();
        let seq = GaRunner::run(&cat, &config()).unwrap();
        let par = GaRunner::run(&cat, &config().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_seed_recorded() {
        let record = GaRunner::run(&catalog(), &config().with_seed(777)).unwrap();
        assert_eq!(record.seed(), 777);
        assert_eq!(record.ga_parameters.seed, 777);
    }

    #[test]
    fn test_time_seed_when_unset() {
        let mut config = config().with_max_generations(2);
        config.seed = None;
        let record = GaRunner::run(&catalog(), &config).unwrap();
        assert!(record.seed() > 0);
    }

    #[test]
    fn test_invalid_config_fails_before_running() {
        let err = GaRunner::run(&catalog(), &config().with_elitism_rate(1.0)).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfiguration(_)));

        let err = GaRunner::run(&catalog(), &config().with_population_size(0)).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GaRunner::new(config().with_tournament_size(1)).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_then_execute_matches_run() {
        let cat = catalog();
        let runner = GaRunner::new(config()).unwrap();
        assert_eq!(runner.config().population_size, 40);
        assert_eq!(runner.execute(&cat).unwrap(), GaRunner::run(&cat, &config()).unwrap());
        // Executing twice with a fixed seed repeats the run.
        assert_eq!(runner.execute(&cat).unwrap(), runner.execute(&cat).unwrap());
    }

    #[test]
    fn test_single_generation_records_initial_population() {
        let cat = catalog();
        let config = config().with_max_generations(1);
        let record = GaRunner::run(&cat, &config).unwrap();

        let mut rng = create_rng(42);
        let initial = Population::random(config.population_size, &cat, &mut rng).unwrap();
        let expected = GenerationStats::from_fitness(0, &initial.evaluate(&cat, false));
        assert_eq!(record.generations, vec![expected]);
    }

    #[test]
    fn test_json_document_shape() {
        let record = GaRunner::run(&catalog(), &config().with_max_generations(3)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&record.to_json_pretty().unwrap()).unwrap();

        let params = &value["ga_parameters"];
        assert_eq!(params["crossover_type"], "one_point");
        assert_eq!(params["max_generations"], 3);
        assert_eq!(params["seed"], 42);
        assert_eq!(value["generations"].as_array().unwrap().len(), 3);
        assert_eq!(value["generations"][2]["generation"], 2);

        let chromosome = value["best_solution"]["chromosome"].as_array().unwrap();
        assert_eq!(chromosome.len(), 8);
        assert_eq!(chromosome[5].as_array().unwrap().len(), 3);
        assert_eq!(chromosome[5][0], 5);
    }

    #[test]
    fn test_record_deserializes_from_json() {
        let record = GaRunner::run(&catalog(), &config().with_max_generations(2)).unwrap();
        let back: RunRecord = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(back.ga_parameters.crossover_type, record.ga_parameters.crossover_type);
        assert_eq!(back.generations.len(), 2);
        assert_eq!(back.best_solution.chromosome, record.best_solution.chromosome);
        assert!((back.best_solution.fitness - record.best_solution.fitness).abs() < 1e-12);
    }
}
