#![forbid(unsafe_code)]
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::{debug, error, info};
use u_timetable::catalog;
use u_timetable::experiment::{self, SweepGrid};
use u_timetable::ga::{CrossoverType, GaConfig, GaRunner};
use u_timetable::random::time_seed;

#[derive(Debug, Parser)]
/// Course timetabling with a genetic algorithm
struct App {
    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the GA on a catalog directory and write the JSON run record
    Run {
        /// Directory holding courses.txt, rooms.txt and timeslots.txt
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value_t = 100)]
        population: usize,
        #[arg(long, default_value_t = 150)]
        generations: usize,
        #[arg(long, default_value_t = 0.9)]
        crossover_rate: f64,
        #[arg(long, default_value_t = 0.1)]
        mutation_rate: f64,
        /// one_point or uniform
        #[arg(long, default_value = "one_point")]
        crossover: CrossoverType,
        #[arg(long, default_value_t = 0.05)]
        elitism: f64,
        /// Defaults to the current UNIX time
        #[arg(long)]
        seed: Option<u64>,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run every crossover type, crossover rate and mutation rate
    /// combination over several seeds, writing one JSON record per run
    Sweep {
        /// Directory holding courses.txt, rooms.txt and timeslots.txt
        #[arg(long)]
        data: PathBuf,
        /// Label used in the output tree; defaults to the data directory name
        #[arg(long)]
        problem_set: Option<String>,
        #[arg(long, default_value = "ga_results")]
        output_dir: PathBuf,
        #[arg(long, value_delimiter = ',', default_values = ["uniform", "one_point"])]
        crossover: Vec<CrossoverType>,
        #[arg(long, value_delimiter = ',', default_values = ["0.9", "1.0"])]
        crossover_rates: Vec<f64>,
        #[arg(long, value_delimiter = ',', default_values = ["0.0", "0.1"])]
        mutation_rates: Vec<f64>,
        #[arg(long, default_value_t = 100)]
        population: usize,
        #[arg(long, default_value_t = 150)]
        generations: usize,
        #[arg(long, default_value_t = 0.1)]
        elitism: f64,
        /// Runs per configuration
        #[arg(long, default_value_t = 5)]
        seeds: u64,
        /// First seed; later runs count up from it. Defaults to the current UNIX time
        #[arg(long)]
        base_seed: Option<u64>,
    },
    /// Summarize the records a sweep wrote for one problem set
    Summarize {
        #[arg(long, default_value = "ga_results")]
        results_dir: PathBuf,
        #[arg(long)]
        problem_set: String,
        /// Also write the summary as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args: App = App::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{args:?}");

    if let Err(err) = match args.command {
        Commands::Run {
            data,
            population,
            generations,
            crossover_rate,
            mutation_rate,
            crossover,
            elitism,
            seed,
            output,
        } => {
            let mut config = GaConfig::default()
                .with_population_size(population)
                .with_max_generations(generations)
                .with_crossover_rate(crossover_rate)
                .with_mutation_rate(mutation_rate)
                .with_crossover_type(crossover)
                .with_elitism_rate(elitism);
            config.seed = seed;
            run(data, config, output)
        }
        Commands::Sweep {
            data,
            problem_set,
            output_dir,
            crossover,
            crossover_rates,
            mutation_rates,
            population,
            generations,
            elitism,
            seeds,
            base_seed,
        } => {
            let problem_set = problem_set.unwrap_or_else(|| {
                data.file_name()
                    .map_or_else(|| "default".to_string(), |n| n.to_string_lossy().into_owned())
            });
            let base_seed = base_seed.unwrap_or_else(time_seed);
            let grid = SweepGrid::new(problem_set)
                .with_crossover_types(crossover)
                .with_crossover_rates(crossover_rates)
                .with_mutation_rates(mutation_rates)
                .with_seeds((base_seed..base_seed.saturating_add(seeds)).collect())
                .with_base(
                    GaConfig::default()
                        .with_population_size(population)
                        .with_max_generations(generations)
                        .with_elitism_rate(elitism),
                );
            sweep(data, grid, output_dir)
        }
        Commands::Summarize {
            results_dir,
            problem_set,
            output,
        } => summarize(results_dir, &problem_set, output),
    } {
        error!("An error occurred: {err:#}");
        std::process::exit(1);
    }
}

fn run(data: PathBuf, config: GaConfig, output: Option<PathBuf>) -> Result<()> {
    let catalog = catalog::load_dir(&data)
        .with_context(|| format!("loading catalog from {}", data.display()))?;
    let record = GaRunner::run(&catalog, &config)?;
    let json = record.to_json_pretty()?;

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(
                "seed {} best fitness {:.6} written to {}",
                record.seed(),
                record.best_solution.fitness,
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn sweep(data: PathBuf, grid: SweepGrid, output_dir: PathBuf) -> Result<()> {
    let catalog = catalog::load_dir(&data)
        .with_context(|| format!("loading catalog from {}", data.display()))?;
    let written = experiment::run_sweep(&catalog, &grid, &output_dir)
        .with_context(|| format!("sweeping into {}", output_dir.display()))?;
    info!("wrote {} run records under {}", written.len(), output_dir.display());
    Ok(())
}

fn summarize(results_dir: PathBuf, problem_set: &str, output: Option<PathBuf>) -> Result<()> {
    let summary = experiment::summarize_dir(&results_dir, problem_set)
        .with_context(|| format!("reading results from {}", results_dir.display()))?;
    if summary.is_empty() {
        anyhow::bail!("no run records for problem set {problem_set} in {}", results_dir.display());
    }
    print!("{summary}");

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("summary written to {}", path.display());
    }
    Ok(())
}
