//! Benchmark EMNA on the standard suite or dump a 2D landscape.
//!
//! Usage:
//!   emna-bench run --index 0 --budget-secs 60 --dimension 100
//!   emna-bench landscape --function rosenbrock --num 200 --output grid.json

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use emna_bench::experiment::{ExperimentConfig, ExperimentRunner};
use emna_bench::fitness::benchmarks::benchmark_by_name;
use emna_bench::landscape::LandscapeGrid;
use emna_bench::storage::RecordFormat;

#[derive(Parser)]
#[command(name = "emna-bench")]
#[command(about = "Benchmark isotropic EMNA on continuous minimization problems")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one experiment over the benchmark suite
    Run {
        /// Experiment index, used in file names and seed derivation
        #[arg(short, long)]
        index: usize,

        /// JSON experiment configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory record files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Wall-clock budget per function, in seconds
        #[arg(long)]
        budget_secs: Option<f64>,

        /// Cap on generations per function
        #[arg(long)]
        max_generations: Option<usize>,

        /// Problem dimension
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Base seed
        #[arg(long)]
        seed: Option<u64>,

        /// Record file format
        #[arg(long, value_enum)]
        format: Option<RecordFormat>,

        /// Comma-separated subset of functions to run
        #[arg(long, value_delimiter = ',')]
        functions: Option<Vec<String>>,
    },

    /// Sample a benchmark function on a 2D grid and write it as JSON
    Landscape {
        /// Benchmark function name
        #[arg(short, long)]
        function: String,

        /// Lower bound of the x axis
        #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
        x_min: f64,

        /// Upper bound of the x axis
        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        x_max: f64,

        /// Lower bound of the y axis
        #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
        y_min: f64,

        /// Upper bound of the y axis
        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        y_max: f64,

        /// Samples per axis
        #[arg(short, long, default_value_t = 100)]
        num: usize,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Run {
            index,
            config,
            output_dir,
            budget_secs,
            max_generations,
            dimension,
            seed,
            format,
            functions,
        } => {
            let mut config = match config {
                Some(path) => ExperimentConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ExperimentConfig::default(),
            };
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(secs) = budget_secs {
                config.budget_secs = secs;
            }
            if max_generations.is_some() {
                config.max_generations = max_generations;
            }
            if let Some(dimension) = dimension {
                config.emna.dimension = dimension;
            }
            if let Some(seed) = seed {
                config.base_seed = seed;
            }
            if let Some(format) = format {
                config.format = format;
            }
            if functions.is_some() {
                config.functions = functions;
            }

            let runner = ExperimentRunner::new(config).context("Invalid experiment configuration")?;
            let start = Instant::now();
            let outcomes = runner
                .run(index)
                .with_context(|| format!("Experiment {} failed", index))?;

            for outcome in &outcomes {
                println!(
                    "{:<18} best {:>14.6e}  evals {:>10}  runtime {:>10.2}s  -> {}",
                    outcome.record.function,
                    outcome.record.best_so_far_y,
                    outcome.record.n_function_evaluations,
                    outcome.record.runtime,
                    outcome.path.display()
                );
            }
            println!("Total runtime: {:.3}s", start.elapsed().as_secs_f64());
        }

        Command::Landscape {
            function,
            x_min,
            x_max,
            y_min,
            y_max,
            num,
            output,
        } => {
            let Some(objective) = benchmark_by_name(&function) else {
                bail!("Unknown benchmark function: {}", function);
            };
            let grid = LandscapeGrid::sample(objective.as_ref(), (x_min, x_max), (y_min, y_max), num)
                .with_context(|| format!("Failed to sample {}", function))?;
            let json = serde_json::to_string(&grid)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "Wrote {}x{} grid of {} to {} (min {:?}, max {:?})",
                        num,
                        num,
                        function,
                        path.display(),
                        grid.min(),
                        grid.max()
                    );
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
