//! Benchmark experiments
//!
//! An experiment runs EMNA once on every function of the suite with a fixed
//! experiment index, writing one record file per function.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::algorithms::eda::emna::{Emna, EmnaConfig};
use crate::algorithms::search::SearchLoop;
use crate::error::{EvoResult, EvolutionError, RecordError};
use crate::fitness::benchmarks::BenchmarkSuite;
use crate::fitness::traits::{FitnessDirection, ObjectiveFunction};
use crate::recorder::{RunRecord, ALGORITHM_NAME};
use crate::storage::{record_file_name, save_record, RecordFormat};
use crate::termination::{AnyOf, MaxGenerations, TerminationCriterion, WallClockBudget};

/// Configuration of a benchmark experiment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// EMNA parameters, including the problem dimension
    pub emna: EmnaConfig,
    /// Wall-clock budget per function, in seconds
    pub budget_secs: f64,
    /// Optional cap on generations per function
    pub max_generations: Option<usize>,
    /// Directory record files are written to
    pub output_dir: PathBuf,
    /// Record file format
    pub format: RecordFormat,
    /// Seed all run seeds are derived from
    pub base_seed: u64,
    /// Direction the best-so-far series treats as improvement
    pub record_direction: FitnessDirection,
    /// Restrict the run to these functions (default: the whole suite)
    pub functions: Option<Vec<String>>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            emna: EmnaConfig::default(),
            budget_secs: 10_800.0,
            max_generations: None,
            output_dir: PathBuf::from("."),
            format: RecordFormat::Binary,
            base_seed: 0,
            record_direction: FitnessDirection::Minimize,
            functions: None,
        }
    }
}

impl ExperimentConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> EvoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RecordError::NotFound(path.display().to_string()).into());
        }
        let text = fs::read_to_string(path).map_err(RecordError::from)?;
        serde_json::from_str(&text)
            .map_err(|e| RecordError::Deserialization(e.to_string()).into())
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> EvoResult<()> {
        self.emna.validate()?;
        Duration::try_from_secs_f64(self.budget_secs).map_err(|e| {
            EvolutionError::Configuration(format!(
                "Budget must be a non-negative number of seconds that fits a duration, got {}: {}",
                self.budget_secs, e
            ))
        })?;
        Ok(())
    }

    /// The functions this experiment runs, in order
    pub fn suite(&self) -> EvoResult<BenchmarkSuite> {
        match &self.functions {
            Some(names) => BenchmarkSuite::from_names(self.emna.dimension, names),
            None => BenchmarkSuite::standard(self.emna.dimension),
        }
    }

    /// Termination criterion for a single run
    pub fn termination(&self) -> AnyOf {
        let mut criteria: Vec<Box<dyn TerminationCriterion>> =
            vec![Box::new(WallClockBudget::from_secs_f64(self.budget_secs))];
        if let Some(max) = self.max_generations {
            criteria.push(Box::new(MaxGenerations::new(max)));
        }
        AnyOf::new(criteria)
    }
}

/// Seed for experiment `experiment`, function position `function_index`
pub fn derive_seed(base_seed: u64, experiment: usize, function_index: usize) -> u64 {
    base_seed
        .wrapping_add((experiment as u64) << 16)
        .wrapping_add(function_index as u64)
}

/// A finished run and where it was written
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// The run record
    pub record: RunRecord,
    /// Path of the written record file
    pub path: PathBuf,
}

/// Runs experiments described by an [`ExperimentConfig`]
#[derive(Clone, Debug)]
pub struct ExperimentRunner {
    config: ExperimentConfig,
}

impl ExperimentRunner {
    /// Create a runner, validating the configuration
    pub fn new(config: ExperimentConfig) -> EvoResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run one EMNA search on `objective` with a seeded generator
    pub fn run_function<O: ObjectiveFunction>(&self, objective: O, seed: u64) -> EvoResult<RunRecord> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut emna = Emna::new(self.config.emna.clone(), objective, &mut rng)?;
        SearchLoop::with_termination(self.config.termination())
            .record_direction(self.config.record_direction)
            .run(&mut emna, &mut rng)
    }

    /// Run experiment `index` over the suite, writing one record per function
    pub fn run(&self, index: usize) -> EvoResult<Vec<RunOutcome>> {
        let suite = self.config.suite()?;
        fs::create_dir_all(&self.config.output_dir).map_err(RecordError::from)?;

        info!(
            experiment = index,
            functions = suite.len(),
            dimension = suite.dimension(),
            "Starting experiment"
        );

        let mut outcomes = Vec::with_capacity(suite.len());
        for (k, function) in suite.iter().enumerate() {
            let seed = derive_seed(self.config.base_seed, index, k);
            let record = self
                .run_function(function, seed)?
                .with_experiment(index, seed);

            let path = self.config.output_dir.join(record_file_name(
                ALGORITHM_NAME,
                function.name(),
                suite.dimension(),
                index,
                self.config.format,
            ));
            save_record(&record, &path, self.config.format)?;

            info!(
                function = function.name(),
                runtime = record.runtime,
                best_so_far = record.best_so_far_y,
                path = %path.display(),
                "Record written"
            );
            outcomes.push(RunOutcome { record, path });
        }
        Ok(outcomes)
    }

    /// Total budget of an experiment, ignoring overshoot
    ///
    /// Saturates to `Duration::MAX`.
    pub fn nominal_budget(&self) -> EvoResult<Duration> {
        let functions = self.config.suite()?.len() as f64;
        Ok(Duration::try_from_secs_f64(self.config.budget_secs * functions)
            .unwrap_or(Duration::MAX))
    }
}
