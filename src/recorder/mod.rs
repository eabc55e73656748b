//! Best-so-far recording
//!
//! This module accumulates the per-evaluation convergence curve of a run and
//! packages it into a [`RunRecord`] at the end.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::FitnessDirection;

/// Algorithm label written into records and file names
pub const ALGORITHM_NAME: &str = "EMNA";

/// Accumulates `(evaluation count, best-so-far fitness)` pairs
///
/// One pair is appended per evaluation. The series is monotone in the
/// recorder's direction and its length always equals the evaluation count.
#[derive(Clone, Debug)]
pub struct BestSoFarRecorder {
    direction: FitnessDirection,
    series: Vec<(usize, f64)>,
}

impl BestSoFarRecorder {
    /// Create an empty recorder
    pub fn new(direction: FitnessDirection) -> Self {
        Self {
            direction,
            series: Vec::new(),
        }
    }

    /// Record one evaluation and return the best-so-far value after it
    pub fn record(&mut self, fitness: f64) -> f64 {
        let best = match self.best() {
            Some(previous) if !self.direction.is_better(&fitness, &previous) => previous,
            _ => fitness,
        };
        self.series.push((self.series.len() + 1, best));
        best
    }

    /// Direction used to decide improvements
    pub fn direction(&self) -> FitnessDirection {
        self.direction
    }

    /// Number of evaluations recorded
    pub fn evaluations(&self) -> usize {
        self.series.len()
    }

    /// Current best-so-far value
    pub fn best(&self) -> Option<f64> {
        self.series.last().map(|&(_, best)| best)
    }

    /// The recorded series
    pub fn series(&self) -> &[(usize, f64)] {
        &self.series
    }

    /// Package the series into a run record
    ///
    /// Fails if nothing has been recorded.
    pub fn into_record(
        self,
        function: impl Into<String>,
        dimension: usize,
        runtime: Duration,
    ) -> EvoResult<RunRecord> {
        let &(n_function_evaluations, best_so_far_y) =
            self.series.last().ok_or_else(|| {
                EvolutionError::Configuration("No evaluations recorded".to_string())
            })?;
        Ok(RunRecord {
            algorithm: ALGORITHM_NAME.to_string(),
            function: function.into(),
            dimension,
            experiment: None,
            seed: None,
            best_so_far_y,
            n_function_evaluations,
            runtime: runtime.as_secs_f64(),
            generations: 0,
            termination_reason: None,
            fitness: self.series,
        })
    }
}

/// Final result of one benchmark run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Algorithm label
    pub algorithm: String,
    /// Objective function name
    pub function: String,
    /// Problem dimension
    pub dimension: usize,
    /// Experiment index, when run as part of an experiment
    pub experiment: Option<usize>,
    /// Seed of the run's random generator
    pub seed: Option<u64>,
    /// Last best-so-far fitness
    pub best_so_far_y: f64,
    /// Total number of function evaluations
    pub n_function_evaluations: usize,
    /// Elapsed wall-clock time in seconds
    pub runtime: f64,
    /// Generations completed
    pub generations: usize,
    /// Why the run stopped
    pub termination_reason: Option<String>,
    /// Best-so-far series: (evaluation count, best fitness)
    pub fitness: Vec<(usize, f64)>,
}

impl RunRecord {
    /// Attach experiment index and seed
    pub fn with_experiment(mut self, experiment: usize, seed: u64) -> Self {
        self.experiment = Some(experiment);
        self.seed = Some(seed);
        self
    }

    /// Set the number of completed generations
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the termination reason
    pub fn with_termination_reason(mut self, reason: &str) -> Self {
        self.termination_reason = Some(reason.to_string());
        self
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Run Summary:\n\
             - Function: {} (dim {})\n\
             - Evaluations: {}\n\
             - Generations: {}\n\
             - Best so far: {:.6e}\n\
             - Runtime: {:.2}s\n\
             - Termination: {}",
            self.function,
            self.dimension,
            self.n_function_evaluations,
            self.generations,
            self.best_so_far_y,
            self.runtime,
            self.termination_reason.as_deref().unwrap_or("unknown")
        )
    }
}

pub mod prelude {
    pub use super::{BestSoFarRecorder, RunRecord, ALGORITHM_NAME};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_evaluation_is_best() {
        let mut recorder = BestSoFarRecorder::new(FitnessDirection::Minimize);
        assert_eq!(recorder.best(), None);
        assert_eq!(recorder.record(7.0), 7.0);
        assert_eq!(recorder.series(), &[(1, 7.0)]);
    }

    #[test]
    fn test_minimize_series_repeats_previous_best() {
        let mut recorder = BestSoFarRecorder::new(FitnessDirection::Minimize);
        for value in [5.0, 6.0, 3.0, 3.0, 4.0, 1.0] {
            recorder.record(value);
        }
        assert_eq!(
            recorder.series(),
            &[(1, 5.0), (2, 5.0), (3, 3.0), (4, 3.0), (5, 3.0), (6, 1.0)]
        );
        assert_eq!(recorder.evaluations(), 6);
        assert_eq!(recorder.best(), Some(1.0));
    }

    #[test]
    fn test_maximize_series() {
        let mut recorder = BestSoFarRecorder::new(FitnessDirection::Maximize);
        for value in [5.0, 6.0, 3.0] {
            recorder.record(value);
        }
        assert_eq!(recorder.series(), &[(1, 5.0), (2, 6.0), (3, 6.0)]);
    }

    #[test]
    fn test_into_record() {
        let mut recorder = BestSoFarRecorder::new(FitnessDirection::Minimize);
        for value in [2.0, 1.0, 3.0] {
            recorder.record(value);
        }
        let record = recorder
            .into_record("sphere", 2, Duration::from_millis(1500))
            .unwrap()
            .with_experiment(4, 99)
            .with_generations(1)
            .with_termination_reason("Maximum generations reached");

        assert_eq!(record.algorithm, "EMNA");
        assert_eq!(record.function, "sphere");
        assert_eq!(record.best_so_far_y, 1.0);
        assert_eq!(record.n_function_evaluations, 3);
        assert!((record.runtime - 1.5).abs() < 1e-9);
        assert_eq!(record.experiment, Some(4));
        assert_eq!(record.seed, Some(99));
        assert_eq!(record.fitness.len(), 3);
    }

    #[test]
    fn test_empty_recorder_has_no_record() {
        let recorder = BestSoFarRecorder::new(FitnessDirection::Minimize);
        match recorder.into_record("sphere", 2, Duration::ZERO) {
            Err(EvolutionError::Configuration(msg)) => {
                assert_eq!(msg, "No evaluations recorded")
            }
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_summary() {
        let mut recorder = BestSoFarRecorder::new(FitnessDirection::Minimize);
        recorder.record(0.5);
        let record = recorder
            .into_record("cigar", 10, Duration::from_secs(2))
            .unwrap()
            .with_termination_reason("Wall-clock budget exhausted");

        let summary = record.summary();
        assert!(summary.contains("Function: cigar (dim 10)"));
        assert!(summary.contains("Evaluations: 1"));
        assert!(summary.contains("Wall-clock budget exhausted"));
    }
}
