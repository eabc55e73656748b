//! Generational search loop
//!
//! Drives a [`GenerateUpdate`] strategy: sample, evaluate, record, update,
//! and check termination once per generation.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::algorithms::traits::GenerateUpdate;
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::FitnessDirection;
use crate::recorder::{BestSoFarRecorder, RunRecord};
use crate::termination::{SearchState, TerminationCriterion, WallClockBudget};

/// Runs a strategy until its termination criterion fires
#[derive(Clone, Debug)]
pub struct SearchLoop<C> {
    termination: C,
    record_direction: FitnessDirection,
}

impl SearchLoop<WallClockBudget> {
    /// Search loop with the default three hour budget
    pub fn new() -> Self {
        Self::with_termination(WallClockBudget::default())
    }
}

impl Default for SearchLoop<WallClockBudget> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TerminationCriterion> SearchLoop<C> {
    /// Search loop stopping on `termination`
    pub fn with_termination(termination: C) -> Self {
        Self {
            termination,
            record_direction: FitnessDirection::Minimize,
        }
    }

    /// Set the direction the best-so-far recorder treats as improvement
    pub fn record_direction(mut self, direction: FitnessDirection) -> Self {
        self.record_direction = direction;
        self
    }

    /// The termination criterion
    pub fn termination(&self) -> &C {
        &self.termination
    }

    /// Run the strategy
    ///
    /// At least one generation always runs; termination is only checked
    /// after a generation completes.
    pub fn run<S, R>(&self, strategy: &mut S, rng: &mut R) -> EvoResult<RunRecord>
    where
        S: GenerateUpdate,
        R: Rng,
    {
        let start = Instant::now();
        let mut recorder = BestSoFarRecorder::new(self.record_direction);
        let mut generation = 0usize;

        info!(
            function = strategy.objective_name(),
            dimension = strategy.dimension(),
            population_size = strategy.population_size(),
            "Starting EMNA run"
        );

        let state = loop {
            let mut population = strategy.generate(rng);
            let values = strategy.evaluate_population(&population)?;

            for (individual, value) in population.iter_mut().zip(values) {
                if !value.is_finite() {
                    return Err(EvolutionError::NonFiniteFitness {
                        evaluation: recorder.evaluations() + 1,
                        value,
                    });
                }
                individual.set_fitness(value);
                recorder.record(value);
            }

            strategy.update(&population)?;
            generation += 1;

            let state = SearchState {
                generation,
                evaluations: recorder.evaluations(),
                best_so_far: recorder.best(),
                elapsed: start.elapsed(),
            };

            debug!(
                generation,
                evaluations = state.evaluations,
                best_so_far = ?state.best_so_far,
                "Generation complete"
            );

            if self.termination.should_terminate(&state) {
                break state;
            }
        };

        let reason = self.termination.reason_for(&state);
        let record = recorder
            .into_record(strategy.objective_name(), strategy.dimension(), state.elapsed)?
            .with_generations(generation)
            .with_termination_reason(reason);

        info!(
            function = %record.function,
            evaluations = record.n_function_evaluations,
            generations = record.generations,
            best_so_far = record.best_so_far_y,
            runtime = record.runtime,
            reason,
            "EMNA run finished"
        );

        Ok(record)
    }
}
