//! Termination criteria
//!
//! Criteria are consulted once per generation boundary, never in the middle
//! of a generation, so a run can overshoot a budget by one generation.

use std::time::Duration;

use crate::fitness::traits::FitnessDirection;

/// Default wall-clock budget of a benchmark run (3 hours)
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(3 * 60 * 60);

/// Search state at a generation boundary
#[derive(Clone, Debug, PartialEq)]
pub struct SearchState {
    /// Generations completed so far
    pub generation: usize,
    /// Total fitness evaluations so far
    pub evaluations: usize,
    /// Best-so-far fitness, if anything has been evaluated
    pub best_so_far: Option<f64>,
    /// Wall-clock time since the run started
    pub elapsed: Duration,
}

/// Termination criterion trait
pub trait TerminationCriterion: Send + Sync {
    /// Check if the search should stop
    fn should_terminate(&self, state: &SearchState) -> bool;

    /// Get a description of why termination occurred
    fn reason(&self) -> &'static str;

    /// Reason for stopping in `state`, for criteria that combine others
    fn reason_for(&self, _state: &SearchState) -> &'static str {
        self.reason()
    }
}

impl<T: TerminationCriterion + ?Sized> TerminationCriterion for Box<T> {
    fn should_terminate(&self, state: &SearchState) -> bool {
        (**self).should_terminate(state)
    }

    fn reason(&self) -> &'static str {
        (**self).reason()
    }

    fn reason_for(&self, state: &SearchState) -> &'static str {
        (**self).reason_for(state)
    }
}

/// Terminate once the wall-clock budget is used up
#[derive(Clone, Debug)]
pub struct WallClockBudget(pub Duration);

impl WallClockBudget {
    /// Create a new wall-clock budget
    pub fn new(budget: Duration) -> Self {
        Self(budget)
    }

    /// Create a budget from seconds
    ///
    /// Negative values clamp to zero and values too large for a `Duration`
    /// saturate to `Duration::MAX`.
    pub fn from_secs_f64(secs: f64) -> Self {
        Self(Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX))
    }
}

impl Default for WallClockBudget {
    fn default() -> Self {
        Self(DEFAULT_BUDGET)
    }
}

impl TerminationCriterion for WallClockBudget {
    fn should_terminate(&self, state: &SearchState) -> bool {
        state.elapsed >= self.0
    }

    fn reason(&self) -> &'static str {
        "Wall-clock budget exhausted"
    }
}

/// Terminate after a maximum number of generations
#[derive(Clone, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxGenerations {
    fn should_terminate(&self, state: &SearchState) -> bool {
        state.generation >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }
}

/// Terminate after a maximum number of fitness evaluations
#[derive(Clone, Debug)]
pub struct MaxEvaluations(pub usize);

impl MaxEvaluations {
    /// Create a new max evaluations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxEvaluations {
    fn should_terminate(&self, state: &SearchState) -> bool {
        state.evaluations >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum evaluations reached"
    }
}

/// Terminate when the best-so-far value reaches a target
#[derive(Clone, Debug)]
pub struct TargetFitness {
    /// Target fitness value
    pub target: f64,
    /// Which side of the target counts as reached
    pub direction: FitnessDirection,
}

impl TargetFitness {
    /// Target for a minimization problem (stop once best <= target)
    pub fn minimize(target: f64) -> Self {
        Self {
            target,
            direction: FitnessDirection::Minimize,
        }
    }

    /// Target for a maximization problem (stop once best >= target)
    pub fn maximize(target: f64) -> Self {
        Self {
            target,
            direction: FitnessDirection::Maximize,
        }
    }
}

impl TerminationCriterion for TargetFitness {
    fn should_terminate(&self, state: &SearchState) -> bool {
        match (state.best_so_far, self.direction) {
            (Some(best), FitnessDirection::Minimize) => best <= self.target,
            (Some(best), FitnessDirection::Maximize) => best >= self.target,
            (None, _) => false,
        }
    }

    fn reason(&self) -> &'static str {
        "Target fitness reached"
    }
}

/// Combine criteria with OR logic (any one triggers termination)
pub struct AnyOf {
    criteria: Vec<Box<dyn TerminationCriterion>>,
}

impl AnyOf {
    /// Create a new AnyOf combinator
    pub fn new(criteria: Vec<Box<dyn TerminationCriterion>>) -> Self {
        Self { criteria }
    }

    /// The first criterion that currently fires
    pub fn triggered(&self, state: &SearchState) -> Option<&dyn TerminationCriterion> {
        self.criteria
            .iter()
            .find(|c| c.should_terminate(state))
            .map(|c| c.as_ref())
    }
}

impl TerminationCriterion for AnyOf {
    fn should_terminate(&self, state: &SearchState) -> bool {
        self.criteria.iter().any(|c| c.should_terminate(state))
    }

    fn reason(&self) -> &'static str {
        "One of multiple criteria met"
    }

    fn reason_for(&self, state: &SearchState) -> &'static str {
        self.triggered(state)
            .map_or_else(|| self.reason(), |c| c.reason_for(state))
    }
}

pub mod prelude {
    pub use super::{
        AnyOf, MaxEvaluations, MaxGenerations, SearchState, TargetFitness, TerminationCriterion,
        WallClockBudget, DEFAULT_BUDGET,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(generation: usize, evaluations: usize, secs: u64) -> SearchState {
        SearchState {
            generation,
            evaluations,
            best_so_far: Some(5.0),
            elapsed: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_wall_clock_budget() {
        let criterion = WallClockBudget::new(Duration::from_secs(60));
        assert!(!criterion.should_terminate(&state(10, 100, 59)));
        assert!(criterion.should_terminate(&state(10, 100, 60)));
        assert!(criterion.should_terminate(&state(10, 100, 61)));
    }

    #[test]
    fn test_default_budget_is_three_hours() {
        let criterion = WallClockBudget::default();
        assert_eq!(criterion.0, Duration::from_secs(10_800));
        assert!(!criterion.should_terminate(&state(1, 1, 10_799)));
        assert!(criterion.should_terminate(&state(1, 1, 10_800)));
    }

    #[test]
    fn test_negative_seconds_clamp_to_zero() {
        let criterion = WallClockBudget::from_secs_f64(-3.0);
        assert!(criterion.should_terminate(&state(0, 0, 0)));
    }

    #[test]
    fn test_huge_budget_saturates() {
        let criterion = WallClockBudget::from_secs_f64(1e30);
        assert_eq!(criterion.0, Duration::MAX);
        assert!(!criterion.should_terminate(&state(1, 1, u64::MAX / 2)));
    }

    #[test]
    fn test_max_generations() {
        let criterion = MaxGenerations::new(3);
        assert!(!criterion.should_terminate(&state(2, 0, 0)));
        assert!(criterion.should_terminate(&state(3, 0, 0)));
    }

    #[test]
    fn test_max_evaluations() {
        let criterion = MaxEvaluations::new(1000);
        assert!(!criterion.should_terminate(&state(0, 999, 0)));
        assert!(criterion.should_terminate(&state(0, 1000, 0)));
    }

    #[test]
    fn test_target_fitness() {
        let min = TargetFitness::minimize(5.0);
        assert!(min.should_terminate(&state(0, 0, 0)));
        let min = TargetFitness::minimize(4.0);
        assert!(!min.should_terminate(&state(0, 0, 0)));

        let max = TargetFitness::maximize(6.0);
        assert!(!max.should_terminate(&state(0, 0, 0)));

        let empty = SearchState {
            best_so_far: None,
            ..state(0, 0, 0)
        };
        assert!(!TargetFitness::minimize(f64::INFINITY).should_terminate(&empty));
    }

    #[test]
    fn test_any_of() {
        let criterion = AnyOf::new(vec![
            Box::new(MaxGenerations::new(10)),
            Box::new(WallClockBudget::new(Duration::from_secs(5))),
        ]);

        assert!(!criterion.should_terminate(&state(1, 0, 1)));
        assert!(criterion.should_terminate(&state(10, 0, 1)));
        assert!(criterion.should_terminate(&state(1, 0, 5)));

        let fired = criterion.triggered(&state(1, 0, 5)).unwrap();
        assert_eq!(fired.reason(), "Wall-clock budget exhausted");
        assert!(criterion.triggered(&state(1, 0, 1)).is_none());
        assert_eq!(criterion.reason_for(&state(10, 0, 1)), "Maximum generations reached");
        assert_eq!(criterion.reason_for(&state(1, 0, 1)), "One of multiple criteria met");
    }

    #[test]
    fn test_boxed_criterion() {
        let boxed: Box<dyn TerminationCriterion> = Box::new(MaxGenerations::new(1));
        assert!(boxed.should_terminate(&state(1, 0, 0)));
        assert_eq!(boxed.reason(), "Maximum generations reached");
    }
}
