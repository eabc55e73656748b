//! Individual wrapper type
//!
//! This module provides the Individual type that pairs a sampled position
//! with its (possibly not yet computed) fitness.

use serde::{Deserialize, Serialize};

use crate::fitness::traits::FitnessValue;

/// An individual in the population
///
/// Created unevaluated by the model's `generate`; the search loop assigns
/// its fitness exactly once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Individual<T = f64>
where
    T: FitnessValue,
{
    /// Position in the search space
    pub position: Vec<f64>,
    /// The fitness value (None if not yet evaluated)
    pub fitness: Option<T>,
}

impl<T> Individual<T>
where
    T: FitnessValue,
{
    /// Create a new individual with an unevaluated position
    pub fn new(position: Vec<f64>) -> Self {
        Self {
            position,
            fitness: None,
        }
    }

    /// Create a new individual with a known fitness
    pub fn with_fitness(position: Vec<f64>, fitness: T) -> Self {
        Self {
            position,
            fitness: Some(fitness),
        }
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Set the fitness value
    pub fn set_fitness(&mut self, fitness: T) {
        self.fitness = Some(fitness);
    }

    /// Dimension of the position
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_new() {
        let individual: Individual = Individual::new(vec![1.0, 2.0, 3.0]);

        assert!(!individual.is_evaluated());
        assert_eq!(individual.dimension(), 3);
    }

    #[test]
    fn test_individual_with_fitness() {
        let individual = Individual::with_fitness(vec![1.0, 2.0, 3.0], 42.0);

        assert!(individual.is_evaluated());
        assert_eq!(individual.fitness, Some(42.0));
    }

    #[test]
    fn test_individual_set_fitness() {
        let mut individual: Individual = Individual::new(vec![1.0]);

        individual.set_fitness(100.0);
        assert!(individual.is_evaluated());
        assert_eq!(individual.fitness, Some(100.0));
    }
}
