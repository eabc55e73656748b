//! Population type
//!
//! This module provides the Population container: the individuals sampled in
//! one generation.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::{FitnessAdapter, FitnessDirection, FitnessValue, ObjectiveFunction};
use crate::population::individual::Individual;

/// A population of individuals
#[derive(Clone, Debug)]
pub struct Population<T = f64>
where
    T: FitnessValue,
{
    /// The individuals in this population
    individuals: Vec<Individual<T>>,
}

impl<T> Population<T>
where
    T: FitnessValue,
{
    /// Create an empty population
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }

    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual<T>>) -> Self {
        Self { individuals }
    }

    /// Create an evaluated population from positions and fitness values
    ///
    /// # Panics
    /// Panics if the two vectors differ in length
    pub fn from_evaluated(positions: Vec<Vec<f64>>, fitness: Vec<T>) -> Self {
        assert_eq!(
            positions.len(),
            fitness.len(),
            "positions and fitness values must have the same length"
        );
        positions
            .into_iter()
            .zip(fitness)
            .map(|(p, f)| Individual::with_fitness(p, f))
            .collect()
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Add an individual to the population
    pub fn push(&mut self, individual: Individual<T>) {
        self.individuals.push(individual);
    }

    /// Get an iterator over the individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual<T>> {
        self.individuals.iter()
    }

    /// Get a mutable iterator over the individuals
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Individual<T>> {
        self.individuals.iter_mut()
    }

    /// Check that every position has dimension `dimension`
    pub fn check_dimension(&self, dimension: usize) -> EvoResult<()> {
        match self.individuals.iter().find(|i| i.dimension() != dimension) {
            Some(bad) => Err(EvolutionError::DimensionMismatch {
                expected: dimension,
                actual: bad.dimension(),
            }),
            None => Ok(()),
        }
    }

    /// Fail on the first unevaluated individual
    pub fn require_evaluated(&self) -> EvoResult<()> {
        match self.individuals.iter().position(|i| !i.is_evaluated()) {
            Some(index) => Err(EvolutionError::UnevaluatedIndividual(index)),
            None => Ok(()),
        }
    }

    /// The `count` best individuals under `direction`, best first
    ///
    /// The sort is stable, so ties keep their sampling order. Unevaluated
    /// individuals rank last.
    pub fn truncate_best(&self, count: usize, direction: FitnessDirection) -> Vec<&Individual<T>> {
        let mut ranked: Vec<&Individual<T>> = self.individuals.iter().collect();
        ranked.sort_by(|a, b| match (&a.fitness, &b.fitness) {
            (Some(fa), Some(fb)) => direction.best_first(fa, fb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ranked.truncate(count);
        ranked
    }
}

impl Population<f64> {
    /// Compute the objective value of every individual, in population order
    ///
    /// Fitness is not assigned here; the caller assigns it so it can record
    /// each evaluation in sequence.
    pub fn compute_fitness<O>(&self, adapter: &FitnessAdapter<O>) -> EvoResult<Vec<f64>>
    where
        O: ObjectiveFunction,
    {
        self.individuals
            .iter()
            .map(|i| adapter.evaluate(&i.position))
            .collect()
    }
}

/// Parallel evaluation support (requires `parallel` feature)
#[cfg(feature = "parallel")]
impl Population<f64> {
    /// Compute objective values on the rayon thread pool
    ///
    /// Results come back in population order, identical to
    /// [`Population::compute_fitness`].
    pub fn compute_fitness_parallel<O>(&self, adapter: &FitnessAdapter<O>) -> EvoResult<Vec<f64>>
    where
        O: ObjectiveFunction,
    {
        self.individuals
            .par_iter()
            .map(|i| adapter.evaluate(&i.position))
            .collect()
    }
}

/// Sequential fallback for parallel evaluation (when `parallel` feature is disabled)
#[cfg(not(feature = "parallel"))]
impl Population<f64> {
    /// Compute objective values (sequential fallback)
    pub fn compute_fitness_parallel<O>(&self, adapter: &FitnessAdapter<O>) -> EvoResult<Vec<f64>>
    where
        O: ObjectiveFunction,
    {
        self.compute_fitness(adapter)
    }
}

impl<T> Default for Population<T>
where
    T: FitnessValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<usize> for Population<T>
where
    T: FitnessValue,
{
    type Output = Individual<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<T> IntoIterator for Population<T>
where
    T: FitnessValue,
{
    type Item = Individual<T>;
    type IntoIter = std::vec::IntoIter<Individual<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl<T> FromIterator<Individual<T>> for Population<T>
where
    T: FitnessValue,
{
    fn from_iter<I: IntoIterator<Item = Individual<T>>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}
