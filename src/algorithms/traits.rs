//! Generate/update strategy interface
//!
//! A strategy owns a search distribution and an objective. The search loop
//! only ever talks to it through these operations.

use rand::Rng;

use crate::error::EvoResult;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// A distribution-based search strategy
pub trait GenerateUpdate {
    /// Name of the objective being optimized
    fn objective_name(&self) -> &str;

    /// Problem dimension
    fn dimension(&self) -> usize;

    /// Number of individuals produced by each call to `generate`
    fn population_size(&self) -> usize;

    /// Evaluate one individual's position
    fn evaluate(&self, individual: &Individual) -> EvoResult<f64>;

    /// Evaluate a whole generation, returning values in population order
    fn evaluate_population(&self, population: &Population) -> EvoResult<Vec<f64>> {
        population.iter().map(|i| self.evaluate(i)).collect()
    }

    /// Sample a fresh, unevaluated population
    fn generate<R: Rng>(&self, rng: &mut R) -> Population;

    /// Refit the distribution from a fully evaluated population
    fn update(&mut self, population: &Population) -> EvoResult<()>;
}
