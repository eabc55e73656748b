//! Isotropic EMNA (Estimation of Multivariate Normal Algorithm)
//!
//! EMNA models promising regions of the search space with a Gaussian. This
//! variant keeps a single scalar spread shared by every dimension instead of
//! a covariance matrix:
//!
//! 1. Sample N positions `mean + spread * z`, `z ~ N(0, I)`
//! 2. Evaluate them
//! 3. Keep the top μ by truncation selection
//! 4. Move the mean by the average deviation of the selected positions and
//!    set the spread to their pooled RMS deviation from the old mean
//!
//! Truncation sorts by *weighted* fitness, descending, where the weight is
//! -1 for a minimization problem. On the raw objective value that keeps the
//! μ lowest values ([`FitnessDirection::Minimize`], the default). Ranking by
//! the raw value descending ([`FitnessDirection::Maximize`]) is available as
//! an explicit opt-in; it drives the mean away from the optimum of every
//! benchmark function.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::algorithms::traits::GenerateUpdate;
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::{FitnessAdapter, FitnessDirection, ObjectiveFunction};
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Configuration for EMNA
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmnaConfig {
    /// Problem dimension (D)
    pub dimension: usize,
    /// Individuals sampled per generation (N)
    pub population_size: usize,
    /// Individuals kept by truncation selection (μ)
    pub selection_size: usize,
    /// Range the initial mean is drawn from, uniformly per dimension
    pub init_range: (f64, f64),
    /// Initial spread
    pub initial_spread: f64,
    /// Ranking direction used by truncation selection
    ///
    /// `Minimize` keeps the lowest objective values.
    pub selection_direction: FitnessDirection,
}

impl Default for EmnaConfig {
    fn default() -> Self {
        Self {
            dimension: 2000,
            population_size: 200,
            selection_size: 100,
            init_range: (-10.0, 10.0),
            initial_spread: 2.0,
            selection_direction: FitnessDirection::Minimize,
        }
    }
}

impl EmnaConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> EvoResult<()> {
        if self.dimension == 0 {
            return Err(EvolutionError::Configuration(
                "Dimension must be at least 1".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.selection_size == 0 || self.selection_size >= self.population_size {
            return Err(EvolutionError::Configuration(format!(
                "Selection size must be in 1..{}, got {}",
                self.population_size, self.selection_size
            )));
        }
        let (low, high) = self.init_range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(EvolutionError::Configuration(format!(
                "Initial range must be finite with low < high, got ({}, {})",
                low, high
            )));
        }
        if !(self.initial_spread.is_finite() && self.initial_spread >= 0.0) {
            return Err(EvolutionError::Configuration(format!(
                "Initial spread must be finite and non-negative, got {}",
                self.initial_spread
            )));
        }
        Ok(())
    }
}

/// Isotropic Gaussian search distribution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchDistribution {
    /// Mean vector
    pub mean: Vec<f64>,
    /// Standard deviation shared by every dimension
    pub spread: f64,
}

impl SearchDistribution {
    /// Create a distribution, checking the parameters are finite
    pub fn new(mean: Vec<f64>, spread: f64) -> EvoResult<Self> {
        if mean.is_empty() {
            return Err(EvolutionError::Configuration(
                "Mean must have at least one dimension".to_string(),
            ));
        }
        if !(spread.is_finite() && spread >= 0.0) {
            return Err(EvolutionError::Configuration(format!(
                "Spread must be finite and non-negative, got {}",
                spread
            )));
        }
        if mean.iter().any(|m| !m.is_finite()) {
            return Err(EvolutionError::Configuration(
                "Mean must be finite".to_string(),
            ));
        }
        Ok(Self { mean, spread })
    }

    /// Draw the mean uniformly from `[low, high)^dimension`
    pub fn random<R: Rng>(
        dimension: usize,
        (low, high): (f64, f64),
        spread: f64,
        rng: &mut R,
    ) -> EvoResult<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(EvolutionError::Configuration(format!(
                "Initial range must be finite with low < high, got ({}, {})",
                low, high
            )));
        }
        let mean = (0..dimension).map(|_| rng.gen_range(low..high)).collect();
        Self::new(mean, spread)
    }

    /// Dimension of the distribution
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Sample one position
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.mean
            .iter()
            .map(|&m| {
                let z: f64 = StandardNormal.sample(rng);
                m + self.spread * z
            })
            .collect()
    }
}

/// The EMNA model: configuration plus the current search distribution
#[derive(Clone, Debug)]
pub struct EmnaModel {
    config: EmnaConfig,
    distribution: SearchDistribution,
}

impl EmnaModel {
    /// Create a model with a randomly placed initial mean
    pub fn new<R: Rng>(config: EmnaConfig, rng: &mut R) -> EvoResult<Self> {
        config.validate()?;
        let distribution = SearchDistribution::random(
            config.dimension,
            config.init_range,
            config.initial_spread,
            rng,
        )?;
        Ok(Self {
            config,
            distribution,
        })
    }

    /// Create a model from an explicit distribution
    pub fn with_distribution(
        config: EmnaConfig,
        distribution: SearchDistribution,
    ) -> EvoResult<Self> {
        config.validate()?;
        if distribution.dimension() != config.dimension {
            return Err(EvolutionError::DimensionMismatch {
                expected: config.dimension,
                actual: distribution.dimension(),
            });
        }
        Ok(Self {
            config,
            distribution,
        })
    }

    /// The configuration
    pub fn config(&self) -> &EmnaConfig {
        &self.config
    }

    /// The current search distribution
    pub fn distribution(&self) -> &SearchDistribution {
        &self.distribution
    }

    /// Current mean
    pub fn mean(&self) -> &[f64] {
        &self.distribution.mean
    }

    /// Current spread
    pub fn spread(&self) -> f64 {
        self.distribution.spread
    }

    /// Sample `size` unevaluated individuals from the current distribution
    pub fn generate<R: Rng>(&self, size: usize, rng: &mut R) -> Population {
        (0..size)
            .map(|_| Individual::new(self.distribution.sample(rng)))
            .collect()
    }

    /// Refit the distribution from an evaluated population
    ///
    /// Selects the top μ individuals under the configured selection
    /// direction, then replaces the mean and spread outright.
    pub fn update(&mut self, population: &Population) -> EvoResult<()> {
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        population.require_evaluated()?;
        population.check_dimension(self.config.dimension)?;

        let mu = self.config.selection_size;
        if population.len() < mu {
            return Err(EvolutionError::Configuration(format!(
                "Population of {} cannot supply {} selected individuals",
                population.len(),
                mu
            )));
        }

        let selected = population.truncate_best(mu, self.config.selection_direction);
        let dimension = self.config.dimension;

        // deviations are taken from the old mean
        let mut shift = vec![0.0; dimension];
        let mut squared = 0.0;
        for individual in &selected {
            for ((s, &x), &m) in shift
                .iter_mut()
                .zip(&individual.position)
                .zip(&self.distribution.mean)
            {
                let delta = x - m;
                *s += delta;
                squared += delta * delta;
            }
        }

        let spread = (squared / (mu * dimension) as f64).sqrt();
        let mean: Vec<f64> = self
            .distribution
            .mean
            .iter()
            .zip(&shift)
            .map(|(m, s)| m + s / mu as f64)
            .collect();

        if !spread.is_finite() {
            return Err(EvolutionError::Numerical(format!(
                "Spread became {}",
                spread
            )));
        }
        if mean.iter().any(|m| !m.is_finite()) {
            return Err(EvolutionError::Numerical(
                "Mean became non-finite".to_string(),
            ));
        }

        self.distribution.mean = mean;
        self.distribution.spread = spread;
        Ok(())
    }
}

/// Builder for EMNA
pub struct EmnaBuilder<O = ()> {
    config: EmnaConfig,
    objective: Option<O>,
}

impl EmnaBuilder<()> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: EmnaConfig::default(),
            objective: None,
        }
    }
}

impl Default for EmnaBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> EmnaBuilder<O> {
    /// Replace the whole configuration
    pub fn config(mut self, config: EmnaConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the problem dimension
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = dimension;
        self
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the number of selected individuals
    pub fn selection_size(mut self, size: usize) -> Self {
        self.config.selection_size = size;
        self
    }

    /// Set the range of the initial mean
    pub fn init_range(mut self, low: f64, high: f64) -> Self {
        self.config.init_range = (low, high);
        self
    }

    /// Set the initial spread
    pub fn initial_spread(mut self, spread: f64) -> Self {
        self.config.initial_spread = spread;
        self
    }

    /// Set the truncation selection direction
    pub fn selection_direction(mut self, direction: FitnessDirection) -> Self {
        self.config.selection_direction = direction;
        self
    }

    /// Set the objective function
    pub fn objective<NewO>(self, objective: NewO) -> EmnaBuilder<NewO>
    where
        NewO: ObjectiveFunction,
    {
        EmnaBuilder {
            config: self.config,
            objective: Some(objective),
        }
    }
}

impl<O: ObjectiveFunction> EmnaBuilder<O> {
    /// Build the EMNA instance, drawing the initial mean from `rng`
    pub fn build<R: Rng>(self, rng: &mut R) -> EvoResult<Emna<O>> {
        let objective = self.objective.ok_or_else(|| {
            EvolutionError::Configuration("Objective function must be specified".to_string())
        })?;
        Emna::new(self.config, objective, rng)
    }
}

/// EMNA bound to an objective function
pub struct Emna<O> {
    model: EmnaModel,
    adapter: FitnessAdapter<O>,
}

impl Emna<()> {
    /// Create a builder for EMNA
    pub fn builder() -> EmnaBuilder<()> {
        EmnaBuilder::new()
    }
}

impl<O: ObjectiveFunction> Emna<O> {
    /// Create EMNA for `objective` with a randomly placed initial mean
    pub fn new<R: Rng>(config: EmnaConfig, objective: O, rng: &mut R) -> EvoResult<Self> {
        let adapter = FitnessAdapter::new(objective, config.dimension)?;
        let model = EmnaModel::new(config, rng)?;
        Ok(Self { model, adapter })
    }

    /// Create EMNA around an existing model
    pub fn from_model(model: EmnaModel, objective: O) -> EvoResult<Self> {
        let adapter = FitnessAdapter::new(objective, model.config().dimension)?;
        Ok(Self { model, adapter })
    }

    /// The underlying model
    pub fn model(&self) -> &EmnaModel {
        &self.model
    }

    /// The objective adapter
    pub fn adapter(&self) -> &FitnessAdapter<O> {
        &self.adapter
    }
}

impl<O: ObjectiveFunction> GenerateUpdate for Emna<O> {
    fn objective_name(&self) -> &str {
        self.adapter.name()
    }

    fn dimension(&self) -> usize {
        self.model.config().dimension
    }

    fn population_size(&self) -> usize {
        self.model.config().population_size
    }

    fn evaluate(&self, individual: &Individual) -> EvoResult<f64> {
        self.adapter.evaluate(&individual.position)
    }

    fn evaluate_population(&self, population: &Population) -> EvoResult<Vec<f64>> {
        population.compute_fitness_parallel(&self.adapter)
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> Population {
        self.model.generate(self.model.config().population_size, rng)
    }

    fn update(&mut self, population: &Population) -> EvoResult<()> {
        self.model.update(population)
    }
}
