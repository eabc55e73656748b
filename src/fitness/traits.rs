//! Fitness traits
//!
//! This module defines the objective-function interface, the explicit
//! optimization direction, and the adapter that turns a raw objective into
//! the single fitness value the search loop expects.

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};

/// Trait bound for fitness values
///
/// Fitness values must be comparable and convertible to f64. They must also
/// be serializable so they can be written into run records.
pub trait FitnessValue:
    PartialOrd + Copy + Send + Sync + Debug + Serialize + DeserializeOwned + 'static
{
    /// Convert fitness to f64
    fn to_f64(&self) -> f64;

    /// Whether the value is a usable number (not NaN or infinite)
    fn is_finite(&self) -> bool {
        self.to_f64().is_finite()
    }
}

impl FitnessValue for f64 {
    fn to_f64(&self) -> f64 {
        *self
    }
}

impl FitnessValue for f32 {
    fn to_f64(&self) -> f64 {
        *self as f64
    }
}

/// Which end of the fitness scale counts as better
///
/// Passed explicitly to every component that compares fitness values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessDirection {
    /// Smaller values are better
    #[default]
    Minimize,
    /// Larger values are better
    Maximize,
}

impl FitnessDirection {
    /// Check if `candidate` is strictly better than `incumbent`
    pub fn is_better<T: FitnessValue>(self, candidate: &T, incumbent: &T) -> bool {
        match self {
            Self::Minimize => candidate < incumbent,
            Self::Maximize => candidate > incumbent,
        }
    }

    /// Ordering that sorts the best value first
    ///
    /// Incomparable values (NaN) compare equal, matching a stable sort that
    /// leaves them in place.
    pub fn best_first<T: FitnessValue>(self, a: &T, b: &T) -> Ordering {
        let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match self {
            Self::Minimize => ord,
            Self::Maximize => ord.reverse(),
        }
    }
}

impl std::fmt::Display for FitnessDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimize => write!(f, "minimize"),
            Self::Maximize => write!(f, "maximize"),
        }
    }
}

/// A scalar objective function over real vectors
///
/// Implementations must be pure and deterministic in `x` for runs to be
/// reproducible from a seed.
#[cfg(feature = "parallel")]
pub trait ObjectiveFunction: Send + Sync {
    /// Name used in logs and record file names
    fn name(&self) -> &str;

    /// Smallest dimension the function is defined for
    fn min_dimension(&self) -> usize {
        1
    }

    /// Evaluate the function at `x`
    fn evaluate(&self, x: &[f64]) -> f64;
}

/// A scalar objective function over real vectors
///
/// Implementations must be pure and deterministic in `x` for runs to be
/// reproducible from a seed.
#[cfg(not(feature = "parallel"))]
pub trait ObjectiveFunction {
    /// Name used in logs and record file names
    fn name(&self) -> &str;

    /// Smallest dimension the function is defined for
    fn min_dimension(&self) -> usize {
        1
    }

    /// Evaluate the function at `x`
    fn evaluate(&self, x: &[f64]) -> f64;
}

impl<O: ObjectiveFunction + ?Sized> ObjectiveFunction for Box<O> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn min_dimension(&self) -> usize {
        (**self).min_dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        (**self).evaluate(x)
    }
}

impl<O: ObjectiveFunction + ?Sized> ObjectiveFunction for &O {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn min_dimension(&self) -> usize {
        (**self).min_dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        (**self).evaluate(x)
    }
}

/// A named closure acting as an objective function
pub struct FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    name: String,
    f: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Create a new function-based objective
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[cfg(feature = "parallel")]
impl<F> ObjectiveFunction for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        (self.f)(x)
    }
}

#[cfg(not(feature = "parallel"))]
impl<F> ObjectiveFunction for FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        (self.f)(x)
    }
}

/// Adapts an objective function to a fixed problem dimension
///
/// Checks the dimension of every position it is asked to evaluate, so a
/// mis-sized vector fails loudly instead of being silently truncated by the
/// objective.
#[derive(Clone, Debug)]
pub struct FitnessAdapter<O> {
    objective: O,
    dimension: usize,
}

impl<O: ObjectiveFunction> FitnessAdapter<O> {
    /// Create an adapter, checking the objective supports `dimension`
    pub fn new(objective: O, dimension: usize) -> EvoResult<Self> {
        if dimension < objective.min_dimension() {
            return Err(EvolutionError::Configuration(format!(
                "{} requires at least {} dimensions, got {}",
                objective.name(),
                objective.min_dimension(),
                dimension
            )));
        }
        Ok(Self {
            objective,
            dimension,
        })
    }

    /// Problem dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Name of the wrapped objective
    pub fn name(&self) -> &str {
        self.objective.name()
    }

    /// The wrapped objective
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Evaluate a position
    pub fn evaluate(&self, position: &[f64]) -> EvoResult<f64> {
        if position.len() != self.dimension {
            return Err(EvolutionError::DimensionMismatch {
                expected: self.dimension,
                actual: position.len(),
            });
        }
        Ok(self.objective.evaluate(position))
    }
}
