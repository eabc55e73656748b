//! Benchmark objective functions
//!
//! The ten base test functions of the large-scale benchmark suite. All are
//! minimization problems with an optimal value of zero. They are the plain
//! (unrotated, unshifted) forms.

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::ObjectiveFunction;

/// Extra metadata about a benchmark function
pub trait BenchmarkFunction: ObjectiveFunction {
    /// Optimal (minimum) value
    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    /// Optimal solution for the given dimension
    fn optimal_solution(&self, dimension: usize) -> Vec<f64> {
        vec![0.0; dimension]
    }
}

/// Linearly spaced exponent `i / (n - 1)` used by the ill-conditioned functions
fn ramp(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Sphere function: f(x) = Σxᵢ²
///
/// Unimodal, convex, separable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sphere;

impl ObjectiveFunction for Sphere {
    fn name(&self) -> &str {
        "sphere"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }
}

impl BenchmarkFunction for Sphere {}

/// Cigar function: f(x) = x₀² + 10⁶Σᵢ₌₁xᵢ²
#[derive(Clone, Copy, Debug, Default)]
pub struct Cigar;

impl ObjectiveFunction for Cigar {
    fn name(&self) -> &str {
        "cigar"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x[0] * x[0] + 1e6 * x[1..].iter().map(|xi| xi * xi).sum::<f64>()
    }
}

impl BenchmarkFunction for Cigar {}

/// Discus function: f(x) = 10⁶x₀² + Σᵢ₌₁xᵢ²
#[derive(Clone, Copy, Debug, Default)]
pub struct Discus;

impl ObjectiveFunction for Discus {
    fn name(&self) -> &str {
        "discus"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        1e6 * x[0] * x[0] + x[1..].iter().map(|xi| xi * xi).sum::<f64>()
    }
}

impl BenchmarkFunction for Discus {}

/// Cigar-discus function
///
/// Mixes a cigar-like first axis with a discus-like last axis. In two
/// dimensions the middle sum covers both coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct CigarDiscus;

impl ObjectiveFunction for CigarDiscus {
    fn name(&self) -> &str {
        "cigar_discus"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let n = x.len();
        let first = x[0] * x[0];
        let last = x[n - 1] * x[n - 1];
        let middle: f64 = if n == 2 {
            first + last
        } else {
            x[1..n - 1].iter().map(|xi| xi * xi).sum()
        };
        first + 1e4 * middle + 1e6 * last
    }
}

impl BenchmarkFunction for CigarDiscus {}

/// Ellipsoid function: f(x) = Σ10^(6i/(n-1))xᵢ²
///
/// Separable, conditioning 10⁶.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ellipsoid;

impl ObjectiveFunction for Ellipsoid {
    fn name(&self) -> &str {
        "ellipsoid"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let n = x.len();
        x.iter()
            .enumerate()
            .map(|(i, xi)| 10f64.powf(6.0 * ramp(i, n)) * xi * xi)
            .sum()
    }
}

impl BenchmarkFunction for Ellipsoid {}

/// Different-powers function: f(x) = Σ|xᵢ|^(2 + 4i/(n-1))
#[derive(Clone, Copy, Debug, Default)]
pub struct DifferentPowers;

impl ObjectiveFunction for DifferentPowers {
    fn name(&self) -> &str {
        "different_powers"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let n = x.len();
        x.iter()
            .enumerate()
            .map(|(i, xi)| xi.abs().powf(2.0 + 4.0 * ramp(i, n)))
            .sum()
    }
}

impl BenchmarkFunction for DifferentPowers {}

/// Schwefel 2.21 function: f(x) = max|xᵢ|
#[derive(Clone, Copy, Debug, Default)]
pub struct Schwefel221;

impl ObjectiveFunction for Schwefel221 {
    fn name(&self) -> &str {
        "schwefel221"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().fold(0.0f64, |acc, xi| acc.max(xi.abs()))
    }
}

impl BenchmarkFunction for Schwefel221 {}

/// Step function: f(x) = Σ⌊xᵢ + 0.5⌋²
///
/// Piecewise constant with plateaus.
#[derive(Clone, Copy, Debug, Default)]
pub struct Step;

impl ObjectiveFunction for Step {
    fn name(&self) -> &str {
        "step"
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| (xi + 0.5).floor().powi(2)).sum()
    }
}

impl BenchmarkFunction for Step {}

/// Rosenbrock function: f(x) = Σ[100(xᵢ₊₁-xᵢ²)² + (xᵢ-1)²]
///
/// Valley structure, non-separable. Optimum at (1,1,...,1).
#[derive(Clone, Copy, Debug, Default)]
pub struct Rosenbrock;

impl ObjectiveFunction for Rosenbrock {
    fn name(&self) -> &str {
        "rosenbrock"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.windows(2)
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (w[0] - 1.0).powi(2))
            .sum()
    }
}

impl BenchmarkFunction for Rosenbrock {
    fn optimal_solution(&self, dimension: usize) -> Vec<f64> {
        vec![1.0; dimension]
    }
}

/// Schwefel 1.2 function: f(x) = Σᵢ(Σⱼ₌₀..ᵢ xⱼ)²
///
/// Non-separable, quadratic.
#[derive(Clone, Copy, Debug, Default)]
pub struct Schwefel12;

impl ObjectiveFunction for Schwefel12 {
    fn name(&self) -> &str {
        "schwefel12"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter()
            .scan(0.0, |partial, xi| {
                *partial += xi;
                Some(*partial * *partial)
            })
            .sum()
    }
}

impl BenchmarkFunction for Schwefel12 {}

/// Names of the standard suite, in run order
pub const STANDARD_SUITE: [&str; 10] = [
    "sphere",
    "cigar",
    "discus",
    "cigar_discus",
    "ellipsoid",
    "different_powers",
    "schwefel221",
    "step",
    "rosenbrock",
    "schwefel12",
];

/// Look up a benchmark function by name
pub fn benchmark_by_name(name: &str) -> Option<Box<dyn BenchmarkFunction>> {
    let function: Box<dyn BenchmarkFunction> = match name {
        "sphere" => Box::new(Sphere),
        "cigar" => Box::new(Cigar),
        "discus" => Box::new(Discus),
        "cigar_discus" => Box::new(CigarDiscus),
        "ellipsoid" => Box::new(Ellipsoid),
        "different_powers" => Box::new(DifferentPowers),
        "schwefel221" => Box::new(Schwefel221),
        "step" => Box::new(Step),
        "rosenbrock" => Box::new(Rosenbrock),
        "schwefel12" => Box::new(Schwefel12),
        _ => return None,
    };
    Some(function)
}

/// An ordered set of benchmark functions run at one dimension
pub struct BenchmarkSuite {
    dimension: usize,
    functions: Vec<Box<dyn BenchmarkFunction>>,
}

impl BenchmarkSuite {
    /// The full ten-function suite
    pub fn standard(dimension: usize) -> EvoResult<Self> {
        Self::from_names(dimension, STANDARD_SUITE)
    }

    /// A suite restricted to the named functions, in the given order
    pub fn from_names<I, S>(dimension: usize, names: I) -> EvoResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut functions = Vec::new();
        for name in names {
            let name = name.as_ref();
            let function = benchmark_by_name(name).ok_or_else(|| {
                EvolutionError::Configuration(format!("Unknown benchmark function: {}", name))
            })?;
            if dimension < function.min_dimension() {
                return Err(EvolutionError::Configuration(format!(
                    "{} requires at least {} dimensions, got {}",
                    name,
                    function.min_dimension(),
                    dimension
                )));
            }
            functions.push(function);
        }
        if functions.is_empty() {
            return Err(EvolutionError::Configuration(
                "Benchmark suite must contain at least one function".to_string(),
            ));
        }
        Ok(Self {
            dimension,
            functions,
        })
    }

    /// Problem dimension shared by every function
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the suite is empty (never true for a constructed suite)
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterate over the functions in run order
    pub fn iter(&self) -> impl Iterator<Item = &(dyn BenchmarkFunction + 'static)> {
        self.functions.iter().map(|f| f.as_ref())
    }

    /// Names in run order
    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name()).collect()
    }
}
