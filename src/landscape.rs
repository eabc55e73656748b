//! Two-dimensional fitness landscapes
//!
//! Samples an objective on a regular grid so it can be plotted by an
//! external tool.

use serde::Serialize;

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::ObjectiveFunction;

/// `num` evenly spaced values from `start` to `end`, both included
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Objective values on a regular 2D grid
///
/// `z[row][col]` is the value at `(x[col], y[row])`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LandscapeGrid {
    /// Name of the sampled objective
    pub function: String,
    /// Sample points along the x axis
    pub x: Vec<f64>,
    /// Sample points along the y axis
    pub y: Vec<f64>,
    /// Objective values, one row per y sample
    pub z: Vec<Vec<f64>>,
}

impl LandscapeGrid {
    /// Evaluate `objective` at every `[x, y]` on a `num x num` grid
    pub fn sample<O>(
        objective: &O,
        x_range: (f64, f64),
        y_range: (f64, f64),
        num: usize,
    ) -> EvoResult<Self>
    where
        O: ObjectiveFunction + ?Sized,
    {
        if num < 2 {
            return Err(EvolutionError::Configuration(format!(
                "Landscape needs at least 2 samples per axis, got {}",
                num
            )));
        }
        if objective.min_dimension() > 2 {
            return Err(EvolutionError::DimensionMismatch {
                expected: objective.min_dimension(),
                actual: 2,
            });
        }
        for (low, high) in [x_range, y_range] {
            if !(low.is_finite() && high.is_finite()) {
                return Err(EvolutionError::Configuration(format!(
                    "Landscape range must be finite, got ({}, {})",
                    low, high
                )));
            }
        }

        let x = linspace(x_range.0, x_range.1, num);
        let y = linspace(y_range.0, y_range.1, num);
        let z = y
            .iter()
            .map(|&yv| x.iter().map(|&xv| objective.evaluate(&[xv, yv])).collect())
            .collect();

        Ok(Self {
            function: objective.name().to_string(),
            x,
            y,
            z,
        })
    }

    /// Samples per axis
    pub fn num(&self) -> usize {
        self.x.len()
    }

    /// Smallest finite value on the grid
    pub fn min(&self) -> Option<f64> {
        self.values().fold(None, |acc, v| match acc {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
    }

    /// Largest finite value on the grid
    pub fn max(&self) -> Option<f64> {
        self.values().fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.z.iter().flatten().copied().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::{Cigar, Sphere};
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(-10.0, 10.0, 2), vec![-10.0, 10.0]);
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());

        let points = linspace(-10.0, 10.0, 101);
        assert_eq!(points.len(), 101);
        assert_eq!(points[100], 10.0);
        assert_relative_eq!(points[50], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_matches_direct_evaluation() {
        let grid = LandscapeGrid::sample(&Cigar, (-1.0, 2.0), (-3.0, 1.0), 7).unwrap();

        assert_eq!(grid.function, "cigar");
        assert_eq!(grid.num(), 7);
        assert_eq!(grid.z.len(), 7);
        for (row, &yv) in grid.y.iter().enumerate() {
            assert_eq!(grid.z[row].len(), 7);
            for (col, &xv) in grid.x.iter().enumerate() {
                assert_eq!(grid.z[row][col], Cigar.evaluate(&[xv, yv]));
            }
        }
    }

    #[test]
    fn test_sphere_extremes() {
        let grid = LandscapeGrid::sample(&Sphere, (-2.0, 2.0), (-2.0, 2.0), 5).unwrap();
        assert_eq!(grid.min(), Some(0.0));
        assert_eq!(grid.max(), Some(8.0));
    }

    #[test]
    fn test_invalid_grid() {
        assert!(LandscapeGrid::sample(&Sphere, (0.0, 1.0), (0.0, 1.0), 1).is_err());
        assert!(LandscapeGrid::sample(&Sphere, (f64::NAN, 1.0), (0.0, 1.0), 3).is_err());
    }

    #[test]
    fn test_serializes_to_json() {
        let grid = LandscapeGrid::sample(&Sphere, (0.0, 1.0), (0.0, 1.0), 2).unwrap();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["function"], "sphere");
        assert_eq!(json["z"][1][1], 2.0);
    }
}
