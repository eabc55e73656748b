//! Objective functions and benchmarks
//!
//! This module provides the objective-function abstraction, the explicit
//! fitness direction, and the benchmark suite.

pub mod benchmarks;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::traits::*;
}
