//! Estimation of Distribution Algorithms (EDAs)
//!
//! EDAs replace variation operators with a probabilistic model:
//! 1. Sample a population from the model
//! 2. Select promising individuals
//! 3. Re-estimate the model from the selected individuals
//! 4. Repeat until termination
//!
//! - **EMNA**: isotropic Estimation of Multivariate Normal Algorithm

pub mod emna;

pub use emna::*;
