//! # emna-bench
//!
//! A benchmark harness for the isotropic Estimation of Multivariate Normal
//! Algorithm (EMNA) on continuous black-box minimization problems.
//!
//! Each run samples populations from an isotropic Gaussian, refits the mean
//! and a single shared spread from the top μ individuals, and records the
//! best-so-far fitness after every function evaluation until a wall-clock
//! budget runs out.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use emna_bench::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut emna = Emna::builder()
//!     .dimension(10)
//!     .population_size(50)
//!     .selection_size(25)
//!     .objective(Sphere)
//!     .build(&mut rng)?;
//!
//! let record = SearchLoop::with_termination(MaxGenerations::new(100))
//!     .run(&mut emna, &mut rng)?;
//! println!("{}", record.summary());
//! ```

pub mod algorithms;
pub mod error;
pub mod experiment;
pub mod fitness;
pub mod landscape;
pub mod population;
pub mod recorder;
pub mod storage;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::error::*;
    pub use crate::experiment::*;
    pub use crate::fitness::prelude::*;
    pub use crate::landscape::*;
    pub use crate::population::prelude::*;
    pub use crate::recorder::prelude::*;
    pub use crate::storage::prelude::*;
    pub use crate::termination::prelude::*;
}
