//! Search algorithms
//!
//! This module provides the EMNA strategy and the loop that drives it.

pub mod eda;
pub mod search;
pub mod traits;

pub mod prelude {
    pub use super::eda::*;
    pub use super::search::*;
    pub use super::traits::*;
}
