//! Run record persistence
//!
//! One file per (function, experiment) pair, written once at the end of a
//! run, in either pretty JSON or a versioned bincode layout.

mod files;
mod format;

pub use files::*;
pub use format::*;

/// Prelude for storage module
pub mod prelude {
    pub use super::files::*;
    pub use super::format::*;
}
