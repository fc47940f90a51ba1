//! Core definitions (errors, results and verification helpers) shared by the
//! amudai span iteration crates.

pub mod error;
pub mod macros;
pub mod result;

pub use result::Result;
