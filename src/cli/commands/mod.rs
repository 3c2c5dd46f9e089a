//! CLI command implementations
//!
//! Each mode of the command line is implemented in its own submodule.

pub mod check;
pub mod list;
pub mod release;
