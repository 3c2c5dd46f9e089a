//! Infrastructure layer
//!
//! Handles all I/O operations: console, filesystem and external processes.
//! This module is the only place where side effects occur.

pub mod console;
pub mod filesystem;
pub mod process;
pub mod toolchain;
