//! Core business logic module
//!
//! This module contains the release engine. Filesystem and process access
//! go through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`matrix`] - Release matrix (targets and build variants) parsing
//! - [`version`] - Project version resolution
//! - [`naming`] - Release artifact naming
//! - [`settings`] - Layered tool settings
//! - [`executor`] - Toolchain steps for one build variant
//! - [`publish`] - Copying merged images into the releases directory
//! - [`orchestrator`] - Release run over the selected targets
//! - [`check`] - Validation and release planning without building

pub mod check;
pub mod executor;
pub mod matrix;
pub mod naming;
pub mod orchestrator;
pub mod publish;
pub mod settings;
pub mod version;
