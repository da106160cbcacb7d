//! Shared types used across all modules.
//!
//! This module defines the resolved configuration values (application
//! identity, signing identity, variant config, dependencies) and the
//! diagnostic type that carries non-fatal warnings. Other modules import
//! from here rather than reaching into each other's internals.

pub mod dependency;
pub mod diagnostic;
pub mod identity;
pub mod signing;
pub mod variant;

pub use dependency::{Coordinate, Dependency, DependencyScope};
pub use diagnostic::{Diagnostic, Resolved};
pub use identity::{ApplicationIdentity, CompileOptions, JavaVersion, Setting};
pub use signing::{SigningError, SigningIdentity};
pub use variant::{VariantConfig, VariantName};
