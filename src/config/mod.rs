//! Configuration loading and layering.
//!
//! Handles `buildcfg.toml` loading, environment variable overrides, and
//! resolution of declared values (toolchain settings, packaging globs,
//! dependency coordinates) into the typed models.

pub mod loader;
pub mod schema;

pub use loader::{BuildConfig, ConfigError};
pub use schema::{BuildTypeConfig, BuildTypesConfig};
