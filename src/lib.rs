//! buildcfg: declarative build-configuration loader (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod assemble;
pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
pub mod models;
pub mod output;
pub mod packaging;
pub mod properties;
pub mod signing;
pub mod variant;
