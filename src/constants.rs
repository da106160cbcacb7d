//! App-wide constants.
//!
//! Centralises the tool name, config paths, property keys and environment
//! variable names so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "buildcfg";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (exported by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Project config filename (e.g. `buildcfg.toml` in the project root).
pub const CONFIG_FILENAME: &str = "buildcfg.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "buildcfg";

/// Default signing properties file, relative to the project root.
pub const DEFAULT_PROPERTIES_FILE: &str = "key.properties";

// ── Signing property keys ───────────────────────────────────────────

pub const KEY_ALIAS: &str = "keyAlias";
pub const KEY_PASSWORD: &str = "keyPassword";
pub const STORE_FILE: &str = "storeFile";
pub const STORE_PASSWORD: &str = "storePassword";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROPERTIES_FILE: &str = "BUILDCFG_PROPERTIES_FILE";
pub const ENV_VERSION_CODE: &str = "BUILDCFG_VERSION_CODE";
pub const ENV_VERSION_NAME: &str = "BUILDCFG_VERSION_NAME";
pub const ENV_APPLICATION_ID: &str = "BUILDCFG_APPLICATION_ID";
pub const ENV_LOG: &str = "BUILDCFG_LOG";
