//! `buildcfg.toml` sections and their built-in defaults.
//!
//! The defaults reproduce the ClearPath Recovery release setup, so an
//! empty project file still yields a complete configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::DEFAULT_PROPERTIES_FILE;
use crate::models::{JavaVersion, Setting};
use crate::packaging::DEFAULT_EXCLUDES;

/// `[application]`: identity and SDK levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub namespace: String,
    pub application_id: String,
    pub version_code: u32,
    pub version_name: String,
    pub compile_sdk: Setting<u32>,
    pub min_sdk: Setting<u32>,
    pub target_sdk: Setting<u32>,
    pub ndk_version: Option<Setting<String>>,
    pub multidex_enabled: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            namespace: "com.TheScanMan.clearpathrecovery".to_string(),
            application_id: "com.TheScanMan.clearpathrecovery".to_string(),
            version_code: 2,
            version_name: "1.0.1".to_string(),
            compile_sdk: Setting::Literal(36),
            min_sdk: Setting::Toolchain,
            target_sdk: Setting::Literal(36),
            ndk_version: Some(Setting::Toolchain),
            multidex_enabled: true,
        }
    }
}

/// `[toolchain]`: values the toolchain supplies for `"toolchain"` settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub compile_sdk: Option<u32>,
    pub min_sdk: Option<u32>,
    pub target_sdk: Option<u32>,
    pub ndk_version: Option<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compile_sdk: None,
            min_sdk: Some(21),
            target_sdk: None,
            ndk_version: Some("27.0.12077973".to_string()),
        }
    }
}

/// `[compile_options]`: Java/Kotlin compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptionsConfig {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
    /// Defaults to `target_compatibility`.
    pub jvm_target: Option<JavaVersion>,
    pub core_library_desugaring: bool,
}

impl Default for CompileOptionsConfig {
    fn default() -> Self {
        Self {
            source_compatibility: JavaVersion(11),
            target_compatibility: JavaVersion(11),
            jvm_target: None,
            core_library_desugaring: true,
        }
    }
}

/// `[signing]`: where the release credentials come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningSection {
    /// Name build types use to reference this signing config.
    pub name: String,
    /// Properties file, relative to the project root unless absolute.
    pub properties_file: PathBuf,
}

impl Default for SigningSection {
    fn default() -> Self {
        Self {
            name: "release".to_string(),
            properties_file: PathBuf::from(DEFAULT_PROPERTIES_FILE),
        }
    }
}

/// One build type's overrides. `None` falls through to the shared value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildTypeConfig {
    pub minify_enabled: Option<bool>,
    pub shrink_resources: Option<bool>,
    /// An empty string clears an inherited suffix.
    pub application_id_suffix: Option<String>,
    pub signing_config: Option<String>,
    pub debuggable: Option<bool>,
}

/// `[build_types]`: shared values plus per-variant overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildTypesConfig {
    pub shared: BuildTypeConfig,
    pub debug: BuildTypeConfig,
    pub release: BuildTypeConfig,
}

impl Default for BuildTypesConfig {
    fn default() -> Self {
        Self {
            shared: BuildTypeConfig::default(),
            debug: BuildTypeConfig {
                application_id_suffix: Some(".debug".to_string()),
                debuggable: Some(true),
                ..Default::default()
            },
            release: BuildTypeConfig {
                minify_enabled: Some(false),
                shrink_resources: Some(false),
                signing_config: Some("release".to_string()),
                ..Default::default()
            },
        }
    }
}

/// `[packaging]`: resource exclusion globs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    /// Replaces the built-in list when set in a config file.
    pub excludes: Vec<String>,
    /// Appended after `excludes`.
    pub extra_excludes: Vec<String>,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            extra_excludes: Vec::new(),
        }
    }
}

/// One `[[dependencies]]` entry, coordinate still unparsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencySpec {
    pub scope: crate::models::DependencyScope,
    pub coordinate: String,
}

pub fn default_dependencies() -> Vec<DependencySpec> {
    use crate::models::DependencyScope;
    vec![
        DependencySpec {
            scope: DependencyScope::CoreLibraryDesugaring,
            coordinate: "com.android.tools:desugar_jdk_libs:2.1.4".to_string(),
        },
        DependencySpec {
            scope: DependencyScope::Implementation,
            coordinate: "androidx.multidex:multidex:2.0.1".to_string(),
        },
    ]
}
