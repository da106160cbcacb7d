//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. Environment variables
//! 2. `buildcfg.toml` in the project root
//! 3. `~/.config/buildcfg/config.toml` (global defaults)
//! 4. Built-in defaults
//!
//! Layers are merged as TOML tables before deserializing, so a file only
//! needs to name the keys it changes. Arrays replace, they do not append.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::{
    default_dependencies, ApplicationConfig, BuildTypesConfig, CompileOptionsConfig,
    DependencySpec, PackagingConfig, SigningSection, ToolchainConfig,
};
use crate::constants;
use crate::env::Env;
use crate::models::{
    ApplicationIdentity, CompileOptions, Coordinate, Dependency, JavaVersion, VariantName,
};
use crate::packaging::{PackagingRuleSet, PatternError};

/// Fatal configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Schema(#[source] toml::de::Error),

    #[error("failed to encode built-in defaults: {0}")]
    Defaults(#[from] toml::ser::Error),

    #[error("unknown variant '{name}' (expected one of: {known})")]
    UnknownVariant { name: String, known: String },

    #[error("{field} is set to \"toolchain\" but the toolchain does not provide it")]
    UnresolvedToolchainValue { field: &'static str },

    #[error("invalid packaging exclude: {0}")]
    InvalidPattern(#[from] PatternError),

    #[error("invalid dependency coordinate '{coordinate}': {reason}")]
    InvalidCoordinate { coordinate: String, reason: String },

    #[error("build type '{variant}' references unknown signing config '{name}'")]
    UnknownSigningConfig { variant: VariantName, name: String },

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn unknown_variant(name: &str) -> Self {
        ConfigError::UnknownVariant {
            name: name.to_string(),
            known: VariantName::known(),
        }
    }
}

/// Top-level build configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub application: ApplicationConfig,
    pub toolchain: ToolchainConfig,
    pub compile_options: CompileOptionsConfig,
    pub signing: SigningSection,
    pub build_types: BuildTypesConfig,
    pub packaging: PackagingConfig,
    pub dependencies: Vec<DependencySpec>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            application: ApplicationConfig::default(),
            toolchain: ToolchainConfig::default(),
            compile_options: CompileOptionsConfig::default(),
            signing: SigningSection::default(),
            build_types: BuildTypesConfig::default(),
            packaging: PackagingConfig::default(),
            dependencies: default_dependencies(),
        }
    }
}

impl BuildConfig {
    /// Load configuration with proper layering, then validate it.
    pub fn load(project_root: &Path, env: &Env) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        if let Some(global) = Self::global_config_path() {
            layers.push(global);
        }
        layers.push(project_root.join(constants::CONFIG_FILENAME));
        Self::load_layers(&layers, env)
    }

    /// Merge the given files (lowest priority first) over the defaults.
    /// Files that do not exist are skipped.
    pub fn load_layers(layers: &[PathBuf], env: &Env) -> Result<Self, ConfigError> {
        let mut merged = match toml::Value::try_from(Self::default())? {
            toml::Value::Table(table) => table,
            _ => toml::Table::new(),
        };

        for path in layers {
            if !path.exists() {
                continue;
            }
            let layer = Self::read_table(path)?;
            tracing::debug!(path = %path.display(), "applying config layer");
            merge_tables(&mut merged, layer);
        }

        let mut config = toml::Value::Table(merged)
            .try_into::<BuildConfig>()
            .map_err(ConfigError::Schema)?;
        config.apply_env_vars(env);
        config.validate()?;
        Ok(config)
    }

    fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        content.parse::<toml::Table>().map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Apply environment variable overrides. A value that would fail
    /// [`validate`](Self::validate) is ignored and the file value kept.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.get(constants::ENV_PROPERTIES_FILE) {
            self.signing.properties_file = PathBuf::from(val);
        }
        if let Some(val) = env.get(constants::ENV_VERSION_CODE) {
            match val.trim().parse::<u32>() {
                Ok(code) if code >= 1 => self.application.version_code = code,
                _ => tracing::warn!(
                    "ignoring invalid {} value: {val}",
                    constants::ENV_VERSION_CODE
                ),
            }
        }
        if let Some(val) = env.get(constants::ENV_VERSION_NAME) {
            if val.trim().is_empty() {
                tracing::warn!("ignoring blank {} value", constants::ENV_VERSION_NAME);
            } else {
                self.application.version_name = val;
            }
        }
        if let Some(val) = env.get(constants::ENV_APPLICATION_ID) {
            match validate_package_name("application_id", &val) {
                Ok(()) => self.application.application_id = val,
                Err(e) => tracing::warn!(
                    "ignoring invalid {} value: {e}",
                    constants::ENV_APPLICATION_ID
                ),
            }
        }
    }

    /// Check everything that can be checked without touching the project.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_package_name("namespace", &self.application.namespace)?;
        validate_package_name("application_id", &self.application.application_id)?;
        if self.application.version_code == 0 {
            return Err(ConfigError::Invalid {
                field: "version_code",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.application.version_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "version_name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.signing.name.is_empty() {
            return Err(ConfigError::Invalid {
                field: "signing.name",
                reason: "must not be empty".to_string(),
            });
        }

        let opts = &self.compile_options;
        for (field, version) in [
            ("source_compatibility", opts.source_compatibility),
            ("target_compatibility", opts.target_compatibility),
            ("jvm_target", opts.jvm_target.unwrap_or(opts.target_compatibility)),
        ] {
            if version < JavaVersion::MINIMUM {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("Java {version} is below the minimum of {}", JavaVersion::MINIMUM),
                });
            }
        }

        for (variant, build_type) in [
            (VariantName::Debug, &self.build_types.debug),
            (VariantName::Release, &self.build_types.release),
        ] {
            let name = build_type
                .signing_config
                .as_ref()
                .or(self.build_types.shared.signing_config.as_ref());
            if let Some(name) = name {
                if name != &self.signing.name {
                    return Err(ConfigError::UnknownSigningConfig {
                        variant,
                        name: name.clone(),
                    });
                }
            }
        }

        self.application_identity()?;
        self.packaging_rules()?;
        self.dependencies()?;
        Ok(())
    }

    /// Resolve `"toolchain"` settings and check SDK ordering.
    pub fn application_identity(&self) -> Result<ApplicationIdentity, ConfigError> {
        let app = &self.application;
        let tc = &self.toolchain;

        let compile_sdk = app
            .compile_sdk
            .clone()
            .resolve(tc.compile_sdk)
            .ok_or(ConfigError::UnresolvedToolchainValue { field: "compile_sdk" })?;
        let min_sdk = app
            .min_sdk
            .clone()
            .resolve(tc.min_sdk)
            .ok_or(ConfigError::UnresolvedToolchainValue { field: "min_sdk" })?;
        let target_sdk = app
            .target_sdk
            .clone()
            .resolve(tc.target_sdk)
            .ok_or(ConfigError::UnresolvedToolchainValue { field: "target_sdk" })?;
        let ndk_version = match &app.ndk_version {
            Some(setting) => Some(
                setting
                    .clone()
                    .resolve(tc.ndk_version.clone())
                    .ok_or(ConfigError::UnresolvedToolchainValue { field: "ndk_version" })?,
            ),
            None => None,
        };

        if min_sdk > target_sdk {
            return Err(ConfigError::Invalid {
                field: "min_sdk",
                reason: format!("{min_sdk} is above target_sdk {target_sdk}"),
            });
        }
        if target_sdk > compile_sdk {
            return Err(ConfigError::Invalid {
                field: "target_sdk",
                reason: format!("{target_sdk} is above compile_sdk {compile_sdk}"),
            });
        }

        Ok(ApplicationIdentity {
            namespace: app.namespace.clone(),
            application_id: app.application_id.clone(),
            version_code: app.version_code,
            version_name: app.version_name.clone(),
            min_sdk,
            target_sdk,
            compile_sdk,
            ndk_version,
            multidex_enabled: app.multidex_enabled,
        })
    }

    pub fn compile_options(&self) -> CompileOptions {
        let opts = &self.compile_options;
        CompileOptions {
            source_compatibility: opts.source_compatibility,
            target_compatibility: opts.target_compatibility,
            jvm_target: opts
                .jvm_target
                .unwrap_or(opts.target_compatibility)
                .to_string(),
            core_library_desugaring: opts.core_library_desugaring,
        }
    }

    pub fn packaging_rules(&self) -> Result<PackagingRuleSet, ConfigError> {
        let patterns = self
            .packaging
            .excludes
            .iter()
            .chain(&self.packaging.extra_excludes);
        Ok(PackagingRuleSet::new(patterns)?)
    }

    pub fn dependencies(&self) -> Result<Vec<Dependency>, ConfigError> {
        self.dependencies
            .iter()
            .map(|spec| {
                let coordinate = spec.coordinate.parse::<Coordinate>().map_err(|reason| {
                    ConfigError::InvalidCoordinate {
                        coordinate: spec.coordinate.clone(),
                        reason,
                    }
                })?;
                Ok(Dependency {
                    scope: spec.scope,
                    coordinate,
                })
            })
            .collect()
    }

    /// Location of the signing properties file.
    pub fn properties_path(&self, project_root: &Path) -> PathBuf {
        let path = &self.signing.properties_file;
        if path.is_absolute() {
            path.clone()
        } else {
            project_root.join(path)
        }
    }
}

/// Recursively overlay `incoming` onto `base`. Non-table values replace.
fn merge_tables(base: &mut toml::Table, incoming: toml::Table) {
    for (key, value) in incoming {
        match value {
            toml::Value::Table(table) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, table);
                } else {
                    base.insert(key, toml::Value::Table(table));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

/// Dotted Java package name with at least two segments.
fn validate_package_name(field: &'static str, name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid { field, reason };
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() < 2 {
        return Err(invalid(format!("'{name}' needs at least two dot-separated segments")));
    }
    for segment in segments {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => {
                return Err(invalid(format!(
                    "'{name}': each segment must start with a letter"
                )));
            }
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(format!(
                "'{name}': segments may only contain letters, digits and '_'"
            )));
        }
    }
    Ok(())
}
