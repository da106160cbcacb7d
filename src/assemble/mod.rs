//! Single-pass configuration assembly.
//!
//! Runs property loading, signing resolution and variant configuration in
//! order and collects every warning along the way:
//!
//! ```text
//! PropertySource -> SigningConfigResolver -> VariantConfigurator
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{BuildConfig, ConfigError};
use crate::models::{
    ApplicationIdentity, CompileOptions, Dependency, DependencyScope, Diagnostic, Resolved,
    VariantConfig,
};
use crate::packaging::PackagingRuleSet;
use crate::properties::{PropertiesError, PropertySource};
use crate::signing::SigningConfigResolver;
use crate::variant::{VariantConfigurator, parse_variant};

/// Fatal assembly errors.
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Properties(#[from] PropertiesError),
}

/// Everything the packaging pipeline needs for one variant.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledConfig {
    pub application: ApplicationIdentity,
    pub compile_options: CompileOptions,
    pub variant: VariantConfig,
    pub packaging_excludes: PackagingRuleSet,
    pub dependencies: Vec<Dependency>,
    pub properties_file: PathBuf,
}

/// Assemble the configuration for `variant`.
///
/// The variant name is checked first, so an unknown name fails without
/// reading anything. All other problems short of an unreadable file or an
/// invalid config come back as diagnostics.
pub fn assemble(
    config: &BuildConfig,
    project_root: &Path,
    variant: &str,
) -> Result<Resolved<AssembledConfig>, AssembleError> {
    let name = parse_variant(variant)?;

    let application = config.application_identity()?;
    let packaging_excludes = config.packaging_rules()?;
    let dependencies = config.dependencies()?;
    let compile_options = config.compile_options();

    let mut resolved = Resolved::clean(());

    let properties_file = config.properties_path(project_root);
    let properties = resolved.absorb(PropertySource::new(&properties_file).load()?);

    let resolver = SigningConfigResolver::new(config.signing.name.clone(), project_root);
    let signing = resolved.absorb(resolver.resolve(&properties));

    let variant = VariantConfigurator::new(&application, &config.build_types)
        .configure(name, &signing)?;

    if compile_options.core_library_desugaring
        && !dependencies
            .iter()
            .any(|d| d.scope == DependencyScope::CoreLibraryDesugaring)
    {
        resolved.warn(Diagnostic::MissingDesugaring);
    }

    tracing::info!(
        variant = %name,
        application_id = %variant.application_id,
        warnings = resolved.diagnostics.len(),
        "assembled build configuration"
    );

    Ok(resolved.map(|()| AssembledConfig {
        application,
        compile_options,
        variant,
        packaging_excludes,
        dependencies,
        properties_file,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VariantName;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_variant_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the properties file should be would be a read error.
        std::fs::create_dir(dir.path().join("key.properties")).unwrap();

        let err = assemble(&BuildConfig::default(), dir.path(), "staging").unwrap_err();
        assert!(matches!(
            err,
            AssembleError::Config(ConfigError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn debug_without_properties_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = assemble(&BuildConfig::default(), dir.path(), "debug").unwrap();

        let assembled = resolved.value;
        assert_eq!(assembled.variant.name, VariantName::Debug);
        assert_eq!(assembled.variant.signing, None);
        assert_eq!(assembled.properties_file, dir.path().join("key.properties"));
        // four missing signing fields, nothing else
        assert_eq!(resolved.diagnostics.len(), 4);
    }

    #[test]
    fn missing_desugaring_dependency_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = BuildConfig::default();
        config
            .dependencies
            .retain(|d| d.scope != DependencyScope::CoreLibraryDesugaring);

        let resolved = assemble(&config, dir.path(), "release").unwrap();
        assert_eq!(resolved.diagnostics.last(), Some(&Diagnostic::MissingDesugaring));

        config.compile_options.core_library_desugaring = false;
        let resolved = assemble(&config, dir.path(), "release").unwrap();
        assert!(!resolved.diagnostics.contains(&Diagnostic::MissingDesugaring));
    }

    #[test]
    fn unreadable_properties_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("key.properties")).unwrap();
        let err = assemble(&BuildConfig::default(), dir.path(), "release").unwrap_err();
        assert!(matches!(err, AssembleError::Properties(_)));
    }
}
