//! Per-variant configuration.
//!
//! A variant's settings are its build type's values where present, else the
//! shared `[build_types.shared]` values, else the built-in fallbacks
//! (everything off, no suffix, no signing).

use strum::IntoEnumIterator;

use crate::config::{BuildTypeConfig, BuildTypesConfig, ConfigError};
use crate::models::{ApplicationIdentity, SigningIdentity, VariantConfig, VariantName};

/// Parse a variant name, failing with the list of known variants.
pub fn parse_variant(variant: &str) -> Result<VariantName, ConfigError> {
    variant
        .parse()
        .map_err(|_| ConfigError::unknown_variant(variant))
}

/// Builds [`VariantConfig`]s from shared defaults and build-type overrides.
#[derive(Debug, Clone, Copy)]
pub struct VariantConfigurator<'a> {
    identity: &'a ApplicationIdentity,
    build_types: &'a BuildTypesConfig,
}

impl<'a> VariantConfigurator<'a> {
    pub fn new(identity: &'a ApplicationIdentity, build_types: &'a BuildTypesConfig) -> Self {
        Self {
            identity,
            build_types,
        }
    }

    /// Configure `name`, attaching `signing` if its build type references it.
    pub fn configure(
        &self,
        name: VariantName,
        signing: &SigningIdentity,
    ) -> Result<VariantConfig, ConfigError> {
        let own = self.build_type(name);
        let shared = &self.build_types.shared;
        let flag = |select: fn(&BuildTypeConfig) -> Option<bool>| {
            select(own).or(select(shared)).unwrap_or(false)
        };

        let suffix = own
            .application_id_suffix
            .as_ref()
            .or(shared.application_id_suffix.as_ref())
            .filter(|s| !s.is_empty())
            .cloned();

        let signing = match own.signing_config.as_ref().or(shared.signing_config.as_ref()) {
            Some(config) if *config == signing.name => Some(signing.clone()),
            Some(config) => {
                return Err(ConfigError::UnknownSigningConfig {
                    variant: name,
                    name: config.clone(),
                });
            }
            None => None,
        };

        let application_id = match &suffix {
            Some(s) => format!("{}{s}", self.identity.application_id),
            None => self.identity.application_id.clone(),
        };

        tracing::debug!(variant = %name, %application_id, "configured variant");

        Ok(VariantConfig {
            name,
            application_id,
            application_id_suffix: suffix,
            signing,
            minify_enabled: flag(|b| b.minify_enabled),
            shrink_resources: flag(|b| b.shrink_resources),
            debuggable: flag(|b| b.debuggable),
        })
    }

    /// Configure every known variant, in declaration order.
    pub fn configure_all(
        &self,
        signing: &SigningIdentity,
    ) -> Result<Vec<VariantConfig>, ConfigError> {
        VariantName::iter()
            .map(|name| self.configure(name, signing))
            .collect()
    }

    fn build_type(&self, name: VariantName) -> &'a BuildTypeConfig {
        match name {
            VariantName::Debug => &self.build_types.debug,
            VariantName::Release => &self.build_types.release,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn identity() -> ApplicationIdentity {
        BuildConfig::default().application_identity().unwrap()
    }

    fn full_signing() -> SigningIdentity {
        SigningIdentity {
            name: "release".into(),
            alias: "upload".into(),
            key_password: "kp".into(),
            store_file: Some(PathBuf::from("/keys/upload.jks")),
            store_password: "sp".into(),
        }
    }

    #[test]
    fn release_attaches_identity_unchanged() {
        let id = identity();
        let types = BuildTypesConfig::default();
        let signing = full_signing();

        let config = VariantConfigurator::new(&id, &types)
            .configure(VariantName::Release, &signing)
            .unwrap();

        assert_eq!(config.name, VariantName::Release);
        assert_eq!(config.signing, Some(signing));
        assert_eq!(config.application_id, "com.TheScanMan.clearpathrecovery");
        assert_eq!(config.application_id_suffix, None);
        assert!(!config.minify_enabled);
        assert!(!config.shrink_resources);
        assert!(!config.debuggable);
    }

    #[test]
    fn debug_gets_suffix_and_no_signing() {
        let id = identity();
        let types = BuildTypesConfig::default();

        let config = VariantConfigurator::new(&id, &types)
            .configure(VariantName::Debug, &full_signing())
            .unwrap();

        assert_eq!(config.signing, None);
        assert_eq!(config.application_id_suffix.as_deref(), Some(".debug"));
        assert_eq!(config.application_id, "com.TheScanMan.clearpathrecovery.debug");
        assert!(config.debuggable);
    }

    #[test]
    fn unknown_variant_fails() {
        let err = parse_variant("staging").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVariant { ref name, .. } if name == "staging"));
        assert_eq!(
            err.to_string(),
            "unknown variant 'staging' (expected one of: debug, release)"
        );
        assert_eq!(parse_variant("debug").unwrap(), VariantName::Debug);
        assert!(parse_variant("Release").is_err());
    }

    #[test]
    fn variant_value_beats_shared_value() {
        let id = identity();
        let mut types = BuildTypesConfig::default();
        types.shared.minify_enabled = Some(true);
        types.shared.shrink_resources = Some(true);
        types.release.shrink_resources = Some(false);
        types.release.minify_enabled = None;

        let config = VariantConfigurator::new(&id, &types)
            .configure(VariantName::Release, &full_signing())
            .unwrap();
        assert!(config.minify_enabled, "inherited from shared");
        assert!(!config.shrink_resources, "release override wins");
    }

    #[test]
    fn empty_suffix_clears_shared_suffix() {
        let id = identity();
        let mut types = BuildTypesConfig::default();
        types.shared.application_id_suffix = Some(".beta".into());
        types.debug.application_id_suffix = Some(String::new());

        let configurator = VariantConfigurator::new(&id, &types);
        let debug = configurator.configure(VariantName::Debug, &full_signing()).unwrap();
        assert_eq!(debug.application_id_suffix, None);

        let release = configurator.configure(VariantName::Release, &full_signing()).unwrap();
        assert_eq!(release.application_id, "com.TheScanMan.clearpathrecovery.beta");
    }

    #[test]
    fn mismatched_signing_reference_fails() {
        let id = identity();
        let types = BuildTypesConfig::default();
        let signing = SigningIdentity {
            name: "upload".into(),
            ..full_signing()
        };
        let err = VariantConfigurator::new(&id, &types)
            .configure(VariantName::Release, &signing)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSigningConfig { .. }));
    }

    #[test]
    fn configure_all_covers_every_variant() {
        let id = identity();
        let types = BuildTypesConfig::default();
        let all = VariantConfigurator::new(&id, &types)
            .configure_all(&full_signing())
            .unwrap();
        let names: Vec<_> = all.iter().map(|v| v.name).collect();
        assert_eq!(names, vec![VariantName::Debug, VariantName::Release]);
        assert!(all[0].signing.is_none());
        assert!(all[1].signing.is_some());
    }

    #[test]
    fn incomplete_identity_is_still_attached() {
        let id = identity();
        let types = BuildTypesConfig::default();
        let partial = SigningIdentity {
            name: "release".into(),
            alias: "release".into(),
            ..Default::default()
        };
        let config = VariantConfigurator::new(&id, &types)
            .configure(VariantName::Release, &partial)
            .unwrap();
        assert_eq!(config.signing.as_ref().map(|s| s.is_complete()), Some(false));
    }
}
