//! Signing identity resolution.
//!
//! Turns loaded [`BuildProperties`] into a [`SigningIdentity`]. Resolution
//! never fails: each missing field or unusable key store becomes a
//! diagnostic and the field is left empty. The failure is deferred to
//! [`SigningIdentity::require_complete`], so a debug build is unaffected by
//! a missing release signing setup.

use std::path::{Path, PathBuf};

use crate::constants::{KEY_ALIAS, KEY_PASSWORD, STORE_FILE, STORE_PASSWORD};
use crate::models::{Diagnostic, Resolved, SigningIdentity};
use crate::properties::BuildProperties;

/// Resolves a named signing config against a project root.
#[derive(Debug, Clone)]
pub struct SigningConfigResolver {
    name: String,
    project_root: PathBuf,
}

impl SigningConfigResolver {
    /// `project_root` anchors a relative `storeFile`.
    pub fn new(name: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            project_root: project_root.into(),
        }
    }

    pub fn resolve(&self, props: &BuildProperties) -> Resolved<SigningIdentity> {
        let mut resolved = Resolved::clean(SigningIdentity {
            name: self.name.clone(),
            ..Default::default()
        });

        let alias = required(props, KEY_ALIAS, &mut resolved);
        let key_password = required(props, KEY_PASSWORD, &mut resolved);
        let store_password = required(props, STORE_PASSWORD, &mut resolved);
        resolved.value.alias = alias;
        resolved.value.key_password = key_password;
        resolved.value.store_password = store_password;

        if let Some(raw) = props.get_non_empty(STORE_FILE) {
            let path = self.locate(raw);
            if path.is_file() {
                resolved.value.store_file = Some(path);
            } else {
                resolved.warn(Diagnostic::InvalidPath {
                    field: STORE_FILE.to_string(),
                    path,
                });
            }
        } else {
            resolved.warn(Diagnostic::MissingField {
                field: STORE_FILE.to_string(),
            });
        }

        tracing::debug!(
            config = %self.name,
            complete = resolved.value.is_complete(),
            "resolved signing identity"
        );
        resolved
    }

    fn locate(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

fn required(
    props: &BuildProperties,
    key: &str,
    resolved: &mut Resolved<SigningIdentity>,
) -> String {
    match props.get_non_empty(key) {
        Some(v) => v.to_string(),
        None => {
            resolved.warn(Diagnostic::MissingField {
                field: key.to_string(),
            });
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn props(pairs: &[(&str, &str)]) -> BuildProperties {
        pairs.iter().copied().collect()
    }

    fn missing(field: &str) -> Diagnostic {
        Diagnostic::MissingField {
            field: field.to_string(),
        }
    }

    #[test]
    fn complete_properties_resolve_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("upload.jks"), b"ks").unwrap();

        let resolver = SigningConfigResolver::new("release", dir.path());
        let resolved = resolver.resolve(&props(&[
            ("keyAlias", "upload"),
            ("keyPassword", "kp"),
            ("storeFile", "upload.jks"),
            ("storePassword", "sp"),
        ]));

        assert!(resolved.diagnostics.is_empty());
        let id = resolved.value;
        assert_eq!(id.name, "release");
        assert_eq!(id.alias, "upload");
        assert_eq!(id.key_password, "kp");
        assert_eq!(id.store_password, "sp");
        assert_eq!(id.store_file, Some(dir.path().join("upload.jks")));
        assert!(id.is_complete());
    }

    #[test]
    fn missing_store_file_warns_exactly_once() {
        let resolver = SigningConfigResolver::new("release", "/project");
        let resolved = resolver.resolve(&props(&[
            ("keyAlias", "upload"),
            ("keyPassword", "kp"),
            ("storePassword", "sp"),
        ]));

        assert_eq!(resolved.value.store_file, None);
        assert_eq!(resolved.diagnostics, vec![missing("storeFile")]);
    }

    #[test]
    fn nonexistent_store_file_is_left_unset() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = SigningConfigResolver::new("release", dir.path());
        let resolved = resolver.resolve(&props(&[
            ("keyAlias", "upload"),
            ("keyPassword", "kp"),
            ("storeFile", "nope.jks"),
            ("storePassword", "sp"),
        ]));

        assert_eq!(resolved.value.store_file, None);
        assert_eq!(
            resolved.diagnostics,
            vec![Diagnostic::InvalidPath {
                field: "storeFile".into(),
                path: dir.path().join("nope.jks"),
            }]
        );
    }

    #[test]
    fn directory_is_not_a_key_store() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = SigningConfigResolver::new("release", dir.path());
        let resolved = resolver.resolve(&props(&[("storeFile", ".")]));
        assert_eq!(resolved.value.store_file, None);
        assert!(matches!(
            resolved.diagnostics.last(),
            Some(Diagnostic::InvalidPath { .. })
        ));
    }

    #[test]
    fn absolute_store_file_ignores_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let ks = dir.path().join("abs.jks");
        std::fs::write(&ks, b"ks").unwrap();

        let resolver = SigningConfigResolver::new("release", "/elsewhere");
        let resolved = resolver.resolve(&props(&[("storeFile", ks.to_str().unwrap())]));
        assert_eq!(resolved.value.store_file, Some(ks));
    }

    #[test]
    fn empty_properties_warn_for_every_field_in_order() {
        let resolver = SigningConfigResolver::new("release", "/project");
        let resolved = resolver.resolve(&BuildProperties::default());
        assert_eq!(
            resolved.diagnostics,
            vec![
                missing("keyAlias"),
                missing("keyPassword"),
                missing("storePassword"),
                missing("storeFile"),
            ]
        );
        assert_eq!(resolved.value, SigningIdentity {
            name: "release".into(),
            ..Default::default()
        });
    }

    #[test]
    fn empty_values_count_as_missing() {
        let resolver = SigningConfigResolver::new("release", "/project");
        let resolved = resolver.resolve(&props(&[("keyAlias", ""), ("storeFile", "")]));
        assert_eq!(resolved.diagnostics[0], missing("keyAlias"));
        assert_eq!(resolved.diagnostics.last(), Some(&missing("storeFile")));
    }

    #[test]
    fn alias_and_missing_store_scenario() {
        let resolver = SigningConfigResolver::new("release", "/project");
        let resolved = resolver.resolve(&props(&[
            ("keyAlias", "release"),
            ("storeFile", "/tmp/missing.jks"),
        ]));

        assert_eq!(resolved.value.alias, "release");
        assert_eq!(resolved.value.store_file, None);
        assert_eq!(
            resolved.diagnostics,
            vec![
                missing("keyPassword"),
                missing("storePassword"),
                Diagnostic::InvalidPath {
                    field: "storeFile".into(),
                    path: PathBuf::from("/tmp/missing.jks"),
                },
            ]
        );
    }
}
