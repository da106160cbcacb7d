//! Signing properties file loading.
//!
//! Reads the line-oriented `key=value` file (`key.properties`) the release
//! signing config is built from. A missing file is not an error: it yields
//! an empty [`BuildProperties`] so debug builds work without any signing
//! setup.

pub mod parser;

use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Resolved;

/// Errors while loading a properties file that exists.
#[derive(Error, Debug)]
pub enum PropertiesError {
    #[error("failed to read properties file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

const REDACTED: &str = "[REDACTED]";

/// Keys whose values must never be printed.
pub fn is_sensitive_key(key: &str) -> bool {
    key.to_ascii_lowercase().contains("password")
}

/// Key/value pairs loaded from a properties file, in file order.
///
/// Immutable once loaded. Later duplicates of a key replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildProperties {
    entries: IndexMap<String, String>,
}

impl BuildProperties {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but treats an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries for display, with password values replaced by `[REDACTED]`.
    pub fn redacted(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().map(|(key, value)| {
            if is_sensitive_key(key) {
                (key, REDACTED)
            } else {
                (key, value)
            }
        })
    }

    /// Serialize back to properties text that parses to the same entries.
    pub fn to_properties_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(&parser::escape(key, true));
            out.push('=');
            out.push_str(&parser::escape(value, false));
            out.push('\n');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BuildProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An optional properties file on disk.
#[derive(Debug, Clone)]
pub struct PropertySource {
    path: PathBuf,
}

impl PropertySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, or an empty mapping when it does not exist.
    ///
    /// Malformed lines come back as diagnostics; only an existing file that
    /// cannot be read is an error. Content that is not UTF-8 is read as
    /// ISO-8859-1, the native encoding of Java properties files.
    pub fn load(&self) -> Result<Resolved<BuildProperties>, PropertiesError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                let content = decode(bytes);
                let resolved = parser::parse(&content, &self.path);
                tracing::debug!(
                    path = %self.path.display(),
                    keys = resolved.value.len(),
                    "loaded properties"
                );
                Ok(resolved)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "properties file not found, using empty defaults");
                Ok(Resolved::clean(BuildProperties::default()))
            }
            Err(e) => Err(PropertiesError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("properties file is not UTF-8, reading as ISO-8859-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Diagnostic;

    #[test]
    fn missing_file_is_empty_and_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let source = PropertySource::new(dir.path().join("key.properties"));
        let loaded = source.load().unwrap();
        assert!(loaded.value.is_empty());
        assert!(loaded.diagnostics.is_empty());
    }

    #[test]
    fn loads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.properties");
        std::fs::write(
            &path,
            "storePassword=s3cret\nkeyPassword=k3y\nkeyAlias=upload\nstoreFile=upload.jks\n",
        )
        .unwrap();

        let loaded = PropertySource::new(&path).load().unwrap();
        assert!(loaded.diagnostics.is_empty());
        assert_eq!(loaded.value.get("keyAlias"), Some("upload"));
        assert_eq!(loaded.value.get("storeFile"), Some("upload.jks"));
        let keys: Vec<_> = loaded.value.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["storePassword", "keyPassword", "keyAlias", "storeFile"]);
    }

    #[test]
    fn malformed_lines_warn_and_continue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.properties");
        std::fs::write(&path, "keyAlias=upload\njunk line\n=novalue\nstorePassword=pw\n").unwrap();

        let loaded = PropertySource::new(&path).load().unwrap();
        assert_eq!(loaded.value.len(), 2);
        assert_eq!(
            loaded.diagnostics,
            vec![
                Diagnostic::MalformedLine { file: path.clone(), line: 2 },
                Diagnostic::MalformedLine { file: path.clone(), line: 3 },
            ]
        );
    }

    #[test]
    fn latin1_file_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.properties");
        std::fs::write(&path, b"keyAlias=upload\nstorePassword=p\xe4ss\n").unwrap();

        let loaded = PropertySource::new(&path).load().unwrap();
        assert!(loaded.diagnostics.is_empty());
        assert_eq!(loaded.value.get("keyAlias"), Some("upload"));
        assert_eq!(loaded.value.get("storePassword"), Some("päss"));
    }

    #[test]
    fn utf8_file_is_not_reinterpreted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.properties");
        std::fs::write(&path, "keyPassword=pässwörd\n").unwrap();

        let loaded = PropertySource::new(&path).load().unwrap();
        assert_eq!(loaded.value.get("keyPassword"), Some("pässwörd"));
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PropertySource::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("failed to read properties file"));
    }

    #[test]
    fn password_keys_are_sensitive() {
        assert!(is_sensitive_key("keyPassword"));
        assert!(is_sensitive_key("storePassword"));
        assert!(!is_sensitive_key("keyAlias"));
        assert!(!is_sensitive_key("storeFile"));
    }

    #[test]
    fn redacted_hides_password_values_only() {
        let props: BuildProperties = [
            ("keyAlias", "upload"),
            ("keyPassword", "k3y"),
            ("storePassword", "s3cret"),
        ]
        .into_iter()
        .collect();
        let shown: Vec<_> = props.redacted().collect();
        assert_eq!(
            shown,
            vec![
                ("keyAlias", "upload"),
                ("keyPassword", "[REDACTED]"),
                ("storePassword", "[REDACTED]"),
            ]
        );
    }

    #[test]
    fn get_non_empty_skips_blank_values() {
        let props: BuildProperties = [("keyAlias", ""), ("storeFile", "a.jks")].into_iter().collect();
        assert_eq!(props.get("keyAlias"), Some(""));
        assert_eq!(props.get_non_empty("keyAlias"), None);
        assert_eq!(props.get_non_empty("storeFile"), Some("a.jks"));
        assert_eq!(props.get_non_empty("storePassword"), None);
    }

    #[test]
    fn write_then_read_is_verbatim() {
        let props: BuildProperties = [
            ("keyAlias", "release"),
            ("keyPassword", "  p@ss=word:#!\\ "),
            ("storeFile", "C:\\keys\\release.jks"),
            ("with space", "line1\nline2\ttab"),
            ("unicode", "pässwörd"),
            ("empty", ""),
        ]
        .into_iter()
        .collect();

        let text = props.to_properties_string();
        let reparsed = parser::parse(&text, Path::new("roundtrip.properties"));
        assert!(reparsed.diagnostics.is_empty());
        assert_eq!(reparsed.value, props);
    }
}
