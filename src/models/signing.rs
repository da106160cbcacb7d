//! Signing identity and the deferred signing failure.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{KEY_ALIAS, KEY_PASSWORD, STORE_FILE, STORE_PASSWORD};

/// Raised when signing is attempted with an incomplete identity.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SigningError {
    #[error("signing config '{config}' is incomplete: missing {}", missing.join(", "))]
    Incomplete {
        config: String,
        missing: Vec<&'static str>,
    },

    #[error("variant '{variant}' has no signing config")]
    NotConfigured { variant: String },
}

/// Credentials used to sign a release artifact.
///
/// Empty strings mean "not provided". `store_file`, when set, pointed at an
/// existing file at resolution time.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SigningIdentity {
    pub name: String,
    pub alias: String,
    pub key_password: String,
    pub store_file: Option<PathBuf>,
    pub store_password: String,
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("key_password", &redacted(&self.key_password))
            .field("store_file", &self.store_file)
            .field("store_password", &redacted(&self.store_password))
            .finish()
    }
}

impl Serialize for SigningIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SigningIdentity", 6)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("alias", &self.alias)?;
        s.serialize_field("key_password", &redacted(&self.key_password))?;
        s.serialize_field("store_file", &self.store_file)?;
        s.serialize_field("store_password", &redacted(&self.store_password))?;
        s.serialize_field("complete", &self.is_complete())?;
        s.end()
    }
}

fn redacted(secret: &str) -> Option<&'static str> {
    (!secret.is_empty()).then_some("[REDACTED]")
}

impl SigningIdentity {
    /// Property keys whose values are missing or unusable, in resolution order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.alias.is_empty() {
            missing.push(KEY_ALIAS);
        }
        if self.key_password.is_empty() {
            missing.push(KEY_PASSWORD);
        }
        if self.store_password.is_empty() {
            missing.push(STORE_PASSWORD);
        }
        if self.store_file.is_none() {
            missing.push(STORE_FILE);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Check the identity right before signing.
    ///
    /// Resolution only warns about gaps; this is where they become fatal.
    pub fn require_complete(&self) -> Result<&Path, SigningError> {
        let missing = self.missing_fields();
        match &self.store_file {
            Some(path) if missing.is_empty() => Ok(path),
            _ => Err(SigningError::Incomplete {
                config: self.name.clone(),
                missing,
            }),
        }
    }
}
