//! Build variants.

use serde::Serialize;
use std::path::Path;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::models::signing::{SigningError, SigningIdentity};

/// The recognised build variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VariantName {
    Debug,
    Release,
}

impl VariantName {
    /// Comma-separated list of known names, for error messages.
    pub fn known() -> String {
        VariantName::iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Fully merged configuration for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantConfig {
    pub name: VariantName,
    /// Base application id plus the suffix, if any.
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id_suffix: Option<String>,
    pub signing: Option<SigningIdentity>,
    pub minify_enabled: bool,
    pub shrink_resources: bool,
    pub debuggable: bool,
}

impl VariantConfig {
    /// The identity and key store this variant would be signed with.
    ///
    /// Fails when the variant is unsigned or its identity is incomplete.
    pub fn require_signing(&self) -> Result<(&SigningIdentity, &Path), SigningError> {
        let identity = self
            .signing
            .as_ref()
            .ok_or_else(|| SigningError::NotConfigured {
                variant: self.name.to_string(),
            })?;
        let store = identity.require_complete()?;
        Ok((identity, store))
    }
}
