//! Application identity and compile options.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Marker string meaning "use the value the toolchain supplies".
pub const TOOLCHAIN_MARKER: &str = "toolchain";

/// A declared value that is either written literally or taken from the
/// toolchain (`minSdk = flutter.minSdkVersion` style).
///
/// In TOML: `min_sdk = 21` or `min_sdk = "toolchain"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    Literal(T),
    Toolchain,
}

impl<T> Setting<T> {
    /// Resolve against the toolchain-supplied value, if any.
    ///
    /// Returns `None` only for a `Toolchain` setting the toolchain does
    /// not provide.
    pub fn resolve(self, supplied: Option<T>) -> Option<T> {
        match self {
            Setting::Literal(v) => Some(v),
            Setting::Toolchain => supplied,
        }
    }
}

impl<T: Serialize> Serialize for Setting<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Setting::Literal(v) => v.serialize(serializer),
            Setting::Toolchain => serializer.serialize_str(TOOLCHAIN_MARKER),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Setting<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        enum Marker {
            #[serde(rename = "toolchain")]
            Toolchain,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Marker(Marker),
            Literal(T),
        }

        match Raw::<T>::deserialize(deserializer)? {
            Raw::Marker(Marker::Toolchain) => Ok(Setting::Toolchain),
            Raw::Literal(v) => Ok(Setting::Literal(v)),
        }
    }
}

/// Java language level (`JavaVersion.VERSION_11` is `JavaVersion(11)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JavaVersion(pub u32);

impl JavaVersion {
    pub const MINIMUM: JavaVersion = JavaVersion(8);

    /// Gradle's constant name, e.g. `VERSION_11` (or `VERSION_1_8` for 8).
    pub fn gradle_name(self) -> String {
        if self.0 <= 8 {
            format!("VERSION_1_{}", self.0)
        } else {
            format!("VERSION_{}", self.0)
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 <= 8 {
            write!(f, "1.{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Java/Kotlin compatibility settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOptions {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
    /// Kotlin `jvmTarget`, rendered the way `JavaVersion.toString()` does.
    pub jvm_target: String,
    pub core_library_desugaring: bool,
}

/// Identity and SDK levels shared by every variant. Constant for a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationIdentity {
    pub namespace: String,
    pub application_id: String,
    pub version_code: u32,
    pub version_name: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,
    pub multidex_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        sdk: Setting<u32>,
        ndk: Setting<String>,
    }

    #[test]
    fn setting_parses_literal_and_marker() {
        let h: Holder = toml::from_str("sdk = 36\nndk = \"toolchain\"").unwrap();
        assert_eq!(h.sdk, Setting::Literal(36));
        assert_eq!(h.ndk, Setting::Toolchain);
    }

    #[test]
    fn setting_string_literal_is_not_marker() {
        let h: Holder = toml::from_str("sdk = \"toolchain\"\nndk = \"27.0.12077973\"").unwrap();
        assert_eq!(h.sdk, Setting::Toolchain);
        assert_eq!(h.ndk, Setting::Literal("27.0.12077973".to_string()));
    }

    #[test]
    fn setting_rejects_other_strings_for_numbers() {
        let result: Result<Holder, _> = toml::from_str("sdk = \"latest\"\nndk = \"toolchain\"");
        assert!(result.is_err());
    }

    #[test]
    fn setting_resolve() {
        assert_eq!(Setting::Literal(21).resolve(Some(24)), Some(21));
        assert_eq!(Setting::<u32>::Toolchain.resolve(Some(24)), Some(24));
        assert_eq!(Setting::<u32>::Toolchain.resolve(None), None);
    }

    #[test]
    fn setting_serializes_marker() {
        assert_eq!(serde_json::to_string(&Setting::<u32>::Toolchain).unwrap(), "\"toolchain\"");
        assert_eq!(serde_json::to_string(&Setting::Literal(36)).unwrap(), "36");
    }

    #[test]
    fn java_version_names() {
        assert_eq!(JavaVersion(11).gradle_name(), "VERSION_11");
        assert_eq!(JavaVersion(11).to_string(), "11");
        assert_eq!(JavaVersion(8).gradle_name(), "VERSION_1_8");
        assert_eq!(JavaVersion(8).to_string(), "1.8");
    }
}
