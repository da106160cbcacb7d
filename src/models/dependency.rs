//! Declared library dependencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gradle configuration a dependency is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyScope {
    Implementation,
    CoreLibraryDesugaring,
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyScope::Implementation => write!(f, "implementation"),
            DependencyScope::CoreLibraryDesugaring => write!(f, "coreLibraryDesugaring"),
        }
    }
}

/// Maven coordinate `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let [group, artifact, version] = parts.as_slice() else {
            return Err(format!(
                "expected group:artifact:version, got {} part(s)",
                parts.len()
            ));
        };
        for (label, part) in [("group", group), ("artifact", artifact), ("version", version)] {
            if part.is_empty() {
                return Err(format!("{label} is empty"));
            }
            if part.chars().any(char::is_whitespace) {
                return Err(format!("{label} contains whitespace"));
            }
        }
        Ok(Coordinate {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub scope: DependencyScope,
    pub coordinate: Coordinate,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.scope, self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coordinate() {
        let c: Coordinate = "com.android.tools:desugar_jdk_libs:2.1.4".parse().unwrap();
        assert_eq!(c.group, "com.android.tools");
        assert_eq!(c.artifact, "desugar_jdk_libs");
        assert_eq!(c.version, "2.1.4");
        assert_eq!(c.to_string(), "com.android.tools:desugar_jdk_libs:2.1.4");
    }

    #[test]
    fn reject_bad_coordinates() {
        assert!("androidx.multidex:multidex".parse::<Coordinate>().is_err());
        assert!("a:b:c:d".parse::<Coordinate>().is_err());
        assert!("a::1.0".parse::<Coordinate>().unwrap_err().contains("artifact"));
        assert!("a:b c:1.0".parse::<Coordinate>().unwrap_err().contains("whitespace"));
    }

    #[test]
    fn dependency_display_reads_like_gradle() {
        let d = Dependency {
            scope: DependencyScope::Implementation,
            coordinate: "androidx.multidex:multidex:2.0.1".parse().unwrap(),
        };
        assert_eq!(d.to_string(), "implementation(\"androidx.multidex:multidex:2.0.1\")");
    }

    #[test]
    fn scope_serde_is_camel_case() {
        let json = serde_json::to_string(&DependencyScope::CoreLibraryDesugaring).unwrap();
        assert_eq!(json, "\"coreLibraryDesugaring\"");
    }
}
