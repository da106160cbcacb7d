//! Packaging exclusion rules.
//!
//! An ordered set of path globs. During artifact assembly, manifest entries
//! matching any rule are dropped silently instead of failing the build on a
//! duplicate file.

pub mod glob;

use regex::Regex;
use serde::Serialize;

pub use glob::PatternError;

/// Default exclusions: license/notice metadata that many libraries ship
/// under the same path.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "/META-INF/{AL2.0,LGPL2.1}",
    "META-INF/DEPENDENCIES",
    "META-INF/LICENSE",
    "META-INF/LICENSE.txt",
    "META-INF/license.txt",
    "META-INF/LICENSE.md",
    "META-INF/LICENSE-notice.md",
    "META-INF/NOTICE",
    "META-INF/NOTICE.txt",
    "META-INF/notice.txt",
    "META-INF/NOTICE.md",
    "META-INF/ASL2.0",
    "META-INF/*.kotlin_module",
];

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    regex: Regex,
}

/// Compiled, ordered exclusion rules.
#[derive(Debug, Clone)]
pub struct PackagingRuleSet {
    rules: Vec<Rule>,
}

/// Result of filtering a manifest. Both lists keep input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilteredManifest {
    pub kept: Vec<String>,
    pub dropped: Vec<String>,
}

impl PackagingRuleSet {
    /// Compile the given patterns, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref().trim().to_string();
                glob::compile(&pattern).map(|regex| Rule { pattern, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The built-in rule set.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_EXCLUDES).expect("default packaging patterns compile")
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First pattern that excludes `path`, if any.
    ///
    /// Backslashes are treated as separators and a leading `/` is ignored,
    /// so `/META-INF/LICENSE` and `META-INF\LICENSE` are the same entry.
    pub fn matching_rule(&self, path: &str) -> Option<&str> {
        let normalized = normalize(path);
        self.rules
            .iter()
            .find(|r| r.regex.is_match(&normalized))
            .map(|r| r.pattern.as_str())
    }

    /// Partition a manifest into kept and dropped entries.
    pub fn filter<I, S>(&self, manifest: I) -> FilteredManifest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut result = FilteredManifest::default();
        for entry in manifest {
            let entry = entry.into();
            match self.matching_rule(&entry) {
                Some(rule) => {
                    tracing::debug!(entry = %entry, rule, "dropping excluded entry");
                    result.dropped.push(entry);
                }
                None => result.kept.push(entry),
            }
        }
        result
    }
}

impl Default for PackagingRuleSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Serialize for PackagingRuleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.patterns())
    }
}

fn normalize(path: &str) -> String {
    path.trim().replace('\\', "/").trim_start_matches('/').to_string()
}
