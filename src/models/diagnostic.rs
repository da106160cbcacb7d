//! Non-fatal diagnostics and the value-plus-warnings wrapper.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A warning raised while assembling configuration.
///
/// None of these abort the build. Each one is logged once when it is
/// recorded and kept on the [`Resolved`] value for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A recognised signing property was absent or empty.
    MissingField { field: String },
    /// A path-valued property does not point to an existing file.
    InvalidPath { field: String, path: PathBuf },
    /// A properties line had no `=`/`:` separator or an empty key.
    ///
    /// Line content is not kept: it may hold a password.
    MalformedLine { file: PathBuf, line: usize },
    /// Core library desugaring is enabled but nothing provides the library.
    MissingDesugaring,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingField { field } => {
                write!(f, "{field} property is missing")
            }
            Diagnostic::InvalidPath { field, path } => {
                write!(f, "{field} file not found at {}", path.display())
            }
            Diagnostic::MalformedLine { file, line } => {
                write!(f, "{}:{line}: malformed property line ignored", file.display())
            }
            Diagnostic::MissingDesugaring => write!(
                f,
                "core library desugaring is enabled but no coreLibraryDesugaring dependency is declared"
            ),
        }
    }
}

/// A value together with the warnings accumulated while producing it.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Resolved<T> {
    /// Wrap a value with no diagnostics.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Move `other`'s diagnostics onto this value (already logged) and
    /// return its payload.
    pub fn absorb<U>(&mut self, other: Resolved<U>) -> U {
        self.diagnostics.extend(other.diagnostics);
        other.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
