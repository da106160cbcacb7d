//! Output renderers: terminal and JSON.

pub mod json;
pub mod terminal;

use crate::assemble::AssembledConfig;
use crate::models::Resolved;

/// Trait for rendering an assembled configuration to an output format.
pub trait OutputRenderer {
    /// Render the configuration and its diagnostics to a string.
    fn render(&self, assembled: &Resolved<AssembledConfig>) -> String;
}
