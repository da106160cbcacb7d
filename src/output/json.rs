//! JSON output renderer.
//!
//! Outputs `{"config": {...}, "diagnostics": [...]}`. Passwords are
//! redacted by [`SigningIdentity`](crate::models::SigningIdentity)'s
//! serializer.

use crate::assemble::AssembledConfig;
use crate::models::Resolved;
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, assembled: &Resolved<AssembledConfig>) -> String {
        let output = serde_json::json!({
            "config": assembled.value,
            "diagnostics": assembled.diagnostics,
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
