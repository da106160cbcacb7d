//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use std::io::BufRead;

/// Read a newline-separated manifest, skipping blank lines.
pub fn read_manifest(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if !entry.is_empty() {
            entries.push(entry.to_string());
        }
    }
    Ok(entries)
}
