//! Terminal renderer: a labelled summary of the assembled configuration.

use colored::Colorize;

use crate::assemble::AssembledConfig;
use crate::models::{Resolved, SigningIdentity};
use crate::output::OutputRenderer;

/// Terminal output renderer with colored, aligned fields.
pub struct TerminalRenderer;

fn field(output: &mut String, label: &str, value: impl std::fmt::Display) {
    output.push_str(&format!("  {:<18} {}\n", format!("{label}:").cyan(), value));
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn signing_line(signing: Option<&SigningIdentity>) -> String {
    match signing {
        None => "none".dimmed().to_string(),
        Some(id) if id.is_complete() => format!("{} (alias {})", id.name, id.alias)
            .green()
            .to_string(),
        Some(id) => format!(
            "{} (incomplete: missing {})",
            id.name,
            id.missing_fields().join(", ")
        )
        .yellow()
        .to_string(),
    }
}

impl OutputRenderer for TerminalRenderer {
    fn render(&self, assembled: &Resolved<AssembledConfig>) -> String {
        let config = &assembled.value;
        let app = &config.application;
        let variant = &config.variant;
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            variant.name.to_string().bold(),
            variant.application_id.bold()
        ));
        field(&mut output, "namespace", &app.namespace);
        field(
            &mut output,
            "version",
            format!("{} ({})", app.version_name, app.version_code),
        );
        field(
            &mut output,
            "sdk",
            format!(
                "min {} / target {} / compile {}",
                app.min_sdk, app.target_sdk, app.compile_sdk
            ),
        );
        if let Some(ref ndk) = app.ndk_version {
            field(&mut output, "ndk", ndk);
        }
        field(
            &mut output,
            "java",
            format!(
                "{} (jvmTarget {})",
                config.compile_options.target_compatibility.gradle_name(),
                config.compile_options.jvm_target
            ),
        );
        field(&mut output, "desugaring", yes_no(config.compile_options.core_library_desugaring));
        field(&mut output, "multidex", yes_no(app.multidex_enabled));
        field(&mut output, "minify", yes_no(variant.minify_enabled));
        field(&mut output, "shrink resources", yes_no(variant.shrink_resources));
        field(&mut output, "debuggable", yes_no(variant.debuggable));
        field(&mut output, "signing", signing_line(variant.signing.as_ref()));
        field(
            &mut output,
            "properties",
            config.properties_file.display(),
        );

        if !config.dependencies.is_empty() {
            output.push_str(&format!("  {}\n", "dependencies:".cyan()));
            for dep in &config.dependencies {
                output.push_str(&format!("    {dep}\n"));
            }
        }
        field(
            &mut output,
            "packaging",
            format!("{} exclude rule(s)", config.packaging_excludes.len()),
        );

        if assembled.has_warnings() {
            output.push('\n');
            for diagnostic in &assembled.diagnostics {
                output.push_str(&format!(" {} {}\n", "⚠".yellow().bold(), diagnostic));
            }
        }

        output.push_str(&format!("{}\n", "───────────────────────────────────".dimmed()));
        let count = assembled.diagnostics.len();
        if count == 0 {
            output.push_str(&format!(" {}\n", "✔ configuration resolved cleanly".green()));
        } else {
            output.push_str(&format!(
                " {} {}\n",
                count.to_string().yellow().bold(),
                if count == 1 { "warning" } else { "warnings" },
            ));
        }

        output
    }
}
