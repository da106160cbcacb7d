//! buildcfg: declarative build-configuration loader CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use buildcfg::assemble;
use buildcfg::config::BuildConfig;
use buildcfg::constants;
use buildcfg::env::Env;
use buildcfg::logging;
use buildcfg::models::SigningIdentity;
use buildcfg::output::json::JsonRenderer;
use buildcfg::output::terminal::TerminalRenderer;
use buildcfg::output::OutputRenderer;
use buildcfg::properties::PropertySource;
use buildcfg::variant::VariantConfigurator;

use std::io::Write;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cli::args::{CheckSigningArgs, Cli, Command, OutputFormat, PackagingArgs, ResolveArgs};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let project_dir = cli.project_dir.as_path();
    match cli.command {
        Command::Resolve(args) => run_resolve(project_dir, args),
        Command::CheckSigning(args) => run_check_signing(project_dir, args),
        Command::Packaging(args) => run_packaging(project_dir, args),
        Command::Variants => run_variants(project_dir),
        Command::Properties => run_properties(project_dir),
        Command::Version => run_version(),
    }
}

fn load_config(project_dir: &Path) -> Result<BuildConfig> {
    BuildConfig::load(project_dir, &Env::real()).context("failed to load configuration")
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Assemble and render one variant.
fn run_resolve(project_dir: &Path, args: ResolveArgs) -> Result<()> {
    let config = load_config(project_dir)?;
    let assembled = assemble::assemble(&config, project_dir, &args.variant)
        .with_context(|| format!("failed to assemble variant '{}'", args.variant))?;

    let rendered = match args.format {
        OutputFormat::Terminal => TerminalRenderer.render(&assembled),
        OutputFormat::Json => JsonRenderer.render(&assembled),
    };
    print!("{rendered}");
    if args.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// The deferred half of signing: fail now if the identity is unusable.
fn run_check_signing(project_dir: &Path, args: CheckSigningArgs) -> Result<()> {
    let config = load_config(project_dir)?;
    let assembled = assemble::assemble(&config, project_dir, &args.variant)
        .with_context(|| format!("failed to assemble variant '{}'", args.variant))?;

    let variant = &assembled.value.variant;
    let (identity, store) = variant.require_signing()?;

    println!(
        "  {} {} can be signed with '{}' (alias {}, key store {})",
        "✔".green().bold(),
        variant.name.to_string().bold(),
        identity.name,
        identity.alias,
        store.display(),
    );
    Ok(())
}

/// Filter a manifest through the packaging rules.
fn run_packaging(project_dir: &Path, args: PackagingArgs) -> Result<()> {
    let config = load_config(project_dir)?;
    let rules = config.packaging_rules()?;

    let manifest = match &args.manifest {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open manifest {}", path.display()))?;
            cli::read_manifest(std::io::BufReader::new(file))
        }
        None => cli::read_manifest(std::io::stdin().lock()),
    }
    .context("failed to read manifest")?;

    let filtered = rules.filter(manifest);
    let shown = if args.dropped {
        &filtered.dropped
    } else {
        &filtered.kept
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for entry in shown {
        writeln!(out, "{entry}")?;
    }
    eprintln!(
        "{} kept, {} dropped by {} rule(s)",
        filtered.kept.len(),
        filtered.dropped.len(),
        rules.len()
    );
    Ok(())
}

/// List variants with their effective application ids.
fn run_variants(project_dir: &Path) -> Result<()> {
    let config = load_config(project_dir)?;
    let identity = config.application_identity()?;
    let placeholder = SigningIdentity {
        name: config.signing.name.clone(),
        ..Default::default()
    };
    let variants =
        VariantConfigurator::new(&identity, &config.build_types).configure_all(&placeholder)?;

    for variant in variants {
        let signed = if variant.signing.is_some() {
            format!("signed with '{}'", config.signing.name)
        } else {
            "unsigned".to_string()
        };
        println!(
            "  {:<8} {}  {}",
            variant.name.to_string().bold(),
            variant.application_id,
            signed.dimmed()
        );
    }
    Ok(())
}

/// List property keys; password values are never shown.
fn run_properties(project_dir: &Path) -> Result<()> {
    let config = load_config(project_dir)?;
    let source = PropertySource::new(config.properties_path(project_dir));
    let loaded = source.load()?;

    if loaded.value.is_empty() {
        println!("No properties found at {}.", source.path().display());
    }
    for (key, value) in loaded.value.redacted() {
        println!("  {}  {}", key.cyan(), value);
    }
    for diagnostic in &loaded.diagnostics {
        eprintln!(" {} {}", "⚠".yellow().bold(), diagnostic);
    }
    Ok(())
}
