//! Clap argument types.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Resolve build configuration: signing properties, variants and packaging rules.
#[derive(Parser, Debug)]
#[command(name = "buildcfg", version = buildcfg::constants::VERSION)]
pub struct Cli {
    /// Enable debug logging (BUILDCFG_LOG takes precedence).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Project root holding buildcfg.toml and the signing properties file.
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Print the assembled configuration for a variant.
    Resolve(ResolveArgs),

    /// Fail unless the variant can actually be signed.
    CheckSigning(CheckSigningArgs),

    /// Filter a file manifest through the packaging exclusion rules.
    Packaging(PackagingArgs),

    /// List known variants and their application ids.
    Variants,

    /// List keys in the signing properties file (values hidden).
    Properties,

    /// Print version and build information.
    Version,
}

/// Output format for `resolve`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Arguments for the `resolve` subcommand.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Variant to assemble (debug or release).
    #[arg(long, default_value = "release")]
    pub variant: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,
}

/// Arguments for the `check-signing` subcommand.
#[derive(Parser, Debug)]
pub struct CheckSigningArgs {
    /// Variant whose signing identity is checked.
    #[arg(long, default_value = "release")]
    pub variant: String,
}

/// Arguments for the `packaging` subcommand.
#[derive(Parser, Debug)]
pub struct PackagingArgs {
    /// Newline-separated manifest file (default: read stdin).
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Print dropped entries instead of kept ones.
    #[arg(long, default_value_t = false)]
    pub dropped: bool,
}
