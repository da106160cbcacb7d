//! Log subscriber setup for the binary.
//!
//! Logs go to stderr so stdout stays clean for rendered output. The filter
//! comes from `BUILDCFG_LOG` when set (any `EnvFilter` directive), else
//! `error`, or `debug` for this crate with `--verbose`. Configuration
//! warnings are part of the rendered report, so they stay quiet by default.

use tracing_subscriber::EnvFilter;

use crate::constants;

/// Build the filter for the given verbosity, honouring `BUILDCFG_LOG`.
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| default_filter(verbose))
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(format!("warn,{}=debug", constants::APP_NAME))
    } else {
        EnvFilter::new("error")
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
