// settings-codemod - rewrites the admin Settings page to use the shared API client
// Each rule set is a one-shot, regex-driven rewrite of a single file

pub mod codemods;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing::debug;

pub use error::{CodemodError, CodemodResult};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Initialize logging
///
/// Logs go to stderr so stdout carries only the success message or diff.
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `warn`.
pub fn init_with_logger(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("settings_codemod={}", default_level)));

    fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    debug!("Initializing settings-codemod v{}", version());
    Ok(())
}
