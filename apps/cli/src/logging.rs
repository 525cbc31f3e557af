//! Subscriber setup.
//!
//! Events go to stderr so the report on stdout stays machine readable.

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};

/// Environment variable holding the log filter, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "SIFT_LOG";

/// Resolves the filter directives: `SIFT_LOG`, then `RUST_LOG`, then the
/// configured level.
pub fn directives(config: &Config) -> String {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| config.log_level.clone())
}

/// Installs the global subscriber.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let directives = directives(config);
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter `{directives}`"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.log_format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!(e))
}
