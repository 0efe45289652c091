//! Tracing setup. The terminal belongs to the UI, so logs go to a file only.

use std::path::Path;

use anyhow::Result;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "oraculum.log";

/// Filter used when `RUST_LOG` is not set: `level` for our crates, HTTP
/// plumbing held at `warn`.
pub fn default_filter(level: Level) -> Result<EnvFilter> {
    Ok(EnvFilter::new(level.to_string())
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("h2=warn".parse()?))
}

/// Install a global subscriber writing to `<log_dir>/oraculum.log`.
///
/// Keep the returned guard alive until exit, dropping it flushes the writer.
pub fn init(log_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(level)?,
    };

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!(log_dir = %log_dir.display(), verbose, "logging initialized");
    Ok(guard)
}
