//! Tracing subscriber setup: console on stderr, optional JSON file sink.

use crate::cli::FILE_GUARD;
use eyre::WrapErr;
use infinistream_config::Logging;
use std::path::Path;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// `RUST_LOG` wins, then `--log-level`, then `[logging] level`, then "info".
pub fn init_tracing(json: bool, cli_level: Option<&str>, logging: &Logging) -> eyre::Result<()> {
    let level = cli_level
        .or(logging.level.as_deref())
        .unwrap_or("info");
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level).wrap_err_with(|| format!("bad log level {level:?}"))?,
    };

    // stdout carries rendered frames, so logs go to stderr.
    let console = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let file = match logging.file.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file has no file name: {}", path.display()))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(filter)
        .try_init()
        .map_err(|e| eyre::eyre!("init logging: {e}"))
}
