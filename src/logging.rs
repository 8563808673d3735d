use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const RUST_LOG_ENV: &str = "RUST_LOG";
const DEFAULT_DIRECTIVES: &str = "split_sky=info,warn";

pub enum LogSink<'a> {
    /// No subscriber; the dashboard owns the terminal.
    Silent,
    Stderr,
    File(&'a Path),
}

/// Installs the global subscriber. Keep the returned guard alive for as long
/// as logs should be flushed.
pub fn init(sink: LogSink<'_>) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = match sink {
        LogSink::Silent => return Ok(None),
        LogSink::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogSink::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("log path {} has no file name", path.display()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
    };

    let filter = EnvFilter::try_from_env(RUST_LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(Some(guard))
}
