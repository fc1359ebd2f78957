use anyhow::{Context, Result};
use campus_core::config::CampusConfig;
use campus_infrastructure::CampusPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "campus.log";

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG`, else from `log_level` in the config.
/// With `log_to_file`, events are also written to a daily rolling file in
/// the logs directory; the returned guard flushes it and must be held until
/// exit.
pub fn init(config: &CampusConfig, paths: &CampusPaths) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("Invalid log_level '{}'", config.log_level))?;
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if !config.log_to_file {
        tracing_subscriber::registry().with(filter).with(stderr).init();
        return Ok(None);
    }

    let logs_dir = paths.logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    tracing::debug!("[Logging] Writing logs to {}", logs_dir.display());
    Ok(Some(guard))
}
