use anchorgate_core::api as core_api;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "ANCHORGATE_LOG";

/// Installs the global subscriber.
///
/// Stderr carries block messages back to the agent, so it only receives logs
/// when no log file is configured and a filter was enabled explicitly. The
/// returned guard must live until exit or buffered lines are lost.
pub fn init(cfg: &core_api::LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let Some(path) = cfg.file_path() else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return None;
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "anchorgate.log".to_string());

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
    {
        Ok(appender) => appender,
        // No usable log file: stay silent rather than write to stderr.
        Err(_) => return None,
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Some(guard)
}
