use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub struct LogGuard {
    _guard: WorkerGuard,
}

pub fn file_logging_enabled() -> bool {
    std::env::var("ENABLE_FILE_LOGS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

const DEFAULT_LOG_DIR: &str = "./logs";

fn log_dir(configured: Option<String>) -> String {
    configured
        .filter(|dir| !dir.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
}

/// Console output goes to stderr; stdout belongs to the session protocol.
pub fn init_tracing(log_level: &str) -> Option<LogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    if file_logging_enabled() {
        let log_dir = log_dir(std::env::var("GARDEN_LOG_DIR").ok());
        if let Err(err) = std::fs::create_dir_all(&log_dir) {
            eprintln!("failed to create log directory {log_dir}: {err}");
        } else {
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, &log_dir, "number-garden.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();

            return Some(LogGuard { _guard: guard });
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_defaults() {
        assert_eq!(log_dir(None), DEFAULT_LOG_DIR);
        assert_eq!(log_dir(Some("  ".to_string())), DEFAULT_LOG_DIR);
        assert_eq!(log_dir(Some("/var/log/garden".to_string())), "/var/log/garden");
    }
}
