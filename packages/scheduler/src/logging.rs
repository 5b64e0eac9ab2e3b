use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. A second call leaves the first one in place.
pub fn init_tracing(config: &Config) -> Option<FileLogGuard> {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);

    if config.file_logs {
        if let Err(err) = std::fs::create_dir_all(&config.log_dir) {
            eprintln!(
                "failed to create log directory {}: {err}",
                config.log_dir.display()
            );
        } else {
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "scheduler.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true);

            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .try_init()
                .is_ok();

            return installed.then_some(FileLogGuard { _guard: guard });
        }
    }

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init();

    None
}
