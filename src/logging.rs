use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;

/// Wire up tracing for the process. Console events go to stderr so report
/// printing stays clean on stdout; when `config.dir` is set, a JSON copy of
/// every event is appended to a daily-rotated `importer.log` in that
/// directory.
///
/// RUST_LOG overrides the configured filter. The returned guard owns the
/// file writer's flush thread; the caller keeps it alive for the life of
/// the process, and None means file logging is disabled.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let registry = tracing_subscriber::registry().with(filter).with(console_layer);

    match config.dir.as_deref() {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let appender = tracing_appender::rolling::daily(dir, "importer.log");
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().json().with_writer(file_writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}
