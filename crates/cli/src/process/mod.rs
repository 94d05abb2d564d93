pub mod utils;

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub const LOG_FILE_NAME: &str = "vault-copy.log";

fn env_filter(log_level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy()
}

/// Initialize logging and the panic handler.
///
/// Logs go to stderr, leaving stdout to the summary and prompt the
///  operator answers. With a log directory, a daily rolling file
///  gets the same events. The returned guards flush both writers
///  when dropped, so hold them until the traversal is done.
pub fn init_logging(log_level: tracing::Level, log_dir: Option<&Path>) -> Vec<WorkerGuard> {
    let mut guards = Vec::new();

    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    guards.push(stderr_guard);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stderr_writer)
        .with_filter(env_filter(log_level));

    let mut dir_error = None;
    let file_layer = match log_dir.map(|dir| std::fs::create_dir_all(dir).map(|_| dir)) {
        Some(Ok(dir)) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
            guards.push(file_guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_filter(env_filter(log_level)),
            )
        }
        Some(Err(e)) => {
            dir_error = Some(e);
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let (Some(dir), Some(e)) = (log_dir, dir_error) {
        tracing::warn!(dir = %dir.display(), error = %e, "log directory unusable, logging to stderr only");
    }

    utils::register_panic_logger();
    utils::report_build_info();

    guards
}
