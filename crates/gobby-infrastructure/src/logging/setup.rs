//! Single `init_tracing` entry point, called once at daemon startup.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::facade::forward;

/// Guard returned by [`init_tracing`]; dropping it flushes the non-blocking
/// file writer. Keep it alive for the process lifetime.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initializes the global `tracing` subscriber and wires the domain log
/// facade (`gobby_domain::{trace,debug,info,warn,error}!`) to it.
///
/// Log level follows the standard `RUST_LOG` convention, defaulting to
/// `info` when unset or invalid. When `log_dir` is given, logs are also
/// written to a daily-rotating file under it, in addition to stderr.
pub fn init_tracing(log_dir: Option<&Path>, json: bool) -> LoggingGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .json()
        .flatten_event(true)
        .with_target(true);
    let stderr_layer_pretty = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "gobby.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .json(),
                ),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if json {
        registry.with(stderr_layer).init();
    } else {
        registry.with(Some(stderr_layer_pretty)).init();
    }

    gobby_domain::infra::logging::set_log_fn(forward);

    LoggingGuard {
        _file_guard: file_guard,
    }
}
