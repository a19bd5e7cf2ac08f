use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "partbench=info";

/// Keeps the file writer alive; dropping it flushes pending lines.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs a global subscriber writing to stderr, or to a daily rolling file
/// under `log_dir` when given. `RUST_LOG` overrides `filter`.
///
/// Returns `None` if a global subscriber is already installed.
pub fn init(filter: Option<&str>, log_dir: Option<&Path>) -> Option<LoggingGuard> {
    let filter = env_filter(filter.unwrap_or(DEFAULT_FILTER));

    let (guard, log_dir) = match log_dir {
        Some(dir) => {
            if let Err(error) = std::fs::create_dir_all(dir) {
                eprintln!("cannot create log dir {}: {error}", dir.display());
                return None;
            }
            let appender = tracing_appender::rolling::daily(dir, "partbench.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
                .is_ok();
            if !installed {
                return None;
            }
            (Some(guard), Some(dir.to_path_buf()))
        }
        None => {
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .try_init()
                .is_ok();
            if !installed {
                return None;
            }
            (None, None)
        }
    };

    tracing::info!(log_dir = ?log_dir, "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
