//! Diagnostics go to stderr; stdout carries only the tunnel line.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{AppConfig, LoggingConfig};

/// Environment variable that overrides the configured filter.
pub const ENV_VAR: &str = "TSUMUGI_LOG";

/// Install the global subscriber.
///
/// The returned guard flushes the log file on drop and must be held until
/// the process exits.
#[must_use = "dropping the guard stops the log file writer"]
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::new(directives(config, std::env::var(ENV_VAR).ok()));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let mut file_error = None;
    let (file_layer, guard) = if config.file {
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("tsumugi")
            .filename_suffix("log")
            .build(AppConfig::log_dir())
        {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (
                    Some(fmt::layer().with_writer(writer).with_ansi(false)),
                    Some(guard),
                )
            }
            Err(e) => {
                file_error = Some(e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "log file disabled");
    }
    guard
}

/// `TSUMUGI_LOG` when set and non-blank, else the configured level.
fn directives(config: &LoggingConfig, env: Option<String>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.level.clone())
}
