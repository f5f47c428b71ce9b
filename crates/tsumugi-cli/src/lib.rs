//! Command handlers shared by the helper binaries, plus the process
//! boundary that turns a handler result into stdout, stderr and an exit
//! code.

pub mod anilist;
pub mod guess;
pub mod volume;

use std::error::Error as _;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing_appender::non_blocking::WorkerGuard;
use tsumugi_core::{logging, AppConfig, CoreError, FailureKind, Tunnel};

/// What a handler produced: a payload, or nothing for unknown commands.
pub type Outcome = Result<Option<Tunnel>, CoreError>;

/// Load config and install logging. Config problems fall back to defaults.
pub fn startup() -> (AppConfig, Option<WorkerGuard>) {
    match AppConfig::load() {
        Ok(config) => {
            let guard = logging::init(&config.logging);
            (config, guard)
        }
        Err(e) => {
            let config = AppConfig::default();
            let guard = logging::init(&config.logging);
            tracing::warn!(error = %e, path = %AppConfig::config_path().display(), "ignoring config file");
            (config, guard)
        }
    }
}

/// Write the outcome to the real stdio and produce the exit code.
pub fn finish(outcome: Outcome) -> ExitCode {
    let code = report(outcome, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}

/// Emit at most one JSON line on `out`; errors go to `err` only.
pub fn report(outcome: Outcome, out: &mut impl Write, err: &mut impl Write) -> u8 {
    let error = match outcome {
        Ok(Some(tunnel)) if !tunnel.is_empty() => match tunnel.emit(out) {
            Ok(()) => return 0,
            Err(e) => CoreError::from(e),
        },
        Ok(_) => return 0,
        Err(e) => e,
    };

    let kind = error.kind();
    if kind == FailureKind::Upstream {
        tracing::debug!(error = %error, "command failed");
    }

    let message = error.to_string();
    let _ = writeln!(err, "{message}");
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            let _ = writeln!(err, "  caused by: {cause_text}");
        }
        source = cause.source();
    }

    kind.exit_code()
}
