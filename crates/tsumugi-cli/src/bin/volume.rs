//! `volume getvolume` / `volume setvolume <level>` on the host's mixer.

use std::process::ExitCode;

use tsumugi_core::Invocation;

fn main() -> ExitCode {
    let (_config, _log_guard) = tsumugi_cli::startup();
    let invocation = Invocation::from_argv(std::env::args_os());
    let backend = tsumugi_volume::default_backend();
    tsumugi_cli::finish(tsumugi_cli::volume::run(&*backend, &invocation))
}
