//! Windows master volume through Core Audio. Same commands as `volume`.

use std::process::ExitCode;

use tsumugi_core::Invocation;

fn main() -> ExitCode {
    let (_config, _log_guard) = tsumugi_cli::startup();
    let invocation = Invocation::from_argv(std::env::args_os());
    let backend = tsumugi_volume::endpoint_backend();
    tsumugi_cli::finish(tsumugi_cli::volume::run(&*backend, &invocation))
}
