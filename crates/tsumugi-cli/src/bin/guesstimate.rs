//! `guesstimate guessIt <filename>`

use std::process::ExitCode;

use tsumugi_core::Invocation;

fn main() -> ExitCode {
    let (_config, _log_guard) = tsumugi_cli::startup();
    let invocation = Invocation::from_argv(std::env::args_os());
    tsumugi_cli::finish(tsumugi_cli::guess::run(&invocation))
}
