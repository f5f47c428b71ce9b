use tsumugi_core::dispatch::Registry;
use tsumugi_core::{CommandSpec, CoreError, Invocation, Tunnel};

use crate::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessCommand {
    GuessIt,
}

pub const COMMANDS: &Registry<GuessCommand> = &[(
    CommandSpec {
        name: "guessIt",
        arity: 1,
        usage: "guessIt <filename>",
    },
    GuessCommand::GuessIt,
)];

pub fn run(invocation: &Invocation) -> Outcome {
    let Some((command, _)) = invocation.resolve(COMMANDS)? else {
        return Ok(None);
    };
    match command {
        GuessCommand::GuessIt => guess_it(&invocation.args[0]).map(Some),
    }
}

/// `{"myGuess": {"title": ...}}`
pub fn guess_it(filename: &str) -> Result<Tunnel, CoreError> {
    let guess = tsumugi_parse::guess(filename)?;
    Ok(Tunnel::with("myGuess", guess)?)
}
