//! `<binary> <command> [args...]` resolution against a static registry.
//!
//! Each helper binary declares its commands as a table of
//! `(CommandSpec, C)` pairs, where `C` is its own command enum. No flags
//! are recognized: everything after the command name is passed through
//! verbatim, so `setvolume -5` receives `-5`.

use std::ffi::OsString;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use clap::Parser;

use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: usize,
    pub usage: &'static str,
}

/// A registry row: the declared shape and the handler it selects.
pub type Registry<C> = [(CommandSpec, C)];

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "tsumugi",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Invocation {
    #[arg(skip)]
    pub program: String,

    #[arg(allow_hyphen_values = true)]
    pub command: Option<String>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

impl Invocation {
    /// Split a full argv (program name first).
    pub fn from_argv<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let program = argv
            .first()
            .and_then(|p| Path::new(p).file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tsumugi".to_string());

        let raw: Vec<String> = argv
            .iter()
            .skip(1)
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        // clap names the command, but it swallows a literal `--`, so the
        // tail after the command is copied from argv as-is.
        let command_at = match Self::try_parse_from(&argv) {
            Ok(parsed) => parsed
                .command
                .and_then(|command| raw.iter().position(|a| *a == command))
                .unwrap_or(0),
            Err(err) => {
                tracing::debug!(error = %err, "argv not accepted by clap, splitting verbatim");
                0
            }
        };

        Self {
            program,
            command: raw.get(command_at).cloned(),
            args: raw.get(command_at + 1..).map(<[String]>::to_vec).unwrap_or_default(),
        }
    }

    /// Look the command up in `registry` and check its argument count.
    ///
    /// `Ok(None)` means the name is not registered, which callers treat as
    /// a silent no-op.
    pub fn resolve<'r, C: Copy>(
        &self,
        registry: &'r Registry<C>,
    ) -> Result<Option<(C, &'r CommandSpec)>, DispatchError> {
        let Some(name) = self.command.as_deref() else {
            return Err(DispatchError::MissingCommand {
                program: self.program.clone(),
                commands: usage_lines(registry),
            });
        };

        let Some((spec, command)) = registry.iter().find(|(spec, _)| spec.name == name) else {
            tracing::debug!(command = name, "ignoring unknown command");
            return Ok(None);
        };

        if self.args.len() != spec.arity {
            return Err(DispatchError::Arity {
                command: spec.name,
                expected: spec.arity,
                got: self.args.len(),
                usage: spec.usage,
            });
        }

        tracing::debug!(command = name, args = ?self.args, "dispatching");
        Ok(Some((*command, spec)))
    }
}

/// Parse a positional argument, reporting failures as usage errors.
pub fn parse_arg<T>(spec: &CommandSpec, value: &str) -> Result<T, DispatchError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|err: T::Err| DispatchError::InvalidArgument {
            command: spec.name,
            value: value.to_string(),
            reason: err.to_string(),
        })
}

fn usage_lines<C>(registry: &Registry<C>) -> String {
    registry
        .iter()
        .map(|(spec, _)| format!("  {}", spec.usage))
        .collect::<Vec<_>>()
        .join("\n")
}
