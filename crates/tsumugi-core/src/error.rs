use std::process::ExitCode;

use thiserror::Error;
use tsumugi_api::AniListError;
use tsumugi_parse::GuessError;
use tsumugi_volume::VolumeError;

/// How a failed invocation is reported to the calling script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network, HTTP, COM, mixer tool or malformed upstream output.
    Upstream,
    /// Missing command, wrong argument count, or an unparseable argument.
    Usage,
    Unsupported,
    /// No title recognized, or media absent from the user's list.
    NotFound,
}

impl FailureKind {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Upstream => 1,
            Self::Usage => 2,
            Self::Unsupported => 3,
            Self::NotFound => 4,
        }
    }
}

impl From<FailureKind> for ExitCode {
    fn from(kind: FailureKind) -> Self {
        ExitCode::from(kind.exit_code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("usage: {program} <command> [args...]\ncommands:\n{commands}")]
    MissingCommand { program: String, commands: String },

    #[error("{command} takes {expected} argument(s), got {got}\nusage: {usage}")]
    Arity {
        command: &'static str,
        expected: usize,
        got: usize,
        usage: &'static str,
    },

    #[error("invalid argument {value:?} for {command}: {reason}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error(transparent)]
    AniList(#[from] AniListError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Dispatch(_) => FailureKind::Usage,
            Self::Guess(GuessError::NoTitle(_)) => FailureKind::NotFound,
            Self::Volume(VolumeError::Unsupported(_)) => FailureKind::Unsupported,
            Self::Volume(_) => FailureKind::Upstream,
            Self::AniList(AniListError::NotOnList(_)) => FailureKind::NotFound,
            Self::AniList(_) => FailureKind::Upstream,
            Self::Config(_) | Self::Json(_) | Self::Io(_) => FailureKind::Upstream,
        }
    }
}
