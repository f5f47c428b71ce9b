use tsumugi_core::dispatch::{parse_arg, Registry};
use tsumugi_core::{CommandSpec, CoreError, Invocation, Tunnel};
use tsumugi_volume::{VolumeBackend, VolumeLevel};

use crate::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeCommand {
    GetVolume,
    SetVolume,
}

pub const COMMANDS: &Registry<VolumeCommand> = &[
    (
        CommandSpec {
            name: "getvolume",
            arity: 0,
            usage: "getvolume",
        },
        VolumeCommand::GetVolume,
    ),
    (
        CommandSpec {
            name: "setvolume",
            arity: 1,
            usage: "setvolume <level 0-100>",
        },
        VolumeCommand::SetVolume,
    ),
];

/// Shared by the `volume` and `autoadjuster` binaries; they differ only
/// in which backend they pass.
pub fn run<B: VolumeBackend + ?Sized>(backend: &B, invocation: &Invocation) -> Outcome {
    let Some((command, spec)) = invocation.resolve(COMMANDS)? else {
        return Ok(None);
    };
    tracing::debug!(backend = backend.name(), command = spec.name, "volume command");

    match command {
        VolumeCommand::GetVolume => get_volume(backend).map(Some),
        VolumeCommand::SetVolume => {
            let level: VolumeLevel = parse_arg(spec, &invocation.args[0])?;
            set_volume(backend, level).map(Some)
        }
    }
}

/// `{"Volume": <0-100>}`
pub fn get_volume<B: VolumeBackend + ?Sized>(backend: &B) -> Result<Tunnel, CoreError> {
    let level = backend.get_volume()?;
    Ok(Tunnel::with("Volume", level)?)
}

/// Emits nothing on success.
pub fn set_volume<B: VolumeBackend + ?Sized>(
    backend: &B,
    level: VolumeLevel,
) -> Result<Tunnel, CoreError> {
    backend.set_volume(level)?;
    Ok(Tunnel::new())
}
