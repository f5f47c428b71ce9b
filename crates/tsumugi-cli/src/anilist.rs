use tsumugi_api::ProgressTracker;
use tsumugi_core::dispatch::{parse_arg, Registry};
use tsumugi_core::{CommandSpec, CoreError, Invocation, Tunnel};

use crate::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AniListCommand {
    GetId,
    GetProgress,
    UpdateProgress,
}

pub const COMMANDS: &Registry<AniListCommand> = &[
    (
        CommandSpec {
            name: "get_id",
            arity: 1,
            usage: "get_id <title>",
        },
        AniListCommand::GetId,
    ),
    (
        CommandSpec {
            name: "get_progress",
            arity: 1,
            usage: "get_progress <media id>",
        },
        AniListCommand::GetProgress,
    ),
    (
        CommandSpec {
            name: "update_progress",
            arity: 2,
            usage: "update_progress <media id> <episodes watched>",
        },
        AniListCommand::UpdateProgress,
    ),
];

pub async fn run<T>(tracker: &T, invocation: &Invocation) -> Outcome
where
    T: ProgressTracker,
    CoreError: From<T::Error>,
{
    let Some((command, spec)) = invocation.resolve(COMMANDS)? else {
        return Ok(None);
    };
    let args = &invocation.args;

    let tunnel = match command {
        AniListCommand::GetId => get_id(tracker, &args[0]).await?,
        AniListCommand::GetProgress => {
            let media_id = parse_arg(spec, &args[0])?;
            get_progress(tracker, media_id).await?
        }
        AniListCommand::UpdateProgress => {
            let media_id = parse_arg(spec, &args[0])?;
            let progress = parse_arg(spec, &args[1])?;
            update_progress(tracker, media_id, progress).await?
        }
    };
    Ok(Some(tunnel))
}

/// `{"MediaId": <id>}`, or `{"MediaId": null}` when nothing matches.
pub async fn get_id<T>(tracker: &T, title: &str) -> Result<Tunnel, CoreError>
where
    T: ProgressTracker,
    CoreError: From<T::Error>,
{
    let media_id = tracker.get_id(title).await?;
    Ok(Tunnel::with("MediaId", media_id)?)
}

/// `{"Progress": <n>}`
pub async fn get_progress<T>(tracker: &T, media_id: u64) -> Result<Tunnel, CoreError>
where
    T: ProgressTracker,
    CoreError: From<T::Error>,
{
    let progress = tracker.get_progress(media_id).await?;
    Ok(Tunnel::with("Progress", progress)?)
}

/// `{"Updated": <n>}` with the count AniList stored.
pub async fn update_progress<T>(
    tracker: &T,
    media_id: u64,
    progress: u32,
) -> Result<Tunnel, CoreError>
where
    T: ProgressTracker,
    CoreError: From<T::Error>,
{
    let saved = tracker.update_progress(media_id, progress).await?;
    tracing::debug!(media_id, progress = saved, "progress updated");
    Ok(Tunnel::with("Updated", saved)?)
}
