//! `anilist get_id <title>`, `anilist get_progress <id>`,
//! `anilist update_progress <id> <episodes>`.

use std::process::ExitCode;

use tsumugi_api::AniListClient;
use tsumugi_core::{credential, Invocation};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let (config, _log_guard) = tsumugi_cli::startup();
    let invocation = Invocation::from_argv(std::env::args_os());

    let token = credential::load(credential::configured_path(&config.anilist).as_deref());
    let client = match AniListClient::new(
        &config.anilist.endpoint,
        &config.anilist.username,
        token,
        config.timeout(),
    ) {
        Ok(client) => client,
        Err(e) => return tsumugi_cli::finish(Err(e.into())),
    };

    tsumugi_cli::finish(tsumugi_cli::anilist::run(&client, &invocation).await)
}
