//! The AniList access token the player setup drops next to mpv's config.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::config::AniListConfig;

/// Used when no token file is present or the file is blank.
pub const PLACEHOLDER_TOKEN: &str = "your_default_id_here";

/// `<local config dir>/mpv/keys/key.txt`, i.e. `%LOCALAPPDATA%\mpv\keys\key.txt`
/// on Windows and `~/.config/mpv/keys/key.txt` on Linux.
pub fn default_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| {
        dirs.config_local_dir()
            .join("mpv")
            .join("keys")
            .join("key.txt")
    })
}

/// The configured override, else [`default_path`].
pub fn configured_path(config: &AniListConfig) -> Option<PathBuf> {
    config.token_path.clone().or_else(default_path)
}

/// Read and trim the token at `path`, falling back to [`PLACEHOLDER_TOKEN`].
///
/// Never fails: an unreadable file is logged and treated as missing, so
/// lookups that need no token still work.
pub fn load(path: Option<&Path>) -> String {
    let Some(path) = path else {
        tracing::warn!("no home directory, using placeholder AniList token");
        return PLACEHOLDER_TOKEN.to_string();
    };

    match std::fs::read_to_string(path) {
        Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => {
            tracing::debug!(path = %path.display(), "token file is empty");
            PLACEHOLDER_TOKEN.to_string()
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "token file not readable");
            PLACEHOLDER_TOKEN.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "  abc.def.ghi\r\n").unwrap();
        assert_eq!(load(Some(&path)), "abc.def.ghi");
    }

    #[test]
    fn test_missing_or_blank_file_gives_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        assert_eq!(load(Some(&path)), PLACEHOLDER_TOKEN);

        std::fs::write(&path, "\n  \n").unwrap();
        assert_eq!(load(Some(&path)), PLACEHOLDER_TOKEN);

        assert_eq!(load(None), PLACEHOLDER_TOKEN);
    }

    #[test]
    fn test_configured_override_wins() {
        let mut config = crate::AppConfig::default().anilist;
        config.token_path = Some(PathBuf::from("/srv/tokens/anilist.txt"));
        assert_eq!(
            configured_path(&config),
            Some(PathBuf::from("/srv/tokens/anilist.txt"))
        );

        config.token_path = None;
        assert_eq!(configured_path(&config), default_path());
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = default_path() {
            assert!(path.ends_with(Path::new("mpv").join("keys").join("key.txt")));
        }
    }
}
