//! Trait definition for the list-progress service.
//!
//! [`AniListClient`](crate::AniListClient) implements it; the command
//! handlers only see the trait, so they can be exercised without a network.

use std::future::Future;

pub trait ProgressTracker: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a media id by title. `None` when nothing matches.
    fn get_id(&self, title: &str)
        -> impl Future<Output = Result<Option<u64>, Self::Error>> + Send;

    /// The user's watched-episode count for a media entry.
    fn get_progress(&self, media_id: u64) -> impl Future<Output = Result<u32, Self::Error>> + Send;

    /// Set the watched-episode count; returns the count AniList stored.
    fn update_progress(
        &self,
        media_id: u64,
        progress: u32,
    ) -> impl Future<Output = Result<u32, Self::Error>> + Send;
}
