use serde::Deserialize;

// ── GraphQL response wrappers ────────────────────────────────────

/// AniList answers failed lookups with `data` partly or fully null and an
/// `errors` array, often under a 4xx status.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    pub status: Option<u16>,
}

impl<T> GraphQLResponse<T> {
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    /// All error messages joined with `"; "`, if the response carried any.
    pub fn error_message(&self) -> Option<String> {
        let errors = self.errors.as_ref()?;
        let joined = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Some(if joined.is_empty() {
            "unknown error".to_string()
        } else {
            joined
        })
    }

    /// True when every reported error is a 404.
    pub fn is_not_found(&self) -> bool {
        self.errors
            .as_ref()
            .is_some_and(|errors| errors.iter().all(|e| e.status == Some(404)))
    }
}

// ── Media search ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    #[serde(rename = "Media")]
    pub media: Option<MediaId>,
}

#[derive(Debug, Deserialize)]
pub struct MediaId {
    pub id: u64,
}

// ── List entries ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MediaListResponse {
    #[serde(rename = "MediaList")]
    pub media_list: Option<ListProgress>,
}

#[derive(Debug, Deserialize)]
pub struct SaveMediaListEntryResponse {
    #[serde(rename = "SaveMediaListEntry")]
    pub entry: Option<ListProgress>,
}

#[derive(Debug, Deserialize)]
pub struct ListProgress {
    pub progress: Option<u32>,
}
