use serde::{Deserialize, Serialize};

/// Parsed elements extracted from an anime filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elements {
    /// The anime title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Season marker as written (e.g., "S2", "Season II", "2nd Season").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    /// Part marker as written (e.g., "Part 2", "Cour 2").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<u32>,
    /// Episode as written ("05", "12v2", "07.5").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    /// Release version (e.g., "v2").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_version: Option<String>,
    /// Release group name (e.g., "SubsPlease").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_group: Option<String>,
    /// Video resolution normalized to "<height>p" when possible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    /// Source (e.g., "BD", "WEB-DL").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Anime type (e.g., "OVA", "NCOP").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anime_type: Option<String>,
    /// CRC32 checksum (e.g., "ABCD1234").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
}
