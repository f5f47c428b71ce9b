use bitflags::bitflags;
use phf::phf_map;

bitflags! {
    /// Flags controlling when a keyword matches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeywordFlags: u8 {
        /// Only match inside brackets. Short words like "BD" or "TV" are far
        /// more likely to be part of a title when they appear in free text.
        const AMBIGUOUS = 0b0000_0001;
        /// Only meaningful when followed by a number ("Season 2", "Part 2").
        const PREFIX_NUMBER = 0b0000_0010;
    }
}

/// The category a keyword belongs to, determining which element it populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    VideoCodec,
    VideoTerm,
    AudioCodec,
    AudioTerm,
    Resolution,
    Source,
    StreamingSource,
    EpisodeType,
    ReleaseInfo,
    Subtitles,
    Language,
    Season,
    Part,
    Episode,
    Volume,
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordEntry {
    pub kind: KeywordKind,
    pub flags: KeywordFlags,
}

impl KeywordEntry {
    const fn new(kind: KeywordKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::empty(),
        }
    }

    const fn ambiguous(kind: KeywordKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::AMBIGUOUS,
        }
    }

    const fn prefix(kind: KeywordKind) -> Self {
        Self {
            kind,
            flags: KeywordFlags::PREFIX_NUMBER,
        }
    }

    pub fn is_prefix(&self) -> bool {
        self.flags.contains(KeywordFlags::PREFIX_NUMBER)
    }
}

/// Keyword table. Keys are uppercase; lookups upper-case their input.
pub static KEYWORDS: phf::Map<&'static str, KeywordEntry> = phf_map! {
    // ── Video ────────────────────────────────────────────────────
    "H264" => KeywordEntry::new(KeywordKind::VideoCodec),
    "H.264" => KeywordEntry::new(KeywordKind::VideoCodec),
    "X264" => KeywordEntry::new(KeywordKind::VideoCodec),
    "H265" => KeywordEntry::new(KeywordKind::VideoCodec),
    "H.265" => KeywordEntry::new(KeywordKind::VideoCodec),
    "X265" => KeywordEntry::new(KeywordKind::VideoCodec),
    "HEVC" => KeywordEntry::new(KeywordKind::VideoCodec),
    "AVC" => KeywordEntry::new(KeywordKind::VideoCodec),
    "AV1" => KeywordEntry::new(KeywordKind::VideoCodec),
    "XVID" => KeywordEntry::new(KeywordKind::VideoCodec),
    "VP9" => KeywordEntry::new(KeywordKind::VideoCodec),
    "10BIT" => KeywordEntry::new(KeywordKind::VideoTerm),
    "10-BIT" => KeywordEntry::new(KeywordKind::VideoTerm),
    "HI10P" => KeywordEntry::new(KeywordKind::VideoTerm),
    "8BIT" => KeywordEntry::new(KeywordKind::VideoTerm),
    "HDR" => KeywordEntry::new(KeywordKind::VideoTerm),
    "HDR10" => KeywordEntry::new(KeywordKind::VideoTerm),
    "REMUX" => KeywordEntry::new(KeywordKind::VideoTerm),
    "RAW" => KeywordEntry::ambiguous(KeywordKind::VideoTerm),

    // ── Audio ────────────────────────────────────────────────────
    "AAC" => KeywordEntry::new(KeywordKind::AudioCodec),
    "AC3" => KeywordEntry::new(KeywordKind::AudioCodec),
    "EAC3" => KeywordEntry::new(KeywordKind::AudioCodec),
    "E-AC-3" => KeywordEntry::new(KeywordKind::AudioCodec),
    "FLAC" => KeywordEntry::new(KeywordKind::AudioCodec),
    "MP3" => KeywordEntry::new(KeywordKind::AudioCodec),
    "OPUS" => KeywordEntry::ambiguous(KeywordKind::AudioCodec),
    "VORBIS" => KeywordEntry::new(KeywordKind::AudioCodec),
    "DTS" => KeywordEntry::new(KeywordKind::AudioCodec),
    "TRUEHD" => KeywordEntry::new(KeywordKind::AudioCodec),
    "2.0" => KeywordEntry::ambiguous(KeywordKind::AudioTerm),
    "5.1" => KeywordEntry::ambiguous(KeywordKind::AudioTerm),
    "2CH" => KeywordEntry::new(KeywordKind::AudioTerm),
    "DUAL AUDIO" => KeywordEntry::new(KeywordKind::AudioTerm),
    "DUAL-AUDIO" => KeywordEntry::new(KeywordKind::AudioTerm),
    "DUALAUDIO" => KeywordEntry::new(KeywordKind::AudioTerm),

    // ── Resolution ───────────────────────────────────────────────
    "480P" => KeywordEntry::new(KeywordKind::Resolution),
    "720P" => KeywordEntry::new(KeywordKind::Resolution),
    "1080P" => KeywordEntry::new(KeywordKind::Resolution),
    "1080I" => KeywordEntry::new(KeywordKind::Resolution),
    "2160P" => KeywordEntry::new(KeywordKind::Resolution),
    "4K" => KeywordEntry::new(KeywordKind::Resolution),
    "SD" => KeywordEntry::ambiguous(KeywordKind::Resolution),
    "HD" => KeywordEntry::ambiguous(KeywordKind::Resolution),

    // ── Source ───────────────────────────────────────────────────
    "BD" => KeywordEntry::ambiguous(KeywordKind::Source),
    "BDRIP" => KeywordEntry::new(KeywordKind::Source),
    "BDREMUX" => KeywordEntry::new(KeywordKind::Source),
    "BLURAY" => KeywordEntry::new(KeywordKind::Source),
    "BLU-RAY" => KeywordEntry::new(KeywordKind::Source),
    "DVD" => KeywordEntry::new(KeywordKind::Source),
    "DVDRIP" => KeywordEntry::new(KeywordKind::Source),
    "HDTV" => KeywordEntry::new(KeywordKind::Source),
    "TV" => KeywordEntry::ambiguous(KeywordKind::Source),
    "TVRIP" => KeywordEntry::new(KeywordKind::Source),
    "WEB" => KeywordEntry::ambiguous(KeywordKind::Source),
    "WEBDL" => KeywordEntry::new(KeywordKind::Source),
    "WEB-DL" => KeywordEntry::new(KeywordKind::Source),
    "WEBRIP" => KeywordEntry::new(KeywordKind::Source),
    "BATCH" => KeywordEntry::new(KeywordKind::Source),

    // ── Streaming sources ────────────────────────────────────────
    "AMZN" => KeywordEntry::new(KeywordKind::StreamingSource),
    "CR" => KeywordEntry::ambiguous(KeywordKind::StreamingSource),
    "CRUNCHYROLL" => KeywordEntry::new(KeywordKind::StreamingSource),
    "DSNP" => KeywordEntry::new(KeywordKind::StreamingSource),
    "HIDIVE" => KeywordEntry::new(KeywordKind::StreamingSource),
    "NF" => KeywordEntry::ambiguous(KeywordKind::StreamingSource),
    "NETFLIX" => KeywordEntry::new(KeywordKind::StreamingSource),

    // ── Episode type ─────────────────────────────────────────────
    "OVA" => KeywordEntry::new(KeywordKind::EpisodeType),
    "ONA" => KeywordEntry::new(KeywordKind::EpisodeType),
    "OAD" => KeywordEntry::new(KeywordKind::EpisodeType),
    "SP" => KeywordEntry::ambiguous(KeywordKind::EpisodeType),
    "SPECIAL" => KeywordEntry::ambiguous(KeywordKind::EpisodeType),
    "MOVIE" => KeywordEntry::ambiguous(KeywordKind::EpisodeType),
    "NCOP" => KeywordEntry::new(KeywordKind::EpisodeType),
    "NCED" => KeywordEntry::new(KeywordKind::EpisodeType),
    "OP" => KeywordEntry::ambiguous(KeywordKind::EpisodeType),
    "ED" => KeywordEntry::ambiguous(KeywordKind::EpisodeType),
    "PV" => KeywordEntry::ambiguous(KeywordKind::EpisodeType),

    // ── Release info ─────────────────────────────────────────────
    "REMASTERED" => KeywordEntry::new(KeywordKind::ReleaseInfo),
    "UNCENSORED" => KeywordEntry::new(KeywordKind::ReleaseInfo),
    "UNCUT" => KeywordEntry::new(KeywordKind::ReleaseInfo),
    "PROPER" => KeywordEntry::new(KeywordKind::ReleaseInfo),
    "REPACK" => KeywordEntry::new(KeywordKind::ReleaseInfo),
    "COMPLETE" => KeywordEntry::ambiguous(KeywordKind::ReleaseInfo),
    "FINAL" => KeywordEntry::ambiguous(KeywordKind::ReleaseInfo),

    // ── Subtitles / language ─────────────────────────────────────
    "MULTI-SUB" => KeywordEntry::new(KeywordKind::Subtitles),
    "MULTISUB" => KeywordEntry::new(KeywordKind::Subtitles),
    "SUBBED" => KeywordEntry::new(KeywordKind::Subtitles),
    "DUBBED" => KeywordEntry::new(KeywordKind::Subtitles),
    "SUB" => KeywordEntry::ambiguous(KeywordKind::Subtitles),
    "DUB" => KeywordEntry::ambiguous(KeywordKind::Subtitles),
    "HARDSUB" => KeywordEntry::new(KeywordKind::Subtitles),
    "SOFTSUB" => KeywordEntry::new(KeywordKind::Subtitles),
    "ENG" => KeywordEntry::new(KeywordKind::Language),
    "ENGLISH" => KeywordEntry::ambiguous(KeywordKind::Language),
    "JPN" => KeywordEntry::new(KeywordKind::Language),
    "JAP" => KeywordEntry::new(KeywordKind::Language),
    "MULTI" => KeywordEntry::ambiguous(KeywordKind::Language),

    // ── Prefix keywords ──────────────────────────────────────────
    "SEASON" => KeywordEntry::prefix(KeywordKind::Season),
    "SAISON" => KeywordEntry::prefix(KeywordKind::Season),
    "PART" => KeywordEntry::prefix(KeywordKind::Part),
    "COUR" => KeywordEntry::prefix(KeywordKind::Part),
    "EP" => KeywordEntry::prefix(KeywordKind::Episode),
    "EPISODE" => KeywordEntry::prefix(KeywordKind::Episode),
    "VOL" => KeywordEntry::prefix(KeywordKind::Volume),
    "VOLUME" => KeywordEntry::prefix(KeywordKind::Volume),
};

/// Look up a keyword that stands on its own.
///
/// Outside brackets, `AMBIGUOUS` entries are skipped. Prefix keywords never
/// match here; they are resolved together with the number that follows them.
pub fn lookup_contextual(s: &str, is_enclosed: bool) -> Option<&'static KeywordEntry> {
    let entry = KEYWORDS.get(s.to_uppercase().as_str())?;
    if entry.is_prefix() {
        return None;
    }
    if !is_enclosed && entry.flags.contains(KeywordFlags::AMBIGUOUS) {
        return None;
    }
    Some(entry)
}

/// Look up a prefix keyword such as "Season" or "Part".
pub fn lookup_prefix(s: &str) -> Option<KeywordKind> {
    KEYWORDS
        .get(s.to_uppercase().as_str())
        .filter(|e| e.is_prefix())
        .map(|e| e.kind)
}
