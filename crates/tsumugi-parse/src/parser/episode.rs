use regex::Regex;
use std::sync::LazyLock;

/// Episode numbers above this are treated as something else (years, ids).
const MAX_EPISODE: u32 = 1999;

/// Result of a successful episode extraction.
#[derive(Debug, PartialEq, Eq)]
pub struct EpisodeMatch {
    pub raw: String,
    pub number: u32,
    /// Season carried by a combined marker (`S01E05` → 1).
    pub season: Option<u32>,
    /// Release version (`05v2` → "v2").
    pub version: Option<String>,
}

impl EpisodeMatch {
    fn plain(raw: &str, number: u32) -> Self {
        Self {
            raw: raw.to_string(),
            number,
            season: None,
            version: None,
        }
    }
}

static RE_COMBINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^S(\d{1,2})E(\d{1,4})(?:v(\d))?$").unwrap());

static RE_COMBINED_X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[xX](\d{1,4})$").unwrap());

static RE_PREFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:EP\.?|E|#)(\d{1,4})(?:v(\d))?$").unwrap());

static RE_VERSIONED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})[vV](\d)$").unwrap());

static RE_FRACTIONAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,4})\.5$").unwrap());

static RE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})[-~](\d{1,4})$").unwrap());

static RE_JAPANESE_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^第(\d{1,4})[話集]$").unwrap());

/// Combined season/episode marker: `S01E05`, `S01E05v2`, `01x05`.
pub fn try_combined(text: &str) -> Option<EpisodeMatch> {
    let caps = RE_COMBINED
        .captures(text)
        .or_else(|| RE_COMBINED_X.captures(text))?;
    let season: u32 = caps[1].parse().ok()?;
    let number: u32 = caps[2].parse().ok()?;
    Some(EpisodeMatch {
        raw: text.to_string(),
        number,
        season: Some(season),
        version: caps.get(3).map(|v| format!("v{}", v.as_str())),
    })
}

/// Try every single-token episode shape, most specific first.
pub fn try_extract(text: &str) -> Option<EpisodeMatch> {
    let text = text.trim();
    if text.is_empty() || is_year_like(text) {
        return None;
    }

    if let Some(m) = try_combined(text) {
        return Some(m);
    }

    if let Some(caps) = RE_PREFIXED
        .captures(text)
        .or_else(|| RE_VERSIONED.captures(text))
    {
        let number = bounded(&caps[1])?;
        return Some(EpisodeMatch {
            version: caps.get(2).map(|v| format!("v{}", v.as_str())),
            ..EpisodeMatch::plain(text, number)
        });
    }

    for re in [&*RE_FRACTIONAL, &*RE_JAPANESE_COUNTER] {
        if let Some(caps) = re.captures(text) {
            return Some(EpisodeMatch::plain(text, bounded(&caps[1])?));
        }
    }

    if let Some(caps) = RE_RANGE.captures(text) {
        let start = bounded(&caps[1])?;
        let end = bounded(&caps[2])?;
        if start < end {
            return Some(EpisodeMatch::plain(text, start));
        }
        return None;
    }

    try_plain_number(text)
}

/// A bare number, e.g. "05" or "500".
pub fn try_plain_number(text: &str) -> Option<EpisodeMatch> {
    if !text.chars().all(|c| c.is_ascii_digit()) || is_year_like(text) {
        return None;
    }
    Some(EpisodeMatch::plain(text, bounded(text)?))
}

/// A 4-digit number between 1950 and 2050.
pub fn is_year_like(s: &str) -> bool {
    s.len() == 4
        && s.parse::<u32>()
            .is_ok_and(|n| (1950..=2050).contains(&n))
}

fn bounded(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n <= MAX_EPISODE)
}
