use regex::Regex;
use std::sync::LazyLock;

/// A season or part marker found in the filename.
#[derive(Debug, PartialEq, Eq)]
pub struct MarkerMatch {
    /// The marker as written, e.g. "S2" or "Season II".
    pub raw: String,
    pub number: u32,
}

/// "S2", "S01".
static RE_S_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^S(\d{1,2})$").unwrap());

/// "2nd", "3rd", "4th" (followed by a separate "Season" token).
static RE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)$").unwrap());

/// "第2期", "2期".
static RE_JAPANESE_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:第)?(\d{1,2})期$").unwrap());

/// Single-token season markers: "S2", "S01", "第2期".
pub fn try_single(text: &str) -> Option<MarkerMatch> {
    let caps = RE_S_PREFIX
        .captures(text)
        .or_else(|| RE_JAPANESE_SEASON.captures(text))?;
    let number: u32 = caps[1].parse().ok()?;
    Some(MarkerMatch {
        raw: text.to_string(),
        number,
    })
}

/// Ordinal preceding the word "Season": returns the number in "2nd".
pub fn try_ordinal(text: &str) -> Option<u32> {
    RE_ORDINAL.captures(text)?[1].parse().ok()
}

/// The value after a prefix keyword: "2", "02", "II".
pub fn parse_number_or_roman(s: &str) -> Option<u32> {
    if s.chars().all(|c| c.is_ascii_digit()) {
        return s.parse().ok().filter(|n| *n > 0 && *n < 100);
    }
    roman_to_u32(s)
}

/// Roman numerals up to L, enough for season and part counts.
fn roman_to_u32(s: &str) -> Option<u32> {
    let mut total: i32 = 0;
    let mut prev = 0i32;

    for c in s.to_uppercase().chars().rev() {
        let value = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            _ => return None,
        };
        if value < prev {
            total -= value;
        } else {
            total += value;
        }
        prev = value;
    }

    u32::try_from(total).ok().filter(|n| *n > 0)
}
