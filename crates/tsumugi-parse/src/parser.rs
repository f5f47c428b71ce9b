pub mod episode;
pub mod season;
pub mod title;

use crate::elements::Elements;
use crate::keyword::{self, KeywordKind};
use crate::tokenizer::{self, Token, TokenKind};

/// Parse an anime filename into its component elements.
///
/// # Example
/// ```
/// let result = tsumugi_parse::parse("[SubsPlease] Sousou no Frieren - 05 (1080p) [ABCD1234].mkv");
/// assert_eq!(result.title.as_deref(), Some("Sousou no Frieren"));
/// assert_eq!(result.episode_number, Some(5));
/// assert_eq!(result.release_group.as_deref(), Some("SubsPlease"));
/// assert_eq!(result.resolution.as_deref(), Some("1080p"));
/// assert_eq!(result.checksum.as_deref(), Some("ABCD1234"));
/// ```
pub fn parse(filename: &str) -> Elements {
    let (tokens, file_extension) = tokenizer::tokenize(filename);
    let mut elements = Elements {
        file_extension,
        ..Elements::default()
    };
    let mut identified = vec![false; tokens.len()];

    identify_bracketed_keywords(&tokens, &mut elements, &mut identified);
    extract_release_group(&tokens, &mut elements, &mut identified);
    extract_checksum(&tokens, &mut elements, &mut identified);
    extract_year(&tokens, &mut elements, &mut identified);
    extract_markers(&tokens, &mut elements, &mut identified);
    identify_free_keywords(&tokens, &mut elements, &mut identified);
    extract_episode(&tokens, &mut elements, &mut identified);
    elements.title = title::extract_title(&tokens, &identified);

    tracing::trace!(filename, ?elements, "parsed filename");
    elements
}

/// Bracketed tokens whose every word is a keyword or resolution.
/// `(BD 1080p HEVC)` is claimed whole; `[Sub Group]` is not.
fn identify_bracketed_keywords(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Bracketed {
            continue;
        }
        let words: Vec<&str> = token
            .text
            .split(|c: char| c.is_whitespace() || c == '_' || c == ',')
            .filter(|w| !w.is_empty())
            .collect();
        let recognized = |w: &&str| {
            keyword::lookup_contextual(w, true).is_some() || parse_resolution(w).is_some()
        };
        let whole = keyword::lookup_contextual(&token.text, true);

        if let Some(entry) = whole {
            apply_keyword(entry.kind, &token.text, elements);
        } else if !words.is_empty() && words.iter().all(recognized) {
            for word in &words {
                match keyword::lookup_contextual(word, true) {
                    Some(entry) => apply_keyword(entry.kind, word, elements),
                    None => set_once(&mut elements.resolution, parse_resolution(word)),
                }
            }
        } else {
            continue;
        }
        identified[i] = true;
    }
}

/// The first bracketed token before any free text is the release group.
fn extract_release_group(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::FreeText => return,
            TokenKind::Bracketed if !identified[i] && !is_checksum(&token.text) => {
                elements.release_group = Some(token.text.clone());
                identified[i] = true;
                return;
            }
            _ => {}
        }
    }
}

/// An 8-character hex string in brackets is a CRC32 checksum.
fn extract_checksum(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    let found = tokens.iter().enumerate().rev().find(|(i, token)| {
        token.kind == TokenKind::Bracketed && !identified[*i] && is_checksum(&token.text)
    });
    if let Some((i, token)) = found {
        elements.checksum = Some(token.text.to_uppercase());
        identified[i] = true;
    }
}

fn is_checksum(s: &str) -> bool {
    s.len() == 8 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// `(2019)` anywhere, or a bare year once the title has started.
fn extract_year(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    let mut saw_text = false;
    for (i, token) in tokens.iter().enumerate() {
        if identified[i] {
            continue;
        }
        let is_year = episode::is_year_like(&token.text);
        match token.kind {
            TokenKind::Bracketed if is_year => {}
            TokenKind::FreeText if is_year && saw_text => {}
            TokenKind::FreeText => {
                saw_text |= !token.is_dash();
                continue;
            }
            _ => continue,
        }
        if elements.year.is_none() {
            elements.year = token.text.parse().ok();
            identified[i] = true;
        }
    }
}

/// Season, part, combined `S01E05` and prefixed episode/volume markers.
fn extract_markers(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    for i in 0..tokens.len() {
        if identified[i] || !tokens[i].is_free() || tokens[i].is_dash() {
            continue;
        }
        let text = tokens[i].text.as_str();

        if let Some(m) = episode::try_combined(text) {
            set_once(&mut elements.season, Some(format!("S{:02}", m.season.unwrap_or(1))));
            set_once(&mut elements.season_number, m.season);
            set_once(&mut elements.episode, Some(m.raw));
            set_once(&mut elements.episode_number, Some(m.number));
            set_once(&mut elements.release_version, m.version);
            identified[i] = true;
            continue;
        }

        if let Some(m) = season::try_single(text) {
            if elements.season.is_none() {
                elements.season = Some(m.raw);
                elements.season_number = Some(m.number);
            }
            identified[i] = true;
            continue;
        }

        let Some(next) = next_word(tokens, identified, i) else {
            continue;
        };
        let next_text = tokens[next].text.as_str();

        if let Some(number) = season::try_ordinal(text) {
            if next_text.eq_ignore_ascii_case("season") {
                if elements.season.is_none() {
                    elements.season = Some(format!("{text} {next_text}"));
                    elements.season_number = Some(number);
                }
                identified[i] = true;
                identified[next] = true;
            }
            continue;
        }

        let claimed = match keyword::lookup_prefix(text) {
            Some(KeywordKind::Season) => season::parse_number_or_roman(next_text).map(|n| {
                set_once(&mut elements.season, Some(format!("{text} {next_text}")));
                set_once(&mut elements.season_number, Some(n));
            }),
            Some(KeywordKind::Part) => season::parse_number_or_roman(next_text).map(|n| {
                set_once(&mut elements.part, Some(format!("{text} {next_text}")));
                set_once(&mut elements.part_number, Some(n));
            }),
            Some(KeywordKind::Episode) => episode::try_plain_number(next_text).map(|m| {
                set_once(&mut elements.episode, Some(m.raw));
                set_once(&mut elements.episode_number, Some(m.number));
            }),
            Some(KeywordKind::Volume) => next_text
                .chars()
                .all(|c| c.is_ascii_digit())
                .then_some(()),
            _ => None,
        };
        if claimed.is_some() {
            identified[i] = true;
            identified[next] = true;
        }
    }
}

/// Free-text keywords, skipping ambiguous short words.
fn identify_free_keywords(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::FreeText || identified[i] {
            continue;
        }
        if let Some(entry) = keyword::lookup_contextual(&token.text, false) {
            apply_keyword(entry.kind, &token.text, elements);
            identified[i] = true;
        } else if let Some(res) = parse_resolution(&token.text) {
            set_once(&mut elements.resolution, Some(res));
            identified[i] = true;
        }
    }
}

fn extract_episode(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    if elements.episode_number.is_some() {
        return;
    }

    // "Title - 05": the number right after a dash.
    for i in 0..tokens.len() {
        if identified[i] || !tokens[i].is_dash() {
            continue;
        }
        identified[i] = true;
        if let Some(next) = next_word(tokens, identified, i) {
            if let Some(m) = episode::try_extract(&tokens[next].text) {
                record_episode(elements, m);
                identified[next] = true;
                return;
            }
        }
    }

    // A standalone number after some title text.
    let mut saw_text = false;
    for i in 0..tokens.len() {
        if identified[i] || !tokens[i].is_free() {
            continue;
        }
        match episode::try_extract(&tokens[i].text) {
            Some(m) if saw_text => {
                record_episode(elements, m);
                identified[i] = true;
                return;
            }
            Some(_) => {}
            None => saw_text = true,
        }
    }

    // "[05]".
    for i in 0..tokens.len() {
        if identified[i] || tokens[i].kind != TokenKind::Bracketed {
            continue;
        }
        if let Some(m) = episode::try_plain_number(&tokens[i].text) {
            record_episode(elements, m);
            identified[i] = true;
            return;
        }
    }
}

fn record_episode(elements: &mut Elements, m: episode::EpisodeMatch) {
    if m.season.is_some() {
        set_once(&mut elements.season_number, m.season);
        set_once(&mut elements.season, m.season.map(|s| format!("S{s:02}")));
    }
    set_once(&mut elements.release_version, m.version);
    elements.episode = Some(m.raw);
    elements.episode_number = Some(m.number);
}

/// The next free-text word after `start`, skipping delimiters.
/// Stops at brackets, dashes, and tokens already claimed.
fn next_word(tokens: &[Token], identified: &[bool], start: usize) -> Option<usize> {
    let mut j = start + 1;
    while j < tokens.len() && tokens[j].kind == TokenKind::Delimiter {
        j += 1;
    }
    let token = tokens.get(j)?;
    (token.is_free() && !token.is_dash() && !identified[j]).then_some(j)
}

/// "1920x1080" → "1080p"; "1080p" and "1080i" pass through lowercased.
fn parse_resolution(s: &str) -> Option<String> {
    let lower = s.to_lowercase();

    if let Some((width, height)) = lower.split_once('x') {
        if width.parse::<u32>().is_ok() && height.parse::<u32>().is_ok() {
            return Some(format!("{height}p"));
        }
    }

    let num_part = lower
        .strip_suffix('p')
        .or_else(|| lower.strip_suffix('i'))?;
    (num_part.len() >= 3 && num_part.parse::<u32>().is_ok()).then_some(lower)
}

fn apply_keyword(kind: KeywordKind, text: &str, elements: &mut Elements) {
    let value = Some(text.to_string());
    match kind {
        KeywordKind::VideoCodec => set_once(&mut elements.video_codec, value),
        KeywordKind::AudioCodec => set_once(&mut elements.audio_codec, value),
        KeywordKind::Resolution => set_once(&mut elements.resolution, value),
        KeywordKind::Source | KeywordKind::StreamingSource => set_once(&mut elements.source, value),
        KeywordKind::EpisodeType => set_once(&mut elements.anime_type, value),
        _ => {}
    }
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_subgroup_format() {
        let r = parse("[SubsPlease] Sousou no Frieren - 05 (1080p) [ABCD1234].mkv");
        assert_eq!(r.title.as_deref(), Some("Sousou no Frieren"));
        assert_eq!(r.episode_number, Some(5));
        assert_eq!(r.release_group.as_deref(), Some("SubsPlease"));
        assert_eq!(r.resolution.as_deref(), Some("1080p"));
        assert_eq!(r.checksum.as_deref(), Some("ABCD1234"));
        assert_eq!(r.file_extension.as_deref(), Some("mkv"));
    }

    #[test]
    fn test_underscore_format() {
        let r = parse("[HorribleSubs]_Naruto_Shippuuden_-_500_[720p].mkv");
        assert_eq!(r.title.as_deref(), Some("Naruto Shippuuden"));
        assert_eq!(r.episode_number, Some(500));
        assert_eq!(r.release_group.as_deref(), Some("HorribleSubs"));
    }

    #[test]
    fn test_no_group() {
        let r = parse("Steins;Gate - 01 [1080p][HEVC].mkv");
        assert_eq!(r.title.as_deref(), Some("Steins;Gate"));
        assert_eq!(r.release_group, None);
        assert_eq!(r.episode_number, Some(1));
        assert_eq!(r.video_codec.as_deref(), Some("HEVC"));
    }

    #[test]
    fn test_multi_word_bracket() {
        let r = parse("[Group] Title - 05v2 (BD 1920x1080 x264 FLAC).mkv");
        assert_eq!(r.title.as_deref(), Some("Title"));
        assert_eq!(r.episode.as_deref(), Some("05v2"));
        assert_eq!(r.release_version.as_deref(), Some("v2"));
        assert_eq!(r.source.as_deref(), Some("BD"));
        assert_eq!(r.resolution.as_deref(), Some("1080p"));
        assert_eq!(r.video_codec.as_deref(), Some("x264"));
        assert_eq!(r.audio_codec.as_deref(), Some("FLAC"));
    }

    #[test]
    fn test_season_prefix_token() {
        let r = parse("[Group] Kimetsu no Yaiba S2 - 03 [1080p].mkv");
        assert_eq!(r.title.as_deref(), Some("Kimetsu no Yaiba"));
        assert_eq!(r.season.as_deref(), Some("S2"));
        assert_eq!(r.season_number, Some(2));
        assert_eq!(r.episode_number, Some(3));
    }

    #[test]
    fn test_season_and_part_words() {
        let r = parse("[Group] Shingeki no Kyojin Season 3 Part 2 - 05 [1080p].mkv");
        assert_eq!(r.title.as_deref(), Some("Shingeki no Kyojin"));
        assert_eq!(r.season.as_deref(), Some("Season 3"));
        assert_eq!(r.season_number, Some(3));
        assert_eq!(r.part.as_deref(), Some("Part 2"));
        assert_eq!(r.part_number, Some(2));
        assert_eq!(r.episode_number, Some(5));
    }

    #[test]
    fn test_roman_and_ordinal_seasons() {
        let r = parse("Overlord Season II - 01.mkv");
        assert_eq!(r.title.as_deref(), Some("Overlord"));
        assert_eq!(r.season_number, Some(2));

        let r = parse("[Group] Shingeki no Kyojin 2nd Season - 01.mkv");
        assert_eq!(r.title.as_deref(), Some("Shingeki no Kyojin"));
        assert_eq!(r.season.as_deref(), Some("2nd Season"));
        assert_eq!(r.season_number, Some(2));
    }

    #[test]
    fn test_combined_season_episode() {
        let r = parse("Vinland.Saga.S02E05.1080p.WEB-DL.mkv");
        assert_eq!(r.title.as_deref(), Some("Vinland Saga"));
        assert_eq!(r.season_number, Some(2));
        assert_eq!(r.episode_number, Some(5));
        assert_eq!(r.resolution.as_deref(), Some("1080p"));
        assert_eq!(r.source.as_deref(), Some("WEB-DL"));
    }

    #[test]
    fn test_part_without_number_stays_in_title() {
        let r = parse("[Group] Part Time Job - 02.mkv");
        assert_eq!(r.title.as_deref(), Some("Part Time Job"));
        assert_eq!(r.part, None);
    }

    #[test]
    fn test_year_is_not_title_or_episode() {
        let r = parse("[Group] Dororo (2019) - 12 [720p].mkv");
        assert_eq!(r.title.as_deref(), Some("Dororo"));
        assert_eq!(r.year, Some(2019));
        assert_eq!(r.episode_number, Some(12));
    }

    #[test]
    fn test_number_in_title_before_dash() {
        let r = parse("[Group] Mob Psycho 100 - 05.mkv");
        assert_eq!(r.title.as_deref(), Some("Mob Psycho 100"));
        assert_eq!(r.episode_number, Some(5));
    }

    #[test]
    fn test_episode_prefix_word() {
        let r = parse("One Piece Episode 1071.mp4");
        assert_eq!(r.title.as_deref(), Some("One Piece"));
        assert_eq!(r.episode_number, Some(1071));
    }

    #[test]
    fn test_no_title() {
        let r = parse("[SubsPlease] - 05 [1080p].mkv");
        assert_eq!(r.title, None);
        assert_eq!(r.episode_number, Some(5));
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let r = parse("Frieren - 01.mkv");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["title"], "Frieren");
        assert!(json.get("season").is_none());
        assert!(json.get("checksum").is_none());
    }

    #[test]
    fn test_resolution_parsing() {
        assert_eq!(parse_resolution("1920x1080").as_deref(), Some("1080p"));
        assert_eq!(parse_resolution("720P").as_deref(), Some("720p"));
        assert_eq!(parse_resolution("Xp"), None);
        assert_eq!(parse_resolution("Up"), None);
    }
}
