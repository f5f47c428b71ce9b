use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elements::Elements;
use crate::parser::parse;

/// The display title handed back to the player script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub title: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    #[error("no title could be recognized in {0:?}")]
    NoTitle(String),
}

/// Guess the show title for a filename.
///
/// The season and part markers, when present, are appended to the parsed
/// title so that "Title Season 3 Part 2" becomes `Title 3 2`. Every other
/// element is discarded.
pub fn guess(filename: &str) -> Result<Guess, GuessError> {
    let elements = parse(filename);
    let title = compose_title(&elements).ok_or_else(|| GuessError::NoTitle(filename.to_string()))?;
    tracing::debug!(filename, title = %title, "guessed title");
    Ok(Guess { title })
}

/// `title [+ " " + season] [+ " " + part]`.
///
/// Markers render as their number when one was parsed ("Season II" → `2`)
/// and as written otherwise.
pub fn compose_title(elements: &Elements) -> Option<String> {
    let mut title = elements.title.clone()?;
    let markers = [
        marker(elements.season_number, elements.season.as_deref()),
        marker(elements.part_number, elements.part.as_deref()),
    ];
    for value in markers.into_iter().flatten() {
        title.push(' ');
        title.push_str(&value);
    }
    Some(title)
}

fn marker(number: Option<u32>, raw: Option<&str>) -> Option<String> {
    number
        .map(|n| n.to_string())
        .or_else(|| raw.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(title: &str, season: Option<u32>, part: Option<u32>) -> Elements {
        Elements {
            title: Some(title.into()),
            season: season.map(|s| format!("S{s}")),
            season_number: season,
            part: part.map(|p| format!("Part {p}")),
            part_number: part,
            ..Elements::default()
        }
    }

    #[test]
    fn test_plain_title_is_unmodified() {
        assert_eq!(
            compose_title(&elements("Sousou no Frieren", None, None)).as_deref(),
            Some("Sousou no Frieren")
        );
    }

    #[test]
    fn test_season_and_part_are_appended() {
        assert_eq!(
            compose_title(&elements("Shingeki no Kyojin", Some(3), Some(2))).as_deref(),
            Some("Shingeki no Kyojin 3 2")
        );
        assert_eq!(
            compose_title(&elements("Kimetsu no Yaiba", Some(2), None)).as_deref(),
            Some("Kimetsu no Yaiba 2")
        );
        assert_eq!(
            compose_title(&elements("Mushoku Tensei", None, Some(2))).as_deref(),
            Some("Mushoku Tensei 2")
        );
    }

    #[test]
    fn test_raw_marker_used_without_number() {
        let e = Elements {
            title: Some("Title".into()),
            season: Some("Final".into()),
            ..Elements::default()
        };
        assert_eq!(compose_title(&e).as_deref(), Some("Title Final"));
    }

    #[test]
    fn test_guess_from_filename() {
        let g = guess("[SubsPlease] Shingeki no Kyojin Season 3 Part 2 - 05 (1080p) [ABCD1234].mkv")
            .unwrap();
        assert_eq!(g.title, "Shingeki no Kyojin 3 2");

        let g = guess("[Erai-raws] Sousou no Frieren - 05 [1080p][Multiple Subtitle].mkv").unwrap();
        assert_eq!(g.title, "Sousou no Frieren");

        let g = guess("Overlord Season II - 01.mkv").unwrap();
        assert_eq!(g.title, "Overlord 2");
    }

    #[test]
    fn test_guess_with_unclosed_bracket() {
        let g = guess("[Unclosed Title - 01.mkv").unwrap();
        assert_eq!(g.title, "Unclosed Title");
    }

    #[test]
    fn test_guess_without_title_is_an_error() {
        let err = guess("[SubsPlease] - 05 [1080p].mkv").unwrap_err();
        assert!(matches!(err, GuessError::NoTitle(_)));
        assert!(guess("").is_err());
    }

    #[test]
    fn test_guess_serializes_to_title_object() {
        let g = guess("Frieren - 01.mkv").unwrap();
        assert_eq!(
            serde_json::to_value(&g).unwrap(),
            serde_json::json!({ "title": "Frieren" })
        );
    }
}
