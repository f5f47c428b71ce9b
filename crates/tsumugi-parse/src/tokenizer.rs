/// Token types produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Text enclosed in brackets: `[SubGroup]`, `(720p)`.
    Bracketed,
    /// Free text between brackets/delimiters.
    FreeText,
    /// A run of delimiter characters (space, underscore, dot).
    Delimiter,
}

/// A single token from a filename.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_free(&self) -> bool {
        self.kind == TokenKind::FreeText
    }

    pub fn is_dash(&self) -> bool {
        self.kind == TokenKind::FreeText && self.text == "-"
    }
}

/// Opening/closing bracket pairs, including CJK brackets.
const BRACKETS: &[(char, char)] = &[
    ('[', ']'),
    ('(', ')'),
    ('{', '}'),
    ('\u{300C}', '\u{300D}'), // 「」
    ('\u{300E}', '\u{300F}'), // 『』
    ('\u{3010}', '\u{3011}'), // 【】
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "ogm", "wmv", "mpg", "flv", "webm", "m4v", "ts", "mov", "3gp", "rm",
    "rmvb", "m2ts",
];

fn is_soft_delimiter(c: char) -> bool {
    matches!(c, ' ' | '_' | '.' | '\u{3000}')
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '\u{2013}' | '\u{2014}')
}

fn closing_bracket(c: char) -> Option<char> {
    BRACKETS
        .iter()
        .find(|(open, _)| *open == c)
        .map(|(_, close)| *close)
}

/// Tokenize a release filename.
///
/// Directory components are dropped and a known video extension is split off
/// and returned separately. Dashes are emitted as `FreeText("-")` so the
/// parser can see the `Title - 05` shape.
pub fn tokenize(input: &str) -> (Vec<Token>, Option<String>) {
    let (input, extension) = strip_extension(file_name(input));
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(close) = closing_bracket(c) {
            let start = i + 1;
            match chars[start..].iter().position(|&ch| ch == close) {
                Some(len) => {
                    let text: String = chars[start..start + len].iter().collect();
                    let text = text.trim();
                    if !text.is_empty() {
                        tokens.push(Token::new(TokenKind::Bracketed, text));
                    }
                    i = start + len + 1;
                }
                // Unterminated: the opening bracket is just a separator.
                None => {
                    tokens.push(Token::new(TokenKind::Delimiter, " "));
                    i = start;
                }
            }
            continue;
        }

        if is_dash(c) {
            tokens.push(Token::new(TokenKind::FreeText, "-"));
            i += 1;
            while i < chars.len() && is_soft_delimiter(chars[i]) {
                i += 1;
            }
            continue;
        }

        if is_soft_delimiter(c) {
            while i < chars.len() && is_soft_delimiter(chars[i]) {
                i += 1;
            }
            tokens.push(Token::new(TokenKind::Delimiter, " "));
            continue;
        }

        // A dot inside a run of digits ("07.5", "5.1") stays in the token, as
        // does a dash joining two words ("Kaguya-sama", "WEB-DL").
        let start = i;
        while i < chars.len() && closing_bracket(chars[i]).is_none() {
            if is_dash(chars[i]) {
                let joins_words = i > start
                    && chars[i - 1].is_alphanumeric()
                    && chars.get(i + 1).is_some_and(|c| c.is_alphanumeric());
                if !joins_words {
                    break;
                }
                i += 1;
                continue;
            }
            if is_soft_delimiter(chars[i]) {
                let digits_so_far = chars[start..i].iter().all(char::is_ascii_digit);
                if chars[i] == '.'
                    && digits_so_far
                    && i > start
                    && i + 1 < chars.len()
                    && chars[i + 1].is_ascii_digit()
                {
                    i += 1;
                    continue;
                }
                break;
            }
            i += 1;
        }
        let text: String = chars[start..i].iter().collect();
        if !text.is_empty() {
            tokens.push(Token::new(TokenKind::FreeText, text));
        }
    }

    (tokens, extension.map(str::to_ascii_lowercase))
}

/// Last path component, accepting both separators since mpv hands over
/// whatever path style the host uses.
fn file_name(input: &str) -> &str {
    input
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(input)
        .trim()
}

fn strip_extension(input: &str) -> (&str, Option<&str>) {
    let Some((stem, ext)) = input.rsplit_once('.') else {
        return (input, None);
    };
    if stem.is_empty() {
        return (input, None);
    }
    if VIDEO_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
    {
        (stem, Some(ext))
    } else {
        (input, None)
    }
}
