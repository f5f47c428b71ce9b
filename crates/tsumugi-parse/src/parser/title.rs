use crate::tokenizer::{Token, TokenKind};

/// The title is the first consecutive run of unidentified free text.
///
/// Delimiters inside the run become single spaces. The run ends at the first
/// identified token, bracket, or dash after it has started.
pub fn extract_title(tokens: &[Token], identified: &[bool]) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    let mut started = false;

    for (token, &taken) in tokens.iter().zip(identified) {
        if taken {
            if started {
                break;
            }
            continue;
        }

        match token.kind {
            TokenKind::FreeText if token.text == "-" => {
                if started {
                    break;
                }
            }
            TokenKind::FreeText => {
                started = true;
                parts.push(&token.text);
            }
            TokenKind::Delimiter if started => parts.push(" "),
            TokenKind::Delimiter => {}
            TokenKind::Bracketed => {
                if started {
                    break;
                }
            }
        }
    }

    let title = parts.concat().trim().to_string();
    (!title.is_empty()).then_some(title)
}
