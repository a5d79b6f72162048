pub mod token;

use logos::Logos;
use crate::diagnostics::NoirError;
use crate::span::{LineIndex, Spanned};
use token::Token;

/// Tokenize `source`. The result always ends with `Token::Eof`.
pub fn lex(source: &str) -> Result<Vec<Spanned<Token>>, NoirError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = index.span(range.start, range.end);
        match result {
            Ok(Token::Comment) => continue,
            Ok(tok) => tokens.push(Spanned::new(tok, span)),
            Err(()) => return Err(NoirError::lex(classify_error(source, range.start), span)),
        }
    }

    // Reject 1.2.3: without this check it lexes as FloatLit(1.2) Dot IntLit(3).
    for pair in tokens.windows(2) {
        if matches!(pair[0].node, Token::FloatLit(_) | Token::DoubleLit(_))
            && matches!(pair[1].node, Token::Dot)
            && pair[0].span.end == pair[1].span.start
        {
            return Err(NoirError::lex(
                "invalid number format: multiple decimal points",
                pair[0].span.to(pair[1].span),
            ));
        }
    }

    tokens.push(Spanned::new(Token::Eof, index.span(source.len(), source.len())));
    Ok(tokens)
}

/// Describe why lexing failed at byte offset `start`.
fn classify_error(source: &str, start: usize) -> String {
    let rest = &source[start..];
    let mut chars = rest.chars();
    match chars.next() {
        Some('"') => {
            while let Some(c) = chars.next() {
                match c {
                    '"' => break,
                    '\\' => match chars.next() {
                        Some('n' | 't' | 'r' | '"' | '\\') => {}
                        Some(other) => return format!("invalid escape sequence '\\{other}'"),
                        None => break,
                    },
                    _ => {}
                }
            }
            "unterminated string literal".to_string()
        }
        Some('\'') => match (chars.next(), chars.next()) {
            (None, _) | (Some('\n'), _) => "unterminated character literal".to_string(),
            (Some('\\'), Some(other)) if !matches!(other, 'n' | 't' | 'r' | '"' | '\\') => {
                format!("invalid escape sequence '\\{other}'")
            }
            _ => "invalid character literal".to_string(),
        },
        Some(c) if c.is_ascii_digit() => {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            format!("integer literal '{digits}' is out of range")
        }
        Some(c) => format!("invalid character '{c}'"),
        None => "unexpected end of input".to_string(),
    }
}
