//! Command-line lexer.
//!
//! Splits a line into words the way a POSIX shell does for simple commands,
//! using the logos lexer generator for the individual pieces:
//!
//! - **Blanks**: spaces and tabs separate words
//! - **Double quotes**: `"a b"`, with `\"` and `\\` escapes
//! - **Single quotes**: `'a b'`, fully literal
//! - **Escapes**: `\x` outside quotes is a literal `x`
//! - **Bare text**: everything else
//!
//! Pieces that touch without a blank between them form one word, so
//! `a"b c"'d'` is the single word `ab cd`. No expansion of any kind happens.

use logos::Logos;
use thiserror::Error;

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum LexerError {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("trailing backslash")]
    TrailingBackslash,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexerError)]
enum Piece {
    #[regex(r"[ \t\r\n]+")]
    Blank,

    #[regex(r#""([^"\\]|\\.)*""#, lex_double)]
    Double(String),

    #[regex(r"'[^']*'", lex_single)]
    Single(String),

    #[regex(r"\\.", lex_escape)]
    Escaped(String),

    #[regex(r#"[^ \t\r\n"'\\]+"#, |lex| lex.slice().to_string())]
    Bare(String),
}

fn lex_double(lex: &mut logos::Lexer<Piece>) -> String {
    let inner = &lex.slice()[1..lex.slice().len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn lex_single(lex: &mut logos::Lexer<Piece>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

fn lex_escape(lex: &mut logos::Lexer<Piece>) -> String {
    lex.slice()[1..].to_string()
}

/// Classify a span logos could not match.
fn classify(slice: &str) -> LexerError {
    match slice.chars().next() {
        Some('"' | '\'') => LexerError::UnterminatedQuote,
        Some('\\') => LexerError::TrailingBackslash,
        _ => LexerError::UnexpectedCharacter,
    }
}

/// Split a command line into words.
///
/// A blank line yields no words. Quoted empty strings (`""`, `''`) are kept
/// as empty words.
pub fn tokenize(line: &str) -> Result<Vec<String>, LexerError> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut lexer = Piece::lexer(line);

    while let Some(result) = lexer.next() {
        match result {
            Ok(Piece::Blank) => words.extend(current.take()),
            Ok(Piece::Double(s) | Piece::Single(s) | Piece::Escaped(s) | Piece::Bare(s)) => {
                current.get_or_insert_with(String::new).push_str(&s);
            }
            Err(_) => return Err(classify(lexer.slice())),
        }
    }

    words.extend(current);
    Ok(words)
}
