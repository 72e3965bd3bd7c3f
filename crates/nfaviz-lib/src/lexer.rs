//! Lexer for the pattern alphabet.
//!
//! Produces span-carrying tokens for ASCII letters and digits plus the four
//! operators. Whitespace is skipped. Anything else is a hard error: silently
//! dropping foreign characters would make `a$b` and `ab` indistinguishable.

use logos::Logos;

use crate::{Error, Result};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[token("*")]
    Star,

    #[token("|")]
    Pipe,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[a-zA-Z0-9]", |lex| lex.slice().chars().next())]
    Symbol(char),
}

impl TokenKind {
    /// Short name used in diagnostics.
    pub(crate) fn describe(self) -> &'static str {
        match self {
            TokenKind::Star => "*",
            TokenKind::Pipe => "|",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Symbol(_) => "symbol",
        }
    }
}

/// A token with its byte span in the source pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: logos::Span,
}

/// Tokenize a pattern. The first foreign character aborts the lex.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                let ch = source[span.clone()].chars().next().unwrap_or('\u{fffd}');
                return Err(Error::UnexpectedCharacter { ch, at: span.start });
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_and_symbols() {
        let tokens = lex("a(b|c)*").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Symbol('a'),
                TokenKind::OpenParen,
                TokenKind::Symbol('b'),
                TokenKind::Pipe,
                TokenKind::Symbol('c'),
                TokenKind::CloseParen,
                TokenKind::Star,
            ]
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        let tokens = lex(" a\tb \r\n").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].span, 1..2);
        assert_eq!(tokens[1].span, 3..4);
    }

    #[test]
    fn digits_are_symbols() {
        let tokens = lex("0z9").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Symbol('0'),
                TokenKind::Symbol('z'),
                TokenKind::Symbol('9'),
            ]
        );
    }

    #[test]
    fn foreign_character_is_an_error() {
        let err = lex("ab$cd").unwrap_err();
        assert_eq!(err, Error::UnexpectedCharacter { ch: '$', at: 2 });
    }

    #[test]
    fn empty_input_lexes_to_nothing() {
        assert!(lex("").unwrap().is_empty());
    }
}
